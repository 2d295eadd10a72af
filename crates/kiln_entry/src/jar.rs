//! Entry point of an application packaged as a single jar.

use std::path::{Path, PathBuf};

use glob::Pattern;
use kiln_common::join_path_list;
use tracing::debug;

use crate::error::EntryError;
use crate::EntryPoint;

/// A jar file located under the application root.
///
/// The program name is the file name without its `.jar` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarEntry {
    directory: PathBuf,
    file_name: String,
    module_name: String,
}

impl JarEntry {
    /// Creates an entry for the jar at `path`. Fails unless the file ends in `.jar`.
    pub fn new(path: &Path) -> Result<Self, EntryError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let module_name = match file_name.strip_suffix(".jar") {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => return Err(EntryError::NotAJar { file: file_name }),
        };
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self {
            directory,
            file_name,
            module_name,
        })
    }

    /// Resolves the single file matching `pattern` under `app_root`.
    ///
    /// Zero or several matches fail with the sorted candidate list.
    pub fn resolve(app_root: &Path, pattern: &str) -> Result<Self, EntryError> {
        let root = Pattern::escape(&app_root.to_string_lossy());
        let full = Path::new(&root).join(pattern);
        let paths = glob::glob(&full.to_string_lossy()).map_err(|e| EntryError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let mut candidates = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| EntryError::Io {
                path: e.path().to_path_buf(),
                source: std::io::Error::from(e),
            })?;
            candidates.push(path);
        }
        candidates.sort();

        if candidates.len() != 1 {
            return Err(EntryError::JarNotFound {
                pattern: pattern.to_string(),
                candidates,
            });
        }

        debug!("resolved jar {}", candidates[0].display());
        Self::new(&candidates[0])
    }

    /// Directory containing the jar.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name of the jar, including the extension.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the jar.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

impl EntryPoint for JarEntry {
    fn name(&self) -> Result<&str, EntryError> {
        Ok(&self.module_name)
    }

    fn classpath(&self) -> String {
        let dir = self.directory.display().to_string();
        let lib = self.directory.join("lib").display().to_string();
        join_path_list([dir, lib])
    }

    fn trailing_arguments(&self) -> Result<Vec<String>, EntryError> {
        Ok(vec!["-jar".to_string(), self.path().display().to_string()])
    }
}
