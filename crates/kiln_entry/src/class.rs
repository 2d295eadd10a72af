//! Entry point of an exploded application described by its manifest.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use kiln_common::join_path_list;

use crate::error::EntryError;
use crate::manifest::Manifest;
use crate::EntryPoint;

/// An exploded application whose entry class comes from `Start-Class`,
/// falling back to `Main-Class`.
///
/// The class name is resolved on first use and memoized.
#[derive(Debug)]
pub struct ClassEntry {
    app_root: PathBuf,
    manifest: Manifest,
    classpath_override: Option<String>,
    start_class: OnceCell<String>,
}

impl ClassEntry {
    /// Creates a class entry for the application at `app_root`.
    pub fn new(app_root: &Path, manifest: Manifest, classpath_override: Option<String>) -> Self {
        Self {
            app_root: app_root.to_path_buf(),
            manifest,
            classpath_override,
            start_class: OnceCell::new(),
        }
    }

    /// The application manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

/// Reads `Start-Class`, falling back to `Main-Class`.
pub fn find_start_or_main_class(manifest: &Manifest) -> Result<&str, EntryError> {
    manifest
        .get("Start-Class")
        .or_else(|| manifest.get("Main-Class"))
        .ok_or(EntryError::NoStartOrMainClass)
}

impl EntryPoint for ClassEntry {
    fn name(&self) -> Result<&str, EntryError> {
        if let Some(name) = self.start_class.get() {
            return Ok(name);
        }
        let name = find_start_or_main_class(&self.manifest)?.to_string();
        Ok(self.start_class.get_or_init(|| name))
    }

    fn classpath(&self) -> String {
        if let Some(cp) = self.classpath_override.as_deref().filter(|cp| !cp.is_empty()) {
            return cp.to_string();
        }
        let root = self.app_root.display().to_string();
        join_path_list([Some(root.as_str()), self.manifest.get("Class-Path")].into_iter().flatten())
    }

    fn trailing_arguments(&self) -> Result<Vec<String>, EntryError> {
        Ok(vec![self.name()?.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_common::PATH_LIST_SEPARATOR;

    fn manifest(pairs: &[(&str, &str)]) -> Manifest {
        pairs.iter().copied().collect()
    }

    #[test]
    fn start_class_preferred() {
        let e = ClassEntry::new(
            Path::new("/workspace"),
            manifest(&[("Start-Class", "com.example.App"), ("Main-Class", "Launcher")]),
            None,
        );
        assert_eq!(e.name().unwrap(), "com.example.App");
    }

    #[test]
    fn main_class_fallback() {
        let e = ClassEntry::new(Path::new("/workspace"), manifest(&[("Main-Class", "Foo")]), None);
        assert_eq!(e.name().unwrap(), "Foo");
    }

    #[test]
    fn missing_class_errors() {
        let e = ClassEntry::new(Path::new("/workspace"), Manifest::default(), None);
        assert!(matches!(e.name().unwrap_err(), EntryError::NoStartOrMainClass));
        assert!(e.trailing_arguments().is_err());
    }

    #[test]
    fn name_is_memoized() {
        let e = ClassEntry::new(Path::new("/workspace"), manifest(&[("Main-Class", "Foo")]), None);
        let first = e.name().unwrap().as_ptr();
        let second = e.name().unwrap().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn classpath_override_wins() {
        let e = ClassEntry::new(
            Path::new("/workspace"),
            manifest(&[("Main-Class", "Foo"), ("Class-Path", "manifest-class-path")]),
            Some("some-classpath".to_string()),
        );
        assert_eq!(e.classpath(), "some-classpath");
    }

    #[test]
    fn classpath_joins_manifest_class_path() {
        let e = ClassEntry::new(
            Path::new("/workspace"),
            manifest(&[("Main-Class", "Foo"), ("Class-Path", "manifest-class-path")]),
            None,
        );
        assert_eq!(
            e.classpath(),
            format!("/workspace{PATH_LIST_SEPARATOR}manifest-class-path")
        );
    }

    #[test]
    fn classpath_defaults_to_root() {
        let e = ClassEntry::new(Path::new("/workspace"), manifest(&[("Main-Class", "Foo")]), None);
        assert_eq!(e.classpath(), "/workspace");
    }

    #[test]
    fn empty_override_ignored() {
        let e = ClassEntry::new(
            Path::new("/workspace"),
            manifest(&[("Main-Class", "Foo")]),
            Some(String::new()),
        );
        assert_eq!(e.classpath(), "/workspace");
    }

    #[test]
    fn trailing_arguments_is_class_name() {
        let e = ClassEntry::new(
            Path::new("/workspace"),
            manifest(&[("Start-Class", "com.example.App")]),
            None,
        );
        assert_eq!(e.trailing_arguments().unwrap(), vec!["com.example.App"]);
    }
}
