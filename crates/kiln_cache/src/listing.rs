//! Recursive listing of an application directory.
//!
//! Every entry below the root is recorded with its relative path, kind,
//! permission bits and, for files and symlinks, a content digest. Entries are
//! sorted by path so that two scans of identical trees compare equal.

use std::fs;
use std::path::{Path, PathBuf};

use kiln_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// The type of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// A symbolic link. Its digest covers the link target, not the pointee.
    Symlink,
}

/// A single entry in a [`FileListing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Path relative to the listed root, `/`-separated.
    pub path: String,
    /// Entry type.
    pub kind: EntryKind,
    /// Permission bits.
    pub mode: u32,
    /// Content digest. Absent for directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<ContentHash>,
}

/// A sorted listing of a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileListing {
    entries: Vec<ListingEntry>,
}

impl FileListing {
    /// Lists every entry below `root`. The root itself is not included.
    pub fn scan(root: &Path) -> Result<Self, CacheError> {
        let mut entries = Vec::new();
        let mut pending = vec![(root.to_path_buf(), String::new())];

        while let Some((dir, prefix)) = pending.pop() {
            for (path, name) in read_sorted(&dir)? {
                let relative = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}/{name}")
                };
                let meta = fs::symlink_metadata(&path).map_err(|e| io_error(&path, e))?;
                let mode = permission_bits(&meta);

                let ty = meta.file_type();
                let (kind, digest) = if ty.is_symlink() {
                    let target = fs::read_link(&path).map_err(|e| io_error(&path, e))?;
                    let target = target.to_string_lossy();
                    (EntryKind::Symlink, Some(ContentHash::from_bytes(target.as_bytes())))
                } else if ty.is_dir() {
                    pending.push((path.clone(), relative.clone()));
                    (EntryKind::Directory, None)
                } else {
                    let file = fs::File::open(&path).map_err(|e| io_error(&path, e))?;
                    let digest = ContentHash::from_reader(file).map_err(|e| io_error(&path, e))?;
                    (EntryKind::File, Some(digest))
                };

                entries.push(ListingEntry {
                    path: relative,
                    kind,
                    mode,
                    digest,
                });
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(Self { entries })
    }

    /// Returns the listed entries in path order.
    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the listed tree was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Folds the listing into a single digest.
    pub fn digest(&self) -> ContentHash {
        let hashes: Vec<ContentHash> = self
            .entries
            .iter()
            .map(|e| {
                let digest = e.digest.map(|d| d.to_string()).unwrap_or_default();
                let line = format!("{}\0{:?}\0{:o}\0{}", e.path, e.kind, e.mode, digest);
                ContentHash::from_bytes(line.as_bytes())
            })
            .collect();
        ContentHash::combine(&hashes)
    }
}

fn read_sorted(dir: &Path) -> Result<Vec<(PathBuf, String)>, CacheError> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        children.push((entry.path(), name));
    }
    children.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(children)
}

#[cfg(unix)]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

fn io_error(path: &Path, source: std::io::Error) -> CacheError {
    CacheError::Io {
        path: path.to_path_buf(),
        source,
    }
}
