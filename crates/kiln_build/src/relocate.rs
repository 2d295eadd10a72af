//! Moving compiled output into the application directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::BuildError;

/// Replaces the contents of `app_root` with the files in `layer_dir`.
///
/// Every entry directly under `app_root` is removed first. Then each
/// non-directory entry of `layer_dir` is copied across with its permission
/// bits. Directories in `layer_dir` are skipped. Returns the copied paths in
/// name order.
pub fn relocate(layer_dir: &Path, app_root: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let outputs = sorted_children(layer_dir)?;

    for child in sorted_children(app_root)? {
        let meta = fs::symlink_metadata(&child).map_err(|e| relocate_error(&child, e))?;
        let removed = if meta.is_dir() {
            fs::remove_dir_all(&child)
        } else {
            fs::remove_file(&child)
        };
        removed.map_err(|e| relocate_error(&child, e))?;
    }

    let mut copied = Vec::new();
    for src in outputs {
        let meta = fs::metadata(&src).map_err(|e| relocate_error(&src, e))?;
        if meta.is_dir() {
            warn!("Skipping directory {} in compiled output", src.display());
            continue;
        }
        let Some(name) = src.file_name() else {
            continue;
        };
        let dst = app_root.join(name);
        fs::copy(&src, &dst).map_err(|e| relocate_error(&dst, e))?;
        debug!("copied {} -> {}", src.display(), dst.display());
        copied.push(dst);
    }
    Ok(copied)
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let entries = fs::read_dir(dir).map_err(|e| relocate_error(dir, e))?;
    let mut children = Vec::new();
    for entry in entries {
        children.push(entry.map_err(|e| relocate_error(dir, e))?.path());
    }
    children.sort();
    Ok(children)
}

fn relocate_error(path: &Path, source: std::io::Error) -> BuildError {
    BuildError::Relocate {
        path: path.to_path_buf(),
        source,
    }
}
