//! Post-compile compression of the produced binary.

use std::path::{Path, PathBuf};

use kiln_config::CompressionMethod;
use tracing::info;

use crate::error::BuildError;
use crate::exec::{Execution, Executor};

/// Compresses `binary` with `method`, running the tool inside `dir`.
///
/// `upx` rewrites the binary in place. `gzexe` leaves `<binary>~` behind,
/// which is removed afterwards; failing to remove it is an error.
pub fn compress(
    executor: &dyn Executor,
    method: CompressionMethod,
    binary: &Path,
    dir: &Path,
) -> Result<(), BuildError> {
    let Some(tool) = method.tool() else {
        return Ok(());
    };

    let binary_arg = binary.display().to_string();
    let args = match method {
        CompressionMethod::InPlace => vec!["-q".to_string(), "-9".to_string(), binary_arg],
        _ => vec![binary_arg],
    };

    info!("Executing {tool} to compress native image");
    executor
        .execute(&Execution::new(tool, args).with_dir(dir).with_output_logged())
        .map_err(|source| BuildError::Compress { method, source })?;

    if method == CompressionMethod::WithBackup {
        let backup = backup_path(binary);
        std::fs::remove_file(&backup)
            .map_err(|source| BuildError::RemoveBackup { path: backup, source })?;
    }
    Ok(())
}

fn backup_path(binary: &Path) -> PathBuf {
    let mut name = binary.as_os_str().to_os_string();
    name.push("~");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::ExecError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<Execution>>,
        backup: bool,
        fail: bool,
    }

    impl Executor for Recorder {
        fn execute(&self, execution: &Execution) -> Result<Vec<u8>, ExecError> {
            self.calls.borrow_mut().push(execution.clone());
            if self.fail {
                return Err(ExecError::Failed {
                    command: execution.command.clone(),
                    code: Some(1),
                    stderr: String::new(),
                });
            }
            if self.backup {
                let target = execution.args.last().cloned().unwrap_or_default();
                std::fs::write(format!("{target}~"), b"original").unwrap();
            }
            Ok(Vec::new())
        }
    }

    #[test]
    fn none_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let exec = Recorder::default();
        compress(&exec, CompressionMethod::None, &dir.path().join("app"), dir.path()).unwrap();
        assert!(exec.calls.borrow().is_empty());
    }

    #[test]
    fn upx_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("app");
        let exec = Recorder::default();
        compress(&exec, CompressionMethod::InPlace, &binary, dir.path()).unwrap();

        let calls = exec.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].command, "upx");
        assert_eq!(
            calls[0].args,
            vec!["-q".to_string(), "-9".to_string(), binary.display().to_string()]
        );
        assert_eq!(calls[0].dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn gzexe_removes_backup() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("app");
        std::fs::write(&binary, b"compressed").unwrap();
        let exec = Recorder {
            backup: true,
            ..Default::default()
        };
        compress(&exec, CompressionMethod::WithBackup, &binary, dir.path()).unwrap();

        let calls = exec.calls.borrow();
        assert_eq!(calls[0].command, "gzexe");
        assert_eq!(calls[0].args, vec![binary.display().to_string()]);
        assert!(binary.exists());
        assert!(!dir.path().join("app~").exists());
    }

    #[test]
    fn gzexe_missing_backup_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("app");
        let exec = Recorder::default();
        let err = compress(&exec, CompressionMethod::WithBackup, &binary, dir.path()).unwrap_err();
        match err {
            BuildError::RemoveBackup { path, .. } => assert_eq!(path, dir.path().join("app~")),
            other => panic!("expected RemoveBackup, got {other:?}"),
        }
    }

    #[test]
    fn tool_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let exec = Recorder {
            fail: true,
            ..Default::default()
        };
        let err = compress(&exec, CompressionMethod::InPlace, &dir.path().join("app"), dir.path())
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Compress {
                method: CompressionMethod::InPlace,
                ..
            }
        ));
    }
}
