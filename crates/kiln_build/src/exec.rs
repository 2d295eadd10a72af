//! Running external tools.

use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, info};

/// A single external process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Execution {
    /// Program name, looked up on `PATH`.
    pub command: String,
    /// Arguments, passed verbatim.
    pub args: Vec<String>,
    /// Working directory. Inherited when `None`.
    pub dir: Option<PathBuf>,
    /// Variables added to the inherited environment.
    pub env: Vec<(String, String)>,
    /// Log output lines at info level as they arrive instead of at debug.
    pub log_output: bool,
}

impl Execution {
    /// Creates an invocation of `command` with `args`.
    pub fn new<I, S>(command: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            dir: None,
            env: Vec::new(),
            log_output: false,
        }
    }

    /// Runs the process in `dir`.
    #[must_use]
    pub fn with_dir(mut self, dir: &Path) -> Self {
        self.dir = Some(dir.to_path_buf());
        self
    }

    /// Adds `env` to the process environment.
    #[must_use]
    pub fn with_env(mut self, env: &[(String, String)]) -> Self {
        self.env.extend(env.iter().cloned());
        self
    }

    /// Logs the process output at info level while it runs.
    #[must_use]
    pub fn with_output_logged(mut self) -> Self {
        self.log_output = true;
        self
    }

    /// The command line as a single string, for logs.
    pub fn display(&self) -> String {
        let mut line = self.command.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Errors from running an external tool.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The program is not installed.
    #[error("{command} not found on PATH")]
    NotFound {
        /// The program name.
        command: String,
    },

    /// The program could not be started.
    #[error("failed to launch {command}: {source}")]
    Launch {
        /// The program name.
        command: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The program's output could not be read or its exit awaited.
    #[error("failed to read output of {command}: {source}")]
    Output {
        /// The program name.
        command: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The program ran and reported failure.
    #[error("{command} {}{}", describe_exit(.code), describe_stderr(.stderr))]
    Failed {
        /// The program name.
        command: String,
        /// Exit code, `None` if killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{stderr}")
    }
}

/// Runs executions to completion, one at a time.
pub trait Executor {
    /// Runs `execution` and returns its standard output.
    ///
    /// A non-zero exit is an error.
    fn execute(&self, execution: &Execution) -> Result<Vec<u8>, ExecError>;
}

/// Runs executions as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandExecutor;

impl Executor for CommandExecutor {
    fn execute(&self, execution: &Execution) -> Result<Vec<u8>, ExecError> {
        debug!("running {}", execution.display());

        let mut cmd = Command::new(&execution.command);
        cmd.args(&execution.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &execution.dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &execution.env {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ExecError::NotFound {
                    command: execution.command.clone(),
                }
            } else {
                ExecError::Launch {
                    command: execution.command.clone(),
                    source: e,
                }
            }
        })?;

        let output_error = |source: io::Error| ExecError::Output {
            command: execution.command.clone(),
            source,
        };

        // A full pipe blocks the child, so both are drained at once.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout, stderr) = thread::scope(|scope| {
            let errors = scope.spawn(|| forward(stderr, execution));
            let output = forward(stdout, execution);
            let errors = errors
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stderr reader panicked")));
            (output, errors)
        });
        let stdout = stdout.map_err(output_error)?;
        let stderr = stderr.map_err(output_error)?;

        let status = child.wait().map_err(output_error)?;
        if !status.success() {
            return Err(ExecError::Failed {
                command: execution.command.clone(),
                code: status.code(),
                stderr: String::from_utf8_lossy(&stderr).into_owned(),
            });
        }
        Ok(stdout)
    }
}

/// Copies `stream` line by line into the log and returns everything read.
fn forward<R: Read>(stream: Option<R>, execution: &Execution) -> io::Result<Vec<u8>> {
    let mut captured = Vec::new();
    let Some(stream) = stream else {
        return Ok(captured);
    };

    let mut reader = BufReader::new(stream);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        captured.extend_from_slice(&line);

        let text = String::from_utf8_lossy(&line);
        let text = text.trim_end();
        if execution.log_output {
            info!("{text}");
        } else {
            debug!("{}: {text}", execution.command);
        }
    }
    Ok(captured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let exec = Execution::new("upx", ["-q", "-9", "/layer/app"])
            .with_dir(Path::new("/layer"))
            .with_env(&[("A".to_string(), "1".to_string())]);
        assert_eq!(exec.command, "upx");
        assert_eq!(exec.args, vec!["-q", "-9", "/layer/app"]);
        assert_eq!(exec.dir.as_deref(), Some(Path::new("/layer")));
        assert_eq!(exec.env, vec![("A".to_string(), "1".to_string())]);
        assert_eq!(exec.display(), "upx -q -9 /layer/app");
        assert!(!exec.log_output);
        assert!(exec.with_output_logged().log_output);
    }

    #[test]
    fn failed_display() {
        let err = ExecError::Failed {
            command: "native-image".to_string(),
            code: Some(2),
            stderr: "Error: class not found\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "native-image exited with status 2\nError: class not found"
        );
    }

    #[test]
    fn signal_display() {
        let err = ExecError::Failed {
            command: "upx".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "upx was terminated by a signal");
    }

    #[test]
    fn missing_program_is_not_found() {
        let exec = Execution::new("kiln-test-no-such-program", Vec::<String>::new());
        let err = CommandExecutor.execute(&exec).unwrap_err();
        assert!(matches!(err, ExecError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout() {
        let exec = Execution::new("sh", ["-c", "echo hello"]);
        assert_eq!(CommandExecutor.execute(&exec).unwrap(), b"hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_directory_with_env() {
        let dir = tempfile::tempdir().unwrap();
        let exec = Execution::new("sh", ["-c", "printf %s \"$KILN_TEST\" > out.txt"])
            .with_dir(dir.path())
            .with_env(&[("KILN_TEST".to_string(), "value".to_string())]);
        CommandExecutor.execute(&exec).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "value"
        );
    }

    #[cfg(unix)]
    #[test]
    fn logged_output_is_still_captured() {
        let exec = Execution::new("sh", ["-c", "echo one; echo warn >&2; echo two"])
            .with_output_logged();
        assert_eq!(CommandExecutor.execute(&exec).unwrap(), b"one\ntwo\n");
    }

    #[cfg(unix)]
    #[test]
    fn large_stderr_does_not_block() {
        let script = "i=0; while [ $i -lt 20000 ]; do echo line $i >&2; i=$((i+1)); done; echo done";
        let exec = Execution::new("sh", ["-c", script]);
        assert_eq!(CommandExecutor.execute(&exec).unwrap(), b"done\n");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_fails() {
        let exec = Execution::new("sh", ["-c", "echo oops >&2; exit 3"]);
        match CommandExecutor.execute(&exec).unwrap_err() {
            ExecError::Failed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr.trim(), "oops");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
