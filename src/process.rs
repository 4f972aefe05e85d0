//! Blocking invocation of external command-line tools.

use crate::error::{ReleaseError, Result};
use log::debug;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

/// Runs an external program from a fixed working directory
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    working_dir: PathBuf,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        CommandRunner {
            program: program.into(),
            working_dir: working_dir.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check that the program can be started at all
    ///
    /// # Returns
    /// * `Err(MissingTool)` - If the program is not on PATH
    pub fn ensure_available(&self) -> Result<()> {
        match Command::new(&self.program)
            .arg("--version")
            .current_dir(&self.working_dir)
            .output()
        {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ReleaseError::MissingTool(self.program.clone()))
            }
            Err(e) => Err(ReleaseError::command(format!(
                "Cannot start {}: {}",
                self.program, e
            ))),
        }
    }

    /// Run the program and return its trimmed stdout
    ///
    /// Any non-zero exit code is an error carrying both output streams.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ReleaseError::MissingTool(self.program.clone())
                } else {
                    ReleaseError::command(format!("Failed to execute {}: {}", self.program, e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(ReleaseError::command(format!(
                "{} {} failed with exit code {}\nStdout: {}\nStderr: {}",
                self.program,
                args.first().unwrap_or(&""),
                output.status.code().unwrap_or(-1),
                stdout.trim(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_missing_program_is_missing_tool() {
        let runner = CommandRunner::new("definitely-not-a-real-tool-4821", ".");
        let err = runner.ensure_available().unwrap_err();
        assert!(matches!(err, ReleaseError::MissingTool(ref tool) if tool == "definitely-not-a-real-tool-4821"));

        let err = runner.run(&["anything"]).unwrap_err();
        assert!(matches!(err, ReleaseError::MissingTool(_)));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_run_captures_stdout() {
        let runner = CommandRunner::new("sh", ".");
        let out = runner.run(&["-c", "echo hello"]).unwrap();
        assert_eq!(out, "hello");
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_run_non_zero_exit_is_error() {
        let runner = CommandRunner::new("sh", ".");
        let err = runner.run(&["-c", "echo oops >&2; exit 3"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("exit code 3"), "got: {}", msg);
        assert!(msg.contains("oops"), "got: {}", msg);
    }
}
