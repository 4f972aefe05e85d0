use crate::error::{ReleaseError, Result};
use crate::hosting::ReleaseHost;
use crate::process::CommandRunner;
use log::debug;
use std::path::PathBuf;

/// GitHub CLI (`gh`) backed release host
///
/// `gh` infers the repository from the git remotes of its working directory,
/// so the runner is rooted at the project checkout.
pub struct GhCli {
    runner: CommandRunner,
}

impl GhCli {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        GhCli {
            runner: CommandRunner::new("gh", project_root),
        }
    }

    /// Use a different executable, e.g. a wrapper script
    pub fn with_program(program: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        GhCli {
            runner: CommandRunner::new(program, project_root),
        }
    }
}

impl ReleaseHost for GhCli {
    fn ensure_ready(&self) -> Result<()> {
        self.runner.ensure_available()?;
        self.runner.run(&["auth", "status"]).map_err(|e| {
            ReleaseError::hosting(format!(
                "{} is not authenticated (run `{} auth login`): {}",
                self.runner.program(),
                self.runner.program(),
                e
            ))
        })?;
        Ok(())
    }

    fn create_release(&self, tag: &str, title: &str, notes: &str) -> Result<String> {
        let stdout = self
            .runner
            .run(&["release", "create", tag, "--title", title, "--notes", notes])
            .map_err(|e| match e {
                ReleaseError::MissingTool(_) => e,
                other => ReleaseError::hosting(format!(
                    "Cannot create release for {}: {}",
                    tag, other
                )),
            })?;

        // gh prints the release URL as its last line
        let url = stdout
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or_default()
            .trim()
            .to_string();
        Ok(url)
    }

    fn release_exists(&self, tag: &str) -> Result<bool> {
        match self.runner.run(&["release", "view", tag, "--json", "tagName"]) {
            Ok(_) => Ok(true),
            Err(ReleaseError::MissingTool(tool)) => Err(ReleaseError::MissingTool(tool)),
            Err(e) => {
                debug!("Release lookup for {} failed: {}", tag, e);
                Ok(false)
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable stand-in for gh that runs the given shell body
    fn fake_gh(dir: &std::path::Path, body: &str) -> String {
        let path = dir.join("fake-gh");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[test]
    #[serial]
    fn test_create_release_returns_last_line() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_gh(
            dir.path(),
            "echo 'Creating release'; echo 'https://github.com/acme/tool/releases/tag/v1.0.0'",
        );
        let host = GhCli::with_program(program, dir.path());

        let url = host.create_release("v1.0.0", "Title", "Body").unwrap();
        assert_eq!(url, "https://github.com/acme/tool/releases/tag/v1.0.0");
    }

    #[test]
    #[serial]
    fn test_create_release_failure_is_hosting_error() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_gh(dir.path(), "echo 'HTTP 422' >&2; exit 1");
        let host = GhCli::with_program(program, dir.path());

        let err = host.create_release("v1.0.0", "Title", "Body").unwrap_err();
        assert!(matches!(err, ReleaseError::Hosting(_)));
        assert!(err.to_string().contains("HTTP 422"));
    }

    #[test]
    #[serial]
    fn test_release_exists_maps_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let found = GhCli::with_program(fake_gh(dir.path(), "exit 0"), dir.path());
        assert!(found.release_exists("v1.0.0").unwrap());

        let other = tempfile::tempdir().unwrap();
        let missing = GhCli::with_program(
            fake_gh(other.path(), "echo 'release not found' >&2; exit 1"),
            other.path(),
        );
        assert!(!missing.release_exists("v1.0.0").unwrap());
    }

    #[test]
    #[serial]
    fn test_ensure_ready_requires_auth() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_gh(
            dir.path(),
            "if [ \"$1\" = auth ]; then echo 'not logged in' >&2; exit 1; fi",
        );
        let host = GhCli::with_program(program, dir.path());

        let err = host.ensure_ready().unwrap_err();
        assert!(err.to_string().contains("not authenticated"));
    }

    #[test]
    #[serial]
    fn test_ensure_ready_missing_cli() {
        let host = GhCli::with_program("no-such-gh-binary-9313", ".");
        assert!(matches!(
            host.ensure_ready().unwrap_err(),
            ReleaseError::MissingTool(_)
        ));
    }
}
