use git2::Repository;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn release() -> Command {
    Command::new(env!("CARGO_BIN_EXE_release"))
}

fn setup_tagged_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");
    {
        let mut config = repo.config().expect("Could not get config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    repo.remote("origin", "https://github.com/acme/tool.git")
        .unwrap();

    fs::write(temp_dir.path().join("README.md"), b"hello\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("README.md")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = repo.signature().unwrap();
    let oid = repo
        .commit(
            Some("HEAD"),
            &signature,
            &signature,
            "feat: add greeting",
            &tree,
            &[],
        )
        .unwrap();
    repo.tag_lightweight("v1.0.0", &repo.find_object(oid, None).unwrap(), false)
        .unwrap();

    temp_dir
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = release().output().expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
    assert!(stderr.contains("RELEASE_TYPE"));
}

#[test]
fn test_help_lists_options() {
    let output = release().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--skip-formula"));
}

#[test]
fn test_invalid_release_type_fails() {
    let dir = TempDir::new().unwrap();
    let output = release()
        .arg("huge")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid release type 'huge'"));
}

#[test]
fn test_dry_run_previews_without_tagging() {
    let dir = setup_tagged_repo();
    let output = release()
        .args(["minor", "--dry-run", "--skip-formula"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("v1.1.0"));
    assert!(stdout.contains("# New Features & Improvements v1.1.0"));
    assert!(stdout.contains("https://github.com/acme/tool/compare/v1.0.0...v1.1.0"));

    let repo = Repository::open(dir.path()).unwrap();
    assert!(repo.find_reference("refs/tags/v1.1.0").is_err());
}

#[test]
fn test_missing_config_file_is_error() {
    let dir = setup_tagged_repo();
    let output = release()
        .args(["patch", "--dry-run", "--config", "does-not-exist.toml"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration error"));
}
