use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Represents the complete configuration for git-release.
///
/// Every field has a default, so an absent or empty file is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub commits: CommitsConfig,

    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub formula: FormulaConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            commits: CommitsConfig::default(),
            notes: NotesConfig::default(),
            formula: FormulaConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_fallback_count() -> usize {
    5
}

fn default_install_note() -> String {
    "Install or upgrade with Homebrew: `brew install {name}` / `brew upgrade {name}`".to_string()
}

fn default_formula_repo_dir() -> PathBuf {
    PathBuf::from("../homebrew-tap")
}

fn default_formula_file() -> String {
    "Formula/{name}.rb".to_string()
}

fn default_true() -> bool {
    true
}

/// Commit range settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitsConfig {
    /// Number of recent commits summarized when no previous tag exists
    #[serde(default = "default_fallback_count")]
    pub fallback_count: usize,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        CommitsConfig {
            fallback_count: default_fallback_count(),
        }
    }
}

/// Release notes footer settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotesConfig {
    /// Install guidance; `{name}` is replaced by the project name
    #[serde(default = "default_install_note")]
    pub install_note: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            install_note: default_install_note(),
        }
    }
}

/// Location of the package-formula mirror.
///
/// Relative `repo_dir` values are resolved against the project root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FormulaConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_formula_repo_dir")]
    pub repo_dir: PathBuf,

    /// Formula path inside `repo_dir`; `{name}` is replaced by the project name
    #[serde(default = "default_formula_file")]
    pub file: String,

    /// Project name; derived from the remote URL when unset
    #[serde(default)]
    pub name: Option<String>,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        FormulaConfig {
            enabled: true,
            repo_dir: default_formula_repo_dir(),
            file: default_formula_file(),
            name: None,
        }
    }
}

/// Terminal output settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { color: true }
    }
}

impl Config {
    /// Install note with the project name filled in
    pub fn install_note(&self, name: &str) -> String {
        self.notes.install_note.replace("{name}", name)
    }

    /// Formula file path relative to the formula repository
    pub fn formula_file(&self, name: &str) -> PathBuf {
        PathBuf::from(self.formula.file.replace("{name}", name))
    }

    /// Formula repository directory, resolved against `project_root`
    pub fn formula_repo_dir(&self, project_root: &Path) -> PathBuf {
        if self.formula.repo_dir.is_absolute() {
            self.formula.repo_dir.clone()
        } else {
            project_root.join(&self.formula.repo_dir)
        }
    }
}

/// Parse configuration from TOML text.
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| ReleaseError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in `project_root`
/// 3. `.release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or an explicit
///   path does not exist
pub fn load_config(config_path: Option<&Path>, project_root: &Path) -> Result<Config> {
    let path = if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else {
        let local = project_root.join(CONFIG_FILE_NAME);
        if local.exists() {
            Some(local)
        } else {
            dirs::config_dir()
                .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
                .filter(|path| path.exists())
        }
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    let text = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&text).map_err(|e| match e {
        ReleaseError::Config(msg) => ReleaseError::config(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}
