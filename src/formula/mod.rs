//! Package-formula mirror update
//!
//! After a release, the formula in a separate tap repository is pointed at the
//! new source archive: the archive is downloaded, hashed, and the `url` and
//! `sha256` fields of the formula are rewritten, committed and pushed.
//!
//! Only the download step degrades to a warning. Once the formula file has
//! been rewritten, commit and push failures are fatal like any other step.

pub mod fetch;
pub mod rewrite;

pub use fetch::{sha256_file, CurlFetcher, Fetcher};
pub use rewrite::{rewrite_formula, FormulaRewrite};

use crate::boundary::BoundaryWarning;
use crate::domain::Version;
use crate::error::Result;
use crate::git::Repository;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

/// Source archive URL the hosting platform serves for a tag
pub fn archive_url(repo_url: &str, version: &Version) -> String {
    format!("{}/archive/refs/tags/{}.tar.gz", repo_url, version.tag_name())
}

/// Result of one formula update attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaOutcome {
    Updated {
        formula: PathBuf,
        url: String,
        sha256: String,
        warnings: Vec<BoundaryWarning>,
    },
    Skipped(BoundaryWarning),
}

/// Where the formula lives and how to publish changes to it
#[derive(Debug, Clone)]
pub struct FormulaUpdater {
    repo_dir: PathBuf,
    /// Formula path relative to `repo_dir`
    formula_file: PathBuf,
    name: String,
    remote: String,
}

impl FormulaUpdater {
    pub fn new(
        repo_dir: impl Into<PathBuf>,
        formula_file: impl Into<PathBuf>,
        name: impl Into<String>,
        remote: impl Into<String>,
    ) -> Self {
        FormulaUpdater {
            repo_dir: repo_dir.into(),
            formula_file: formula_file.into(),
            name: name.into(),
            remote: remote.into(),
        }
    }

    pub fn formula_path(&self) -> PathBuf {
        self.repo_dir.join(&self.formula_file)
    }

    /// Rewrite, commit and push the formula for `version`
    ///
    /// `repo` is the formula repository clone, not the project repository.
    pub fn update<R, F>(
        &self,
        repo: &R,
        fetcher: &F,
        version: &Version,
        repo_url: &str,
    ) -> Result<FormulaOutcome>
    where
        R: Repository + ?Sized,
        F: Fetcher + ?Sized,
    {
        let formula_path = self.formula_path();
        if !formula_path.is_file() {
            return Ok(FormulaOutcome::Skipped(
                BoundaryWarning::FormulaFileMissing {
                    path: formula_path.display().to_string(),
                },
            ));
        }

        let url = archive_url(repo_url, version);
        let sha256 = match download_digest(fetcher, &url) {
            Ok(sha256) => sha256,
            Err(reason) => {
                return Ok(FormulaOutcome::Skipped(
                    BoundaryWarning::ArtifactDownloadFailed { url, reason },
                ))
            }
        };
        debug!("{} sha256 {}", url, sha256);

        let original = fs::read_to_string(&formula_path)?;
        let rewrite = rewrite_formula(&original, &url, &sha256);

        let mut warnings = Vec::new();
        let fields = [
            ("url", rewrite.url_replaced),
            ("sha256", rewrite.checksum_replaced),
        ];
        for (field, replaced) in fields {
            if !replaced {
                warnings.push(BoundaryWarning::FormulaFieldNotRewritten {
                    field: field.to_string(),
                    path: formula_path.display().to_string(),
                });
            }
        }

        if rewrite.content != original {
            fs::write(&formula_path, &rewrite.content)?;
            let message = format!("Update {} to {}", self.name, version.tag_name());
            repo.commit_file(&self.formula_file, &message)?;
            repo.push_head(&self.remote)?;
            info!("Pushed formula update: {}", message);
        } else {
            info!("Formula already points at {}, nothing to commit", url);
        }

        Ok(FormulaOutcome::Updated {
            formula: formula_path,
            url,
            sha256,
            warnings,
        })
    }
}

/// Download into a scratch directory and hash; errors become warning text
fn download_digest<F: Fetcher + ?Sized>(
    fetcher: &F,
    url: &str,
) -> std::result::Result<String, String> {
    let scratch = tempfile::tempdir().map_err(|e| e.to_string())?;
    let archive = scratch.path().join("source.tar.gz");
    fetcher.download(url, &archive).map_err(|e| e.to_string())?;
    fetcher.digest(&archive).map_err(|e| e.to_string())
}
