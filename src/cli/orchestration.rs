//! Main workflow orchestration logic
//!
//! The release runs as a fixed sequence: preflight, resolve version, compose
//! notes, publish, update formula, verify. Each step finishes before the next
//! one starts, and the first fatal error aborts the run without rolling back
//! earlier steps (a tag pushed before a failed release creation stays).

use log::{debug, info};
use std::path::PathBuf;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::remote::{project_name, web_url};
use crate::domain::{
    classify, compose, extract_title, next_version, NotesFooter, ReleaseType, Version,
};
use crate::error::{ReleaseError, Result};
use crate::formula::{Fetcher, FormulaOutcome, FormulaUpdater};
use crate::git::Repository;
use crate::hosting::ReleaseHost;
use crate::ui;

/// Process-wide settings, fixed at startup
#[derive(Debug, Clone)]
pub struct ReleaseContext {
    pub config: Config,
    /// Root of the project working tree
    pub project_root: PathBuf,
}

/// What the caller asked for
///
/// Mirrors the CLI arguments so the workflow can be driven without clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRequest {
    pub release_type: ReleaseType,
    /// Used verbatim as the notes body instead of generated notes
    pub message: Option<String>,
    /// Resolve and print everything without side effects
    pub dry_run: bool,
    pub skip_formula: bool,
}

impl ReleaseRequest {
    pub fn new(release_type: ReleaseType) -> Self {
        ReleaseRequest {
            release_type,
            message: None,
            dry_run: false,
            skip_formula: false,
        }
    }
}

/// Everything decided before any side effect
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    pub previous_tag: Option<String>,
    pub current: Version,
    pub next: Version,
    pub tag: String,
    pub title: String,
    pub notes: String,
    pub commits: Vec<String>,
    /// Browser URL of the project repository
    pub repo_url: String,
    pub project_name: String,
}

/// Result of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    pub plan: ReleasePlan,
    /// None for dry runs
    pub release_url: Option<String>,
    pub formula: Option<FormulaOutcome>,
    pub warnings: Vec<BoundaryWarning>,
}

/// The release workflow over a set of collaborators
pub struct ReleaseWorkflow<'a, R: Repository, H: ReleaseHost, F: Fetcher> {
    context: &'a ReleaseContext,
    repo: &'a R,
    host: &'a H,
    fetcher: &'a F,
    /// Clone of the formula repository, if one exists locally
    formula_repo: Option<&'a R>,
}

impl<'a, R: Repository, H: ReleaseHost, F: Fetcher> ReleaseWorkflow<'a, R, H, F> {
    pub fn new(context: &'a ReleaseContext, repo: &'a R, host: &'a H, fetcher: &'a F) -> Self {
        ReleaseWorkflow {
            context,
            repo,
            host,
            fetcher,
            formula_repo: None,
        }
    }

    pub fn with_formula_repo(mut self, formula_repo: Option<&'a R>) -> Self {
        self.formula_repo = formula_repo;
        self
    }

    /// Run every step in order
    pub fn run(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome> {
        let mut warnings = Vec::new();

        let remote_url = self.preflight(request, &mut warnings)?;
        let plan = self.plan(request, &remote_url, &mut warnings)?;

        if request.dry_run {
            ui::display_status("Dry run: no tag, push, release or formula change was made");
            return Ok(ReleaseOutcome {
                plan,
                release_url: None,
                formula: None,
                warnings,
            });
        }

        let release_url = self.publish(&plan)?;

        let formula = self.update_formula(request, &plan)?;
        match &formula {
            Some(FormulaOutcome::Skipped(warning)) => self.warn(&mut warnings, warning.clone()),
            Some(FormulaOutcome::Updated {
                warnings: formula_warnings,
                formula: path,
                ..
            }) => {
                for warning in formula_warnings {
                    self.warn(&mut warnings, warning.clone());
                }
                ui::display_success(&format!("Updated formula {}", path.display()));
            }
            None => {}
        }

        self.verify(&plan.tag)?;
        ui::display_release_summary(&plan.tag, &release_url);

        Ok(ReleaseOutcome {
            plan,
            release_url: Some(release_url),
            formula,
            warnings,
        })
    }

    /// Checks that must pass before anything is changed
    ///
    /// # Returns
    /// * `Ok(remote_url)` - URL of the configured remote
    pub fn preflight(
        &self,
        request: &ReleaseRequest,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<String> {
        let remote = &self.context.config.remote;
        let remote_url = self.repo.remote_url(remote)?;
        debug!("Remote {} is {}", remote, remote_url);

        if !request.dry_run {
            self.host.ensure_ready()?;
        }

        let dirty = self.repo.dirty_paths()?;
        if !dirty.is_empty() {
            self.warn(warnings, BoundaryWarning::DirtyWorkingTree { paths: dirty });
        }

        Ok(remote_url)
    }

    /// Version from the latest reachable tag, 0.0.0 when there is none
    pub fn current_version(
        &self,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<(Option<String>, Version)> {
        let previous_tag = self.repo.latest_tag()?;
        let current = match previous_tag.as_deref() {
            Some(tag) => match Version::parse(tag) {
                Ok(version) => version,
                Err(e) => {
                    self.warn(
                        warnings,
                        BoundaryWarning::UnparsableTag {
                            tag: tag.to_string(),
                            reason: e.to_string(),
                        },
                    );
                    Version::default()
                }
            },
            None => Version::default(),
        };
        Ok((previous_tag, current))
    }

    /// Resolve versions and build the notes
    pub fn plan(
        &self,
        request: &ReleaseRequest,
        remote_url: &str,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<ReleasePlan> {
        let config = &self.context.config;

        let (previous_tag, current) = self.current_version(warnings)?;
        let next = next_version(&current, &request.release_type)?;
        if request.release_type.is_explicit() && previous_tag.is_some() && next <= current {
            self.warn(
                warnings,
                BoundaryWarning::ExplicitVersionNotNewer {
                    current: current.tag_name(),
                    requested: next.tag_name(),
                },
            );
        }
        ui::display_proposed_version(previous_tag.as_deref(), &next);

        let repo_url = web_url(remote_url);
        let project_name = config
            .formula
            .name
            .clone()
            .unwrap_or_else(|| project_name(remote_url));

        let (notes, commits) = match &request.message {
            Some(message) => {
                info!("Using custom release message");
                (message.clone(), Vec::new())
            }
            None => {
                let commits = self
                    .repo
                    .commit_subjects(previous_tag.as_deref(), config.commits.fallback_count)?;
                ui::display_commit_analysis(&commits, previous_tag.as_deref());
                if commits.is_empty() {
                    if let Some(tag) = &previous_tag {
                        self.warn(
                            warnings,
                            BoundaryWarning::NoNewCommits {
                                latest_tag: tag.clone(),
                            },
                        );
                    }
                }

                let footer = NotesFooter {
                    install_note: config.install_note(&project_name),
                    repo_url: repo_url.clone(),
                    previous_tag: previous_tag
                        .clone()
                        .unwrap_or_else(|| current.tag_name()),
                };
                let notes = compose(&next, &request.release_type, &classify(&commits), &footer);
                (notes.render(), commits)
            }
        };

        let title = extract_title(&notes);
        ui::display_notes_preview(&notes);

        Ok(ReleasePlan {
            previous_tag,
            current,
            next,
            tag: next.tag_name(),
            title,
            notes,
            commits,
            repo_url,
            project_name,
        })
    }

    /// Create and push the tag, then the hosted release
    ///
    /// # Returns
    /// * `Ok(url)` - URL of the hosted release
    pub fn publish(&self, plan: &ReleasePlan) -> Result<String> {
        let remote = &self.context.config.remote;

        ui::display_status(&format!("Creating tag: {}", plan.tag));
        self.repo
            .create_tag(&plan.tag, &format!("Release {}", plan.tag))?;
        ui::display_success(&format!("Created tag: {}", plan.tag));

        ui::display_status(&format!("Pushing tag: {} to {}", plan.tag, remote));
        self.repo.push_tag(remote, &plan.tag)?;
        ui::display_success(&format!("Pushed tag: {} to {}", plan.tag, remote));

        ui::display_status(&format!("Creating release: {}", plan.title));
        let url = self
            .host
            .create_release(&plan.tag, &plan.title, &plan.notes)?;
        ui::display_success(&format!("Created release: {}", url));

        Ok(url)
    }

    /// Optional formula mirror update; `None` when disabled
    pub fn update_formula(
        &self,
        request: &ReleaseRequest,
        plan: &ReleasePlan,
    ) -> Result<Option<FormulaOutcome>> {
        let config = &self.context.config;
        if request.skip_formula || !config.formula.enabled {
            info!("Formula update disabled");
            return Ok(None);
        }

        let repo_dir = config.formula_repo_dir(&self.context.project_root);
        let Some(formula_repo) = self.formula_repo else {
            return Ok(Some(FormulaOutcome::Skipped(
                BoundaryWarning::FormulaRepoMissing {
                    path: repo_dir.display().to_string(),
                },
            )));
        };

        ui::display_status(&format!("Updating formula for {}", plan.tag));
        let updater = FormulaUpdater::new(
            repo_dir,
            config.formula_file(&plan.project_name),
            plan.project_name.clone(),
            config.remote.clone(),
        );
        updater
            .update(formula_repo, self.fetcher, &plan.next, &plan.repo_url)
            .map(Some)
    }

    /// Confirm both the tag and the hosted release exist
    pub fn verify(&self, tag: &str) -> Result<()> {
        ui::display_status(&format!("Verifying release {}", tag));

        let tags = self.repo.list_tags()?;
        if !tags.iter().any(|t| t == tag) {
            return Err(ReleaseError::verification(format!(
                "tag {} not found in repository",
                tag
            )));
        }

        if !self.host.release_exists(tag)? {
            return Err(ReleaseError::verification(format!(
                "hosted release for {} not found (tag {} was left in place)",
                tag, tag
            )));
        }

        ui::display_success(&format!("Verified tag and release {}", tag));
        Ok(())
    }

    fn warn(&self, warnings: &mut Vec<BoundaryWarning>, warning: BoundaryWarning) {
        ui::display_boundary_warning(&warning);
        warnings.push(warning);
    }
}
