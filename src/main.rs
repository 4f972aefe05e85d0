use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use std::path::{Path, PathBuf};

use git_release::cli::{ReleaseContext, ReleaseRequest, ReleaseWorkflow};
use git_release::config;
use git_release::domain::ReleaseType;
use git_release::formula::CurlFetcher;
use git_release::git::Git2Repository;
use git_release::hosting::GhCli;
use git_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "release",
    version,
    about = "Tag, publish and announce a new release of the current project"
)]
struct Args {
    /// patch, minor, major, or an explicit version such as v1.4.0
    release_type: String,

    /// Use this text as the release notes instead of generated notes
    message: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Do not update the package formula")]
    skip_formula: bool,

    #[arg(short, long, action = ArgAction::Count, help = "More log output (-v, -vv)")]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<()> {
    let release_type: ReleaseType = args.release_type.parse()?;

    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    let repo = Git2Repository::open(&cwd)?;
    let project_root = repo.workdir().unwrap_or(cwd.as_path()).to_path_buf();

    let config = config::load_config(args.config.as_deref(), &project_root)?;
    ui::init(config.ui.color);

    let formula_repo = open_formula_repo(&config.formula_repo_dir(&project_root));
    let host = GhCli::new(&project_root);
    let fetcher = CurlFetcher::new(&project_root);

    let context = ReleaseContext {
        config,
        project_root,
    };
    let request = ReleaseRequest {
        release_type,
        message: args.message,
        dry_run: args.dry_run,
        skip_formula: args.skip_formula,
    };

    let outcome = ReleaseWorkflow::new(&context, &repo, &host, &fetcher)
        .with_formula_repo(formula_repo.as_ref())
        .run(&request)?;

    info!(
        "Finished {} with {} warning(s)",
        outcome.plan.tag,
        outcome.warnings.len()
    );
    Ok(())
}

/// The formula clone is optional; a missing directory is reported later as a warning
fn open_formula_repo(dir: &Path) -> Option<Git2Repository> {
    if !dir.is_dir() {
        return None;
    }
    match Git2Repository::open_exact(dir) {
        Ok(repo) => Some(repo),
        Err(e) => {
            info!("Ignoring formula directory: {}", e);
            None
        }
    }
}
