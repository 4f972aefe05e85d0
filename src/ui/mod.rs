//! User interface module.
//!
//! The release command is non-interactive, so this module only configures
//! terminal styling and re-exports the formatter.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_commit_analysis, display_error, display_notes_preview,
    display_proposed_version, display_release_summary, display_status, display_success,
};

/// Apply the configured color preference to stdout and stderr.
///
/// Called once at startup; `console` still disables color on its own when
/// the stream is not a terminal.
pub fn init(color: bool) {
    if !color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}
