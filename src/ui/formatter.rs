//! Pure formatting functions for UI output.
//!
//! This module contains all display logic for the release run. Styling goes
//! through `console`, so color can be switched off globally in one place.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::Version;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

/// Display the commits that go into the release notes.
///
/// Shows up to 10 subjects; longer lists end with a count of the rest.
pub fn display_commit_analysis(subjects: &[String], since: Option<&str>) {
    let range = match since {
        Some(tag) => format!("since {}", tag),
        None => "(no previous tag, most recent commits)".to_string(),
    };
    println!("\n{}", style(format!("Commits {}", range)).bold());

    for (i, subject) in subjects.iter().take(10).enumerate() {
        println!("  {}. {}", i + 1, truncate(subject, 60));
    }

    if subjects.len() > 10 {
        println!("  ... and {} more commits", subjects.len() - 10);
    }
}

/// Display the version change (or the initial version).
pub fn display_proposed_version(previous_tag: Option<&str>, next: &Version) {
    match previous_tag {
        Some(old) => {
            println!("\n{}", style("Proposed Release:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(next.tag_name()).green());
        }
        None => {
            println!("\n{}", style("Initial Release:").bold());
            println!("  New tag: {}", style(next.tag_name()).green());
        }
    }
}

/// Print rendered release notes between rules.
pub fn display_notes_preview(notes: &str) {
    let rule = style("─".repeat(60)).dim();
    println!("\n{}", rule);
    println!("{}", notes.trim_end());
    println!("{}", rule);
}

/// Final line of a successful run
pub fn display_release_summary(tag: &str, release_url: &str) {
    println!(
        "\n{} Released {} {}\n",
        style("✓").green().bold(),
        style(tag).bold(),
        style(release_url).cyan()
    );
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}…", cut)
    } else {
        text.to_string()
    }
}
