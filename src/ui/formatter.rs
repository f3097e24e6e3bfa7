//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! `format_*` functions build strings and are testable; `display_*` functions print them.

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::{PlannedRelease, WorkflowReport};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
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
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One line per workspace: name, version change and severity.
///
/// Unparsable versions are shown as `?`.
pub fn format_release_line(release: &PlannedRelease) -> String {
    let next = release.next_version.as_deref().unwrap_or("?");

    if release.severity.is_ignore() {
        format!("{} {} (unchanged)", release.name, release.current_version)
    } else {
        format!(
            "{} {} -> {} ({}, {} commit(s))",
            release.name,
            release.current_version,
            next,
            release.severity,
            release.commits.len()
        )
    }
}

/// Display the release plan with colored version changes.
pub fn display_release_plan(report: &WorkflowReport) {
    let since = report.since.as_deref().unwrap_or("the beginning of history");
    println!(
        "\n{}",
        style(format!("Analyzed {} commit(s) since {}", report.commit_count, since)).bold()
    );

    for release in &report.releases {
        let line = format_release_line(release);
        if release.severity.is_ignore() {
            println!("  {}", style(line).dim());
        } else {
            println!("  {}", style(line).green());
        }
    }

    for error in report.errors.iter().chain(&report.rewrite_errors) {
        display_error(&error.to_string());
    }
}

/// Display the release notes of every bumped workspace.
pub fn display_changelogs(report: &WorkflowReport) {
    for release in report.releases.iter().filter(|r| !r.severity.is_ignore()) {
        if let Some(changelog) = &release.changelog {
            println!("\n{}", changelog.trim_end());
        }
    }
}

/// Display the manifests that are about to be rewritten.
pub fn display_pending_writes(report: &WorkflowReport) {
    println!("\n{}", style("Manifests to update:").bold());
    for release in report.pending_writes() {
        println!("  - {}", release.path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use std::path::PathBuf;

    fn planned(name: &str, severity: Severity, next: Option<&str>) -> PlannedRelease {
        PlannedRelease {
            name: name.to_string(),
            path: PathBuf::from("/packages").join(name),
            current_version: "1.0.0".to_string(),
            next_version: next.map(str::to_string),
            severity,
            commits: vec!["abc".to_string()],
            changelog: None,
            manifest: None,
        }
    }

    #[test]
    fn test_format_release_line_bumped() {
        let line = format_release_line(&planned("a", Severity::Minor, Some("1.1.0")));
        assert_eq!(line, "a 1.0.0 -> 1.1.0 (minor, 1 commit(s))");
    }

    #[test]
    fn test_format_release_line_unchanged_and_unparsable() {
        let line = format_release_line(&planned("b", Severity::Ignore, Some("1.0.0")));
        assert_eq!(line, "b 1.0.0 (unchanged)");

        let line = format_release_line(&planned("c", Severity::Patch, None));
        assert!(line.contains("-> ?"));
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }
}
