//! Release note rendering.
//!
//! Produces a Markdown section per release: a heading with the package name,
//! next version and severity label, followed by one entry per impacting
//! commit.

use crate::domain::{Commit, Release};
use std::fmt::Write;

/// Render the release note for one release.
///
/// `next_version` is the version the release will be published as; callers
/// compute it with [`crate::version::next_version`].
pub fn summarize(release: &Release, next_version: &str) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "## {} {} ({})\n",
        release.name(),
        next_version,
        release.severity
    );

    if release.commits.is_empty() {
        if release.severity.is_ignore() {
            output.push_str("No changes.\n");
        } else {
            output.push_str("Updated to follow changes in dependencies.\n");
        }
        return output;
    }

    for commit in &release.commits {
        output.push_str(&format_commit(commit));
    }

    output
}

/// Render release notes for several releases, separated by blank lines
pub fn summarize_all<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a Release<'a>, &'a str)>,
{
    entries
        .into_iter()
        .map(|(release, version)| summarize(release, version))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single commit as a Markdown list item.
fn format_commit(commit: &Commit) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "- {} ({})", commit.title(), commit.short_hash());

    for line in commit
        .body
        .lines()
        .skip_while(|line| line.trim_end() == commit.title())
        .skip_while(|line| line.trim().is_empty())
    {
        if line.trim().is_empty() {
            output.push('\n');
        } else {
            let _ = writeln!(output, "  {}", line);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Severity, Workspace};

    #[test]
    fn test_summarize_lists_each_commit() {
        let workspace = Workspace::new("/packages/package-c", "package-c", "1.0.0");
        let commits = vec![
            Commit::new("0123456789abcdef", "feat: Minor change package-c"),
            Commit::new("fedcba9876543210", "fix: handle empty input"),
        ];
        let release = Release::new(&workspace, Severity::Minor, commits.iter().collect());

        let notes = summarize(&release, "1.1.0");

        assert_eq!(
            notes,
            "## package-c 1.1.0 (minor)\n\n\
             - feat: Minor change package-c (0123456)\n\
             - fix: handle empty input (fedcba9)\n"
        );
    }

    #[test]
    fn test_summarize_indents_body_lines() {
        let workspace = Workspace::new("/packages/a", "a", "1.0.0");
        let commit = Commit::new(
            "abcdef1234",
            "fix: rename field\n\nBREAKING CHANGE: field changed from X to Y",
        );
        let release = Release::new(&workspace, Severity::Major, vec![&commit]);

        let notes = summarize(&release, "2.0.0");

        assert!(notes.contains("- fix: rename field (abcdef1)\n"));
        assert!(notes.contains("  BREAKING CHANGE: field changed from X to Y\n"));
    }

    #[test]
    fn test_summarize_inherited_release() {
        let workspace = Workspace::new("/packages/b", "b", "1.0.0");
        let release = Release::new(&workspace, Severity::Patch, Vec::new());

        let notes = summarize(&release, "1.0.1");
        assert!(notes.starts_with("## b 1.0.1 (patch)"));
        assert!(notes.contains("dependencies"));
    }

    #[test]
    fn test_summarize_ignored_release() {
        let workspace = Workspace::new("/packages/d", "d", "1.0.0");
        let release = Release::new(&workspace, Severity::Ignore, Vec::new());
        assert!(summarize(&release, "1.0.0").contains("No changes."));
    }

    #[test]
    fn test_summarize_all_joins_sections() {
        let a = Workspace::new("/packages/a", "a", "1.0.0");
        let b = Workspace::new("/packages/b", "b", "1.0.0");
        let ra = Release::new(&a, Severity::Patch, Vec::new());
        let rb = Release::new(&b, Severity::Ignore, Vec::new());

        let notes = summarize_all([(&ra, "1.0.1"), (&rb, "1.0.0")]);
        assert!(notes.contains("## a 1.0.1 (patch)"));
        assert!(notes.contains("\n## b 1.0.0 (ignore)"));
    }
}
