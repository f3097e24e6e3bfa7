//! Analysis engine for determining release severities from commits
//!
//! Binder, rule matcher and propagator composed into one pure pass:
//! commits are bound to workspaces by path, each workspace gets a direct
//! severity from the rules, and severities then flow from dependencies to
//! their dependents.

pub mod binder;
pub mod matcher;
pub mod propagation;

pub use binder::{bind_commits, impacting_commits};
pub use matcher::RuleMatcher;
pub use propagation::Propagator;

use crate::domain::{Commit, PrereleasePolicy, Release, Rule, Workspace};
use tracing::debug;

/// Analyzes commits against a rule list
pub struct Analyzer {
    rules: Vec<Rule>,
    policy: PrereleasePolicy,
}

impl Analyzer {
    /// Create an analyzer using the default pre-release policy
    pub fn new(rules: Vec<Rule>) -> Self {
        Analyzer {
            rules,
            policy: PrereleasePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PrereleasePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Releases carrying direct severities only
    pub fn preliminary_releases<'a>(
        &self,
        workspaces: &'a [Workspace],
        commits: &'a [Commit],
    ) -> Vec<Release<'a>> {
        let matcher = RuleMatcher::new(&self.rules, self.policy);

        bind_commits(workspaces, commits)
            .into_iter()
            .map(|(workspace, impacting)| {
                let severity = matcher.direct_severity(&impacting);
                debug!(
                    workspace = %workspace.name,
                    commits = impacting.len(),
                    severity = %severity,
                    "direct severity"
                );
                Release::new(workspace, severity, impacting)
            })
            .collect()
    }

    /// One release per workspace, carrying its effective severity
    pub fn analyze<'a>(&self, workspaces: &'a [Workspace], commits: &'a [Commit]) -> Vec<Release<'a>> {
        let preliminary = self.preliminary_releases(workspaces, commits);
        let releases = Propagator::new(&preliminary, self.policy).propagate();

        for (before, after) in preliminary.iter().zip(&releases) {
            if before.severity != after.severity {
                debug!(
                    workspace = %after.name(),
                    direct = %before.severity,
                    effective = %after.severity,
                    "severity raised by dependencies"
                );
            }
        }

        releases
    }
}

/// Analyze with the default pre-release policy
pub fn analyze<'a>(workspaces: &'a [Workspace], commits: &'a [Commit], rules: &[Rule]) -> Vec<Release<'a>> {
    Analyzer::new(rules.to_vec()).analyze(workspaces, commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyKind, Severity};

    fn rules() -> Vec<Rule> {
        vec![
            Rule::new("fix:", Severity::Patch).unwrap(),
            Rule::new("feat:", Severity::Minor).unwrap(),
            Rule::new("perf:", Severity::Major).unwrap(),
        ]
    }

    fn package(name: &str, deps: &[&str]) -> Workspace {
        deps.iter().fold(
            Workspace::new(format!("/packages/{}", name), name, "1.0.0")
                .with_dependency("irrelevant", "1.0.0", DependencyKind::Runtime)
                .with_dependency("irrelevant-dev", "1.0.0", DependencyKind::Dev),
            |w, dep| w.with_dependency(*dep, "1.0.0", DependencyKind::Runtime),
        )
    }

    #[test]
    fn test_analyze_real_monorepo_scenario() {
        let workspaces = vec![
            package("package-a", &["package-b", "package-c"]),
            package("package-b", &["package-e"]),
            package("package-c", &["package-d"]),
            package("package-d", &[]),
            package("package-e", &["package-f"]),
            package("package-f", &["package-d", "package-g"]),
            package("package-g", &["package-b", "package-d"]),
        ];
        let commits = vec![
            Commit::new("1", "fix: Fixes package-a and package-e issue").with_files([
                "/packages/package-a/utils.ts",
                "/packages/package-a/package.json",
                "/packages/package-e/utils.ts",
            ]),
            Commit::new("2", "feat: Minor change package-c")
                .with_files(["/packages/package-c/package.json"]),
            Commit::new("3", "perf: Breaking change package-a")
                .with_files(["/packages/package-a/index.ts"]),
            Commit::new("4", "ignored").with_files(["/packages/package-a/index.ts"]),
        ];

        let releases = analyze(&workspaces, &commits, &rules());

        let summary: Vec<(&str, Severity, usize)> = releases
            .iter()
            .map(|r| (r.name(), r.severity.clone(), r.commits.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("package-a", Severity::Major, 3),
                ("package-b", Severity::Patch, 0),
                ("package-c", Severity::Minor, 1),
                ("package-d", Severity::Ignore, 0),
                ("package-e", Severity::Patch, 1),
                ("package-f", Severity::Patch, 0),
                ("package-g", Severity::Patch, 0),
            ]
        );
    }

    #[test]
    fn test_inherited_severity_adds_no_commits() {
        let workspaces = vec![package("a", &[]), package("b", &["a"])];
        let commits = vec![Commit::new("1", "feat: x").with_files(["/packages/a/x.ts"])];

        let releases = analyze(&workspaces, &commits, &rules());
        assert_eq!(releases[1].severity, Severity::Minor);
        assert!(releases[1].commits.is_empty());
    }

    #[test]
    fn test_effective_is_never_below_direct() {
        let workspaces = vec![package("a", &["b"]), package("b", &["a"]), package("c", &[])];
        let commits = vec![
            Commit::new("1", "perf: x").with_files(["/packages/a/x.ts"]),
            Commit::new("2", "fix: y").with_files(["/packages/b/y.ts", "/packages/c/y.ts"]),
        ];

        let analyzer = Analyzer::new(rules());
        let direct = analyzer.preliminary_releases(&workspaces, &commits);
        let effective = analyzer.analyze(&workspaces, &commits);

        for (d, e) in direct.iter().zip(&effective) {
            assert!(e.severity >= d.severity, "{} dropped below direct", e.name());
        }
    }

    #[test]
    fn test_policy_changes_merge_of_prerelease_rules() {
        let rules = vec![
            Rule::new("fix:", Severity::Patch).unwrap(),
            Rule::new("next:", Severity::Prepatch("next".to_string())).unwrap(),
        ];
        let workspaces = vec![package("a", &[])];
        let commits = vec![Commit::new("1", "fix: x\nnext: y").with_files(["/packages/a/x.ts"])];

        let below = Analyzer::new(rules.clone()).analyze(&workspaces, &commits);
        assert_eq!(below[0].severity, Severity::Patch);

        let same = Analyzer::new(rules)
            .with_policy(PrereleasePolicy::SameTier)
            .analyze(&workspaces, &commits);
        assert_eq!(same[0].severity, Severity::Prepatch("next".to_string()));
    }
}
