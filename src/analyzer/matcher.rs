use crate::domain::{Commit, PrereleasePolicy, Rule, Severity};

/// Derives a workspace's direct severity from its impacting commits
pub struct RuleMatcher<'r> {
    rules: &'r [Rule],
    policy: PrereleasePolicy,
}

impl<'r> RuleMatcher<'r> {
    /// Create a matcher over a rule list
    pub fn new(rules: &'r [Rule], policy: PrereleasePolicy) -> Self {
        RuleMatcher { rules, policy }
    }

    /// Highest severity among rules that match any of the commits.
    ///
    /// Every rule is considered; position in the list never short-circuits.
    pub fn direct_severity(&self, commits: &[&Commit]) -> Severity {
        self.rules
            .iter()
            .filter(|rule| commits.iter().any(|commit| rule.matches(commit)))
            .fold(Severity::Ignore, |acc, rule| {
                self.policy.max(acc, rule.severity.clone())
            })
    }
}
