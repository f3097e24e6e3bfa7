use crate::domain::{Commit, Severity};
use crate::error::{ReleaseError, Result};
use regex::Regex;

/// Maps a commit-message pattern to a release severity
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Regex,
    pub severity: Severity,
}

impl Rule {
    /// Compile a rule from a pattern string
    pub fn new(pattern: &str, severity: Severity) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            ReleaseError::configuration(format!("Invalid rule pattern '{}': {}", pattern, e))
        })?;

        Ok(Rule { pattern, severity })
    }

    /// True when the pattern matches the commit message or body
    pub fn matches(&self, commit: &Commit) -> bool {
        self.pattern.is_match(&commit.message) || self.pattern.is_match(&commit.body)
    }
}

/// Pattern table after semantic-release's commit analyser presets.
const DEFAULT_RULES: &[(&str, Severity)] = &[
    // Angular
    (r"^feat(\(.*\))?!?:", Severity::Minor),
    (r"^fix(\(.*\))?!?:", Severity::Patch),
    (r"^perf(\(.*\))?!?:", Severity::Patch),
    (r"^[a-z]+(\(.*\))?!:", Severity::Major),
    (r"BREAKING[ -]CHANGE", Severity::Major),
    // Atom
    (":racehorse:", Severity::Patch),
    (":bug:", Severity::Patch),
    (":penguin:", Severity::Patch),
    (":apple:", Severity::Patch),
    (":checkered_flag:", Severity::Patch),
    // Ember
    (r"\[BUGFIX", Severity::Patch),
    (r"\[FEATURE", Severity::Minor),
    (r"\[SECURITY", Severity::Patch),
    // ESLint
    ("^Breaking:", Severity::Major),
    ("^Fix:", Severity::Patch),
    ("^Update:", Severity::Minor),
    ("^New:", Severity::Minor),
    // Express
    ("^deps:", Severity::Patch),
    // JSHint
    (r"^\[\[FEAT\]\]", Severity::Minor),
    (r"^\[\[FIX\]\]", Severity::Patch),
];

/// Rules used when the configuration supplies none
pub fn default_rules() -> Vec<Rule> {
    DEFAULT_RULES
        .iter()
        .filter_map(|(pattern, severity)| Rule::new(pattern, severity.clone()).ok())
        .collect()
}
