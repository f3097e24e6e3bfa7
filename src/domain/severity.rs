//! Release severities and the order used to merge them.
//!
//! A severity is the release impact assigned to a workspace. Pre-release kinds
//! carry a tag (e.g. `alpha`) that only the version calculator reads; for
//! merging they fold into the same total order as the stable kinds.

use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Release impact level for a workspace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "tag", rename_all = "lowercase")]
pub enum Severity {
    /// No release
    Ignore,
    /// Increment the pre-release counter (or start one off a patch bump)
    Prerelease(String),
    Prepatch(String),
    Patch,
    Preminor(String),
    Minor,
    Premajor(String),
    Major,
}

impl Severity {
    /// Build a severity from its kind name and an optional pre-release tag.
    ///
    /// Pre-release kinds require a tag; stable kinds reject one.
    pub fn from_kind(kind: &str, tag: Option<&str>) -> Result<Self> {
        let require_tag = || {
            tag.map(str::to_string).ok_or_else(|| {
                ReleaseError::configuration(format!("Release kind '{}' requires a tag", kind))
            })
        };
        let reject_tag = |severity: Severity| match tag {
            Some(t) => Err(ReleaseError::configuration(format!(
                "Release kind '{}' does not take a tag (got '{}')",
                kind, t
            ))),
            None => Ok(severity),
        };

        match kind.to_lowercase().as_str() {
            "ignore" => reject_tag(Severity::Ignore),
            "patch" => reject_tag(Severity::Patch),
            "minor" => reject_tag(Severity::Minor),
            "major" => reject_tag(Severity::Major),
            "prerelease" => Ok(Severity::Prerelease(require_tag()?)),
            "prepatch" => Ok(Severity::Prepatch(require_tag()?)),
            "preminor" => Ok(Severity::Preminor(require_tag()?)),
            "premajor" => Ok(Severity::Premajor(require_tag()?)),
            other => Err(ReleaseError::configuration(format!(
                "Unknown release kind: '{}'",
                other
            ))),
        }
    }

    /// Kind name without the tag
    pub fn kind(&self) -> &'static str {
        match self {
            Severity::Ignore => "ignore",
            Severity::Prerelease(_) => "prerelease",
            Severity::Prepatch(_) => "prepatch",
            Severity::Patch => "patch",
            Severity::Preminor(_) => "preminor",
            Severity::Minor => "minor",
            Severity::Premajor(_) => "premajor",
            Severity::Major => "major",
        }
    }

    /// Pre-release tag, if this is a pre-release kind
    pub fn tag(&self) -> Option<&str> {
        match self {
            Severity::Prerelease(tag)
            | Severity::Prepatch(tag)
            | Severity::Preminor(tag)
            | Severity::Premajor(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn is_prerelease(&self) -> bool {
        self.tag().is_some()
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, Severity::Ignore)
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Ignore
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Some(tag) => write!(f, "{} ({})", self.kind(), tag),
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// How pre-release kinds rank against stable kinds when merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrereleasePolicy {
    /// `pre-X` ranks strictly between the stable kind below it and `X`.
    #[default]
    BelowStable,
    /// `pre-X` weighs the same as `X`; the pre-release kind wins the tie, so
    /// any pre-release rule in a tier turns that tier's release into a
    /// pre-release.
    SameTier,
}

impl PrereleasePolicy {
    fn weight(self, severity: &Severity) -> u8 {
        match (self, severity) {
            (_, Severity::Ignore) => 0,
            (_, Severity::Prerelease(_)) => 1,
            (PrereleasePolicy::BelowStable, Severity::Prepatch(_)) => 2,
            (PrereleasePolicy::SameTier, Severity::Prepatch(_)) => 3,
            (_, Severity::Patch) => 3,
            (PrereleasePolicy::BelowStable, Severity::Preminor(_)) => 4,
            (PrereleasePolicy::SameTier, Severity::Preminor(_)) => 5,
            (_, Severity::Minor) => 5,
            (PrereleasePolicy::BelowStable, Severity::Premajor(_)) => 6,
            (PrereleasePolicy::SameTier, Severity::Premajor(_)) => 7,
            (_, Severity::Major) => 7,
        }
    }

    /// Total order over severities under this policy.
    ///
    /// Equal weights rank a pre-release kind above a stable one and then fall
    /// back to the tag text, so two severities compare equal only when they
    /// are equal.
    pub fn compare(self, a: &Severity, b: &Severity) -> Ordering {
        self.weight(a)
            .cmp(&self.weight(b))
            .then_with(|| a.is_prerelease().cmp(&b.is_prerelease()))
            .then_with(|| a.tag().cmp(&b.tag()))
    }

    /// Merge two severities, keeping the higher one
    pub fn max(self, a: Severity, b: Severity) -> Severity {
        match self.compare(&a, &b) {
            Ordering::Less => b,
            _ => a,
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        PrereleasePolicy::default().compare(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(f: fn(String) -> Severity) -> Severity {
        f("alpha".to_string())
    }

    #[test]
    fn test_stable_order() {
        assert!(Severity::Ignore < Severity::Patch);
        assert!(Severity::Patch < Severity::Minor);
        assert!(Severity::Minor < Severity::Major);
    }

    #[test]
    fn test_below_stable_order() {
        let ordered = vec![
            Severity::Ignore,
            alpha(Severity::Prerelease),
            alpha(Severity::Prepatch),
            Severity::Patch,
            alpha(Severity::Preminor),
            Severity::Minor,
            alpha(Severity::Premajor),
            Severity::Major,
        ];

        for pair in ordered.windows(2) {
            assert_eq!(
                PrereleasePolicy::BelowStable.compare(&pair[0], &pair[1]),
                Ordering::Less,
                "{} should rank below {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_same_tier_prerelease_wins_tie() {
        let policy = PrereleasePolicy::SameTier;
        assert_eq!(
            policy.max(alpha(Severity::Preminor), Severity::Minor),
            alpha(Severity::Preminor)
        );
        assert_eq!(
            policy.max(Severity::Minor, alpha(Severity::Preminor)),
            alpha(Severity::Preminor)
        );
        assert_eq!(
            policy.compare(&alpha(Severity::Premajor), &Severity::Minor),
            Ordering::Greater
        );
    }

    #[test]
    fn test_ignore_is_merge_identity() {
        for policy in [PrereleasePolicy::BelowStable, PrereleasePolicy::SameTier] {
            for severity in [
                Severity::Patch,
                alpha(Severity::Prepatch),
                Severity::Major,
                Severity::Ignore,
            ] {
                assert_eq!(policy.max(Severity::Ignore, severity.clone()), severity);
                assert_eq!(policy.max(severity.clone(), Severity::Ignore), severity);
            }
        }
    }

    #[test]
    fn test_max_is_commutative_across_tags() {
        let policy = PrereleasePolicy::BelowStable;
        let a = Severity::Prepatch("alpha".to_string());
        let b = Severity::Prepatch("beta".to_string());
        assert_eq!(policy.max(a.clone(), b.clone()), policy.max(b, a));
    }

    #[test]
    fn test_from_kind() {
        assert_eq!(Severity::from_kind("major", None).unwrap(), Severity::Major);
        assert_eq!(
            Severity::from_kind("PreMinor", Some("beta")).unwrap(),
            Severity::Preminor("beta".to_string())
        );
    }

    #[test]
    fn test_from_kind_tag_mismatch() {
        assert!(Severity::from_kind("prepatch", None).is_err());
        assert!(Severity::from_kind("patch", Some("alpha")).is_err());
        assert!(Severity::from_kind("huge", None).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Severity::Minor.to_string(), "minor");
        assert_eq!(alpha(Severity::Prerelease).to_string(), "prerelease (alpha)");
    }

    #[test]
    fn test_policy_deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: PrereleasePolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"same-tier\"").unwrap();
        assert_eq!(w.policy, PrereleasePolicy::SameTier);
    }
}
