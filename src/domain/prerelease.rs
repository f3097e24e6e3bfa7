//! Pre-release identifiers for semantic versions
//!
//! A pre-release suffix as produced by the version calculator is a tag with an
//! optional counter, e.g. `alpha` or `beta.3`.
//! According to semver.org: https://semver.org/#spec-item-9

use crate::error::{ReleaseError, Result};
use std::fmt;

/// Check that a pre-release tag is a valid dot-free semver identifier
///
/// Accepts any non-empty ASCII alphanumeric-hyphen string.
pub fn validate_tag(tag: &str) -> Result<()> {
    if !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Ok(())
    } else {
        Err(ReleaseError::configuration(format!(
            "Invalid pre-release identifier: '{}'",
            tag
        )))
    }
}

/// Pre-release suffix with optional counter
///
/// # Examples
/// - "alpha" -> PreRelease { tag: "alpha", counter: None }
/// - "beta.1" -> PreRelease { tag: "beta", counter: Some(1) }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    pub tag: String,
    pub counter: Option<u64>,
}

impl PreRelease {
    /// Start a new pre-release series at `tag.0`
    pub fn start(tag: impl Into<String>) -> Self {
        PreRelease {
            tag: tag.into(),
            counter: Some(0),
        }
    }

    /// Parse a pre-release suffix of the form `tag` or `tag.N`.
    ///
    /// Returns `None` for suffixes of any other shape (e.g. `1.2`, `rc.x.y`),
    /// which the version calculator treats as foreign pre-releases.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split('.');
        let tag = parts.next()?;
        if validate_tag(tag).is_err() || tag.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let counter = match parts.next() {
            Some(n) => Some(n.parse::<u64>().ok()?),
            None => None,
        };

        if parts.next().is_some() {
            return None;
        }

        Some(PreRelease {
            tag: tag.to_string(),
            counter,
        })
    }

    /// Increment the counter
    ///
    /// A missing counter becomes 0, so `alpha` continues as `alpha.0`.
    pub fn increment(&self) -> Self {
        PreRelease {
            tag: self.tag.clone(),
            counter: Some(self.counter.map_or(0, |n| n + 1)),
        }
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        if let Some(counter) = self.counter {
            write!(f, ".{}", counter)?;
        }
        Ok(())
    }
}
