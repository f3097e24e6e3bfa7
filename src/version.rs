//! Next-version calculation from a release severity.
//!
//! Increments follow the package-ecosystem convention: a stable bump applied to
//! a pre-release of that same version only drops the suffix, pre-release kinds
//! start a `tag.0` series, and `prerelease` continues a matching series.

use crate::domain::{PreRelease, Release, Severity};
use crate::error::{ReleaseError, Result};
use semver::{Prerelease, Version};

fn start_series(tag: &str) -> std::result::Result<Prerelease, semver::Error> {
    Prerelease::new(&PreRelease::start(tag).to_string())
}

/// Bumps a version according to a severity.
///
/// - **Ignore**: unchanged, build metadata included
/// - **Major**: `X+1.0.0`, or drops the suffix of `X.0.0-pre`
/// - **Minor**: `X.Y+1.0`, or drops the suffix of `X.Y.0-pre`
/// - **Patch**: `X.Y.Z+1`, or drops the suffix of `X.Y.Z-pre`
/// - **Premajor/Preminor/Prepatch**: component increment, then `-tag.0`
/// - **Prerelease**: `tag.N` -> `tag.N+1`; another suffix restarts at `tag.0`
///   on the same core; a stable version gets a patch increment and `tag.0`
///
/// # Example
/// ```ignore
/// let v = Version::parse("1.2.3")?;
/// assert_eq!(bump(&v, &Severity::Minor)?.to_string(), "1.3.0");
/// ```
pub fn bump(current: &Version, severity: &Severity) -> std::result::Result<Version, semver::Error> {
    let has_pre = !current.pre.is_empty();
    let mut next = Version::new(current.major, current.minor, current.patch);

    match severity {
        Severity::Ignore => return Ok(current.clone()),
        Severity::Major => {
            if !(has_pre && current.minor == 0 && current.patch == 0) {
                next = Version::new(current.major + 1, 0, 0);
            }
        }
        Severity::Minor => {
            if !(has_pre && current.patch == 0) {
                next = Version::new(current.major, current.minor + 1, 0);
            }
        }
        Severity::Patch => {
            if !has_pre {
                next.patch += 1;
            }
        }
        Severity::Premajor(tag) => {
            next = Version::new(current.major + 1, 0, 0);
            next.pre = start_series(tag)?;
        }
        Severity::Preminor(tag) => {
            next = Version::new(current.major, current.minor + 1, 0);
            next.pre = start_series(tag)?;
        }
        Severity::Prepatch(tag) => {
            next.patch += 1;
            next.pre = start_series(tag)?;
        }
        Severity::Prerelease(tag) => {
            if has_pre {
                let continued = match PreRelease::parse(current.pre.as_str()) {
                    Some(pre) if pre.tag == *tag => pre.increment(),
                    _ => PreRelease::start(tag.as_str()),
                };
                next.pre = Prerelease::new(&continued.to_string())?;
            } else {
                next.patch += 1;
                next.pre = start_series(tag)?;
            }
        }
    }

    Ok(next)
}

/// Computes the next version string of a version under a severity.
///
/// The current version is parsed even when nothing changes, so a malformed
/// version always surfaces as a parse error naming the workspace.
pub fn next_version_of(workspace: &str, current: &str, severity: &Severity) -> Result<String> {
    let parsed = Version::parse(current)
        .map_err(|e| ReleaseError::parse(workspace, format!("'{}': {}", current, e)))?;

    if severity.is_ignore() {
        return Ok(current.to_string());
    }

    bump(&parsed, severity)
        .map(|v| v.to_string())
        .map_err(|e| ReleaseError::parse(workspace, format!("cannot bump '{}': {}", current, e)))
}

/// Computes the next version of a release's workspace
pub fn next_version(release: &Release) -> Result<String> {
    next_version_of(release.name(), &release.workspace.version, &release.severity)
}
