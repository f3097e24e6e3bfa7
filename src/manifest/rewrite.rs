//! Format-preserving manifest rewriting.
//!
//! The intended document is built structurally, then the raw text is patched
//! by replacing one quoted occurrence of the old value. Candidates are scanned
//! forward from the owning key's offset and a candidate is accepted only when
//! it reparses to exactly the intended document, so everything outside the
//! replaced span stays byte-identical.

use crate::domain::{find_release, DependencyKind, Release};
use crate::error::{ReleaseError, Result};
use crate::version::next_version;
use serde_json::Value;
use tracing::debug;

/// Rewrite a manifest with the next versions computed for `releases`.
///
/// Updates the package's own `version` and every dependency range that names
/// another released workspace. Values that already equal their target are
/// left untouched.
pub fn rewrite_manifest(raw: &str, releases: &[Release]) -> Result<String> {
    let parsed: Value = serde_json::from_str(raw)?;
    let name = parsed
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ReleaseError::manifest("Manifest has no package name"))?;

    let own = find_release(releases, name)
        .ok_or_else(|| ReleaseError::rewrite(name, "no release computed for this workspace"))?;

    let mut content = raw.to_string();
    let own_next = next_version(own)?;
    if parsed.get("version").and_then(Value::as_str) != Some(own_next.as_str()) {
        content = replace_value(&content, name, &["version"], &own_next)?;
    }

    let sections = DependencyKind::ALL.iter().flat_map(|kind| kind.manifest_keys());
    for &key in sections {
        let Some(Value::Object(section)) = parsed.get(key) else {
            continue;
        };

        for (dependency, range) in section {
            let Some(range) = range.as_str() else { continue };
            if dependency == name {
                continue;
            }
            let Some(release) = find_release(releases, dependency) else {
                continue;
            };

            let next = next_version(release)?;
            if range != next {
                debug!(workspace = name, dependency = %dependency, from = range, to = %next, "rewriting dependency range");
                content = replace_value(&content, name, &[key, dependency.as_str()], &next)?;
            }
        }
    }

    Ok(content)
}

/// Replace the string at `key_path` with `new_value`, preserving formatting.
fn replace_value(raw: &str, workspace: &str, key_path: &[&str], new_value: &str) -> Result<String> {
    let location = key_path.join(".");
    let no_span = || ReleaseError::rewrite(workspace, format!("no safe replacement span for '{}'", location));

    let mut expected: Value = serde_json::from_str(raw)?;
    let slot = key_path
        .iter()
        .try_fold(&mut expected, |value, key| value.get_mut(*key))
        .ok_or_else(no_span)?;
    let old_value = slot.as_str().ok_or_else(no_span)?.to_string();
    *slot = Value::String(new_value.to_string());

    let search = serde_json::to_string(&old_value)?;
    let replacement = serde_json::to_string(new_value)?;
    let start = key_offset(raw, key_path[0]).ok_or_else(no_span)?;

    for (offset, _) in raw[start..].match_indices(&search) {
        let at = start + offset;
        let candidate = format!("{}{}{}", &raw[..at], replacement, &raw[at + search.len()..]);

        if serde_json::from_str::<Value>(&candidate).map_or(false, |v| v == expected) {
            return Ok(candidate);
        }
    }

    Err(no_span())
}

/// Offset just past the first occurrence of `key` used as an object key
fn key_offset(raw: &str, key: &str) -> Option<usize> {
    let quoted = serde_json::to_string(key).ok()?;

    raw.match_indices(&quoted)
        .map(|(index, _)| index + quoted.len())
        .find(|&end| raw[end..].trim_start().starts_with(':'))
}
