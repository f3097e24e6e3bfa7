use crate::domain::workspace::ensure_unique_names;
use crate::domain::{Dependency, DependencyKind, Workspace};
use crate::error::{ReleaseError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Manifest file name inside each workspace directory
pub const MANIFEST_FILE: &str = "package.json";

/// Build a workspace from raw manifest text.
///
/// Reads `name`, `version` and the five dependency sections. Bundled
/// dependencies may be declared as an array of names, which carry an empty
/// version range.
pub fn parse_workspace(path: &Path, raw: &str) -> Result<Workspace> {
    let parsed: Value = serde_json::from_str(raw).map_err(|e| {
        ReleaseError::manifest(format!("Cannot parse {}: {}", path.display(), e))
    })?;

    let field = |key: &str| {
        parsed.get(key).and_then(Value::as_str).ok_or_else(|| {
            ReleaseError::manifest(format!(
                "Missing package {} in {}",
                key,
                path.display()
            ))
        })
    };

    let mut workspace = Workspace::new(path, field("name")?, field("version")?).with_manifest(raw);
    workspace.dependencies = DependencyKind::ALL
        .iter()
        .flat_map(|&kind| section_dependencies(&parsed, kind))
        .collect();

    Ok(workspace)
}

fn section_dependencies(parsed: &Value, kind: DependencyKind) -> Vec<Dependency> {
    let section = kind.manifest_keys().iter().find_map(|key| parsed.get(*key));

    match section {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, range)| Dependency::new(name.as_str(), range.as_str().unwrap_or(""), kind))
            .collect(),
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .map(|name| Dependency::new(name, "", kind))
            .collect(),
        _ => Vec::new(),
    }
}

/// Load the workspace rooted at `dir`.
///
/// The directory is canonicalized so commit paths can be compared by prefix.
pub fn load_workspace(dir: &Path) -> Result<Workspace> {
    let dir = dir.canonicalize()?;
    let raw = fs::read_to_string(dir.join(MANIFEST_FILE)).map_err(|e| {
        ReleaseError::manifest(format!("Cannot read {}: {}", dir.join(MANIFEST_FILE).display(), e))
    })?;

    parse_workspace(&dir, &raw)
}

/// Workspace glob patterns declared in the root manifest.
///
/// Accepts both `"workspaces": [..]` and `"workspaces": { "packages": [..] }`.
pub fn workspace_patterns(root: &Path) -> Result<Vec<String>> {
    let manifest = root.join(MANIFEST_FILE);
    let raw = fs::read_to_string(&manifest).map_err(|e| {
        ReleaseError::configuration(format!("Cannot read {}: {}", manifest.display(), e))
    })?;
    let parsed: Value = serde_json::from_str(&raw)?;

    let patterns = match parsed.get("workspaces") {
        Some(Value::Array(list)) => list,
        Some(Value::Object(map)) => match map.get("packages") {
            Some(Value::Array(list)) => list,
            _ => return Err(missing_workspaces(&manifest)),
        },
        _ => return Err(missing_workspaces(&manifest)),
    };

    Ok(patterns
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}

fn missing_workspaces(manifest: &Path) -> ReleaseError {
    ReleaseError::configuration(format!(
        "Missing workspaces definition in {}",
        manifest.display()
    ))
}

/// Expand glob patterns under `root` and load every matched workspace.
///
/// Directories without a manifest are skipped. Every load failure is
/// collected and reported together; duplicate package names are rejected.
pub fn discover_workspaces(root: &Path, patterns: &[String]) -> Result<Vec<Workspace>> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let full_pattern = root.join(pattern);
        let pattern_str = full_pattern.to_str().ok_or_else(|| {
            ReleaseError::configuration(format!(
                "Workspace pattern contains invalid UTF-8: {}",
                full_pattern.display()
            ))
        })?;
        let matches = glob::glob(pattern_str).map_err(|e| {
            ReleaseError::configuration(format!("Invalid workspace pattern '{}': {}", pattern, e))
        })?;

        dirs.extend(
            matches
                .flatten()
                .filter(|entry| entry.is_dir() && entry.join(MANIFEST_FILE).is_file()),
        );
    }

    dirs.sort();
    dirs.dedup();

    if dirs.is_empty() {
        return Err(ReleaseError::configuration(format!(
            "Couldn't find any workspace under {}",
            root.display()
        )));
    }

    let mut workspaces = Vec::new();
    let mut errors = Vec::new();
    for dir in dirs {
        match load_workspace(&dir) {
            Ok(workspace) => {
                debug!(name = %workspace.name, path = %workspace.path.display(), "loaded workspace");
                workspaces.push(workspace);
            }
            Err(e) => errors.push(e),
        }
    }

    ReleaseError::aggregate(errors)?;
    ensure_unique_names(&workspaces)?;
    Ok(workspaces)
}

/// Write new manifest text into the workspace directory `dir`
pub fn write_manifest(dir: &Path, contents: &str) -> Result<PathBuf> {
    let path = dir.join(MANIFEST_FILE);
    fs::write(&path, contents)?;
    Ok(path)
}
