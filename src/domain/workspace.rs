use crate::error::{ReleaseError, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Which manifest section a dependency is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Runtime,
    Dev,
    Optional,
    Peer,
    Bundled,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 5] = [
        DependencyKind::Runtime,
        DependencyKind::Dev,
        DependencyKind::Optional,
        DependencyKind::Peer,
        DependencyKind::Bundled,
    ];

    /// Manifest key holding dependencies of this kind
    pub fn manifest_key(self) -> &'static str {
        match self {
            DependencyKind::Runtime => "dependencies",
            DependencyKind::Dev => "devDependencies",
            DependencyKind::Optional => "optionalDependencies",
            DependencyKind::Peer => "peerDependencies",
            DependencyKind::Bundled => "bundledDependencies",
        }
    }

    /// Every key accepted for this kind, canonical key first.
    ///
    /// Bundled dependencies are also read from the `bundleDependencies` alias.
    pub fn manifest_keys(self) -> &'static [&'static str] {
        match self {
            DependencyKind::Runtime => &["dependencies"],
            DependencyKind::Dev => &["devDependencies"],
            DependencyKind::Optional => &["optionalDependencies"],
            DependencyKind::Peer => &["peerDependencies"],
            DependencyKind::Bundled => &["bundledDependencies", "bundleDependencies"],
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.manifest_key())
    }
}

/// A declared dependency of a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub name: String,
    pub version_range: String,
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version_range: impl Into<String>, kind: DependencyKind) -> Self {
        Dependency {
            name: name.into(),
            version_range: version_range.into(),
            kind,
        }
    }
}

/// One package root inside the monorepo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workspace {
    pub path: PathBuf,
    pub name: String,
    pub version: String,
    pub dependencies: Vec<Dependency>,
    /// Raw manifest text, kept for rewriting
    #[serde(skip)]
    pub manifest: Option<String>,
}

impl Workspace {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Workspace {
            path: path.into(),
            name: name.into(),
            version: version.into(),
            dependencies: Vec::new(),
            manifest: None,
        }
    }

    /// Add a dependency
    pub fn with_dependency(mut self, name: impl Into<String>, version_range: impl Into<String>, kind: DependencyKind) -> Self {
        self.dependencies.push(Dependency::new(name, version_range, kind));
        self
    }

    /// Attach the raw manifest text
    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = Some(manifest.into());
        self
    }

    /// Distinct dependency names, in declaration order
    pub fn dependency_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.dependencies
            .iter()
            .map(|d| d.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

/// Reject workspace lists that reuse a package name.
///
/// Graph lookups resolve dependencies by name, so names must be unique.
pub fn ensure_unique_names(workspaces: &[Workspace]) -> Result<()> {
    let mut seen = HashSet::new();
    let duplicates: Vec<&str> = workspaces
        .iter()
        .filter(|w| !seen.insert(w.name.as_str()))
        .map(|w| w.name.as_str())
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ReleaseError::configuration(format!(
            "Duplicate workspace names: {}",
            duplicates.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_keys() {
        assert_eq!(DependencyKind::Runtime.manifest_key(), "dependencies");
        assert_eq!(DependencyKind::Dev.manifest_key(), "devDependencies");
        assert_eq!(DependencyKind::Bundled.to_string(), "bundledDependencies");
        assert_eq!(
            DependencyKind::Bundled.manifest_keys(),
            &["bundledDependencies", "bundleDependencies"]
        );
        assert_eq!(DependencyKind::Peer.manifest_keys(), &["peerDependencies"]);
    }

    #[test]
    fn test_dependency_names_are_distinct() {
        let workspace = Workspace::new("/packages/a", "a", "1.0.0")
            .with_dependency("b", "^1.0.0", DependencyKind::Runtime)
            .with_dependency("c", "1.0.0", DependencyKind::Dev)
            .with_dependency("b", "^1.0.0", DependencyKind::Peer);

        assert_eq!(workspace.dependency_names(), vec!["b", "c"]);
    }

    #[test]
    fn test_unique_names() {
        let workspaces = vec![
            Workspace::new("/packages/a", "a", "1.0.0"),
            Workspace::new("/packages/b", "b", "1.0.0"),
        ];
        assert!(ensure_unique_names(&workspaces).is_ok());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let workspaces = vec![
            Workspace::new("/packages/a", "a", "1.0.0"),
            Workspace::new("/other/a", "a", "2.0.0"),
        ];
        let err = ensure_unique_names(&workspaces).unwrap_err();
        assert!(matches!(err, ReleaseError::Configuration(_)));
        assert!(err.to_string().contains("a"));
    }
}
