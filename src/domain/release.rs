use crate::domain::{Commit, Severity, Workspace};
use serde::Serialize;

/// Outcome of analysing one workspace
///
/// `commits` lists only the commits attributed to the workspace by path;
/// severity inherited through dependencies does not add commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release<'a> {
    pub workspace: &'a Workspace,
    pub severity: Severity,
    pub commits: Vec<&'a Commit>,
}

impl<'a> Release<'a> {
    pub fn new(workspace: &'a Workspace, severity: Severity, commits: Vec<&'a Commit>) -> Self {
        Release {
            workspace,
            severity,
            commits,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.workspace.name
    }

    /// Same workspace and commits with a different severity
    pub fn with_severity(&self, severity: Severity) -> Self {
        Release {
            workspace: self.workspace,
            severity,
            commits: self.commits.clone(),
        }
    }
}

/// Find the release for a package name
pub fn find_release<'r, 'a>(releases: &'r [Release<'a>], name: &str) -> Option<&'r Release<'a>> {
    releases.iter().find(|release| release.name() == name)
}
