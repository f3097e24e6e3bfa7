use serde::Serialize;
use std::fmt;

/// Warnings raised around the edges of the analysed history.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryWarning {
    /// No commits since the reference the analysis starts from
    NoNewCommits { since: String },
    /// The starting reference is not HEAD or an ancestor of it
    ReferenceNotInHistory { reference: String },
    /// No tag was found, so the whole history is analysed
    NoPreviousTag,
    /// Commits exist but none touches any workspace
    NoImpactingCommits { commit_count: usize },
    /// A workspace depends on itself; the edge is ignored
    SelfDependency { workspace: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { since } => {
                write!(f, "No new commits since '{}'", since)
            }
            BoundaryWarning::ReferenceNotInHistory { reference } => {
                write!(
                    f,
                    "Reference '{}' is not part of the current history; analysing commits since the merge base",
                    reference
                )
            }
            BoundaryWarning::NoPreviousTag => {
                write!(f, "No previous tag found, analysing the full history")
            }
            BoundaryWarning::NoImpactingCommits { commit_count } => {
                write!(
                    f,
                    "None of the {} commit(s) touch a workspace",
                    commit_count
                )
            }
            BoundaryWarning::SelfDependency { workspace } => {
                write!(f, "Workspace '{}' depends on itself; ignoring that dependency", workspace)
            }
        }
    }
}
