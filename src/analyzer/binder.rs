use crate::domain::{Commit, Workspace};

/// Commits with at least one touched file under the workspace root.
///
/// Each workspace is tested independently, so a commit spanning several
/// roots is attributed to every one of them.
pub fn impacting_commits<'a>(workspace: &Workspace, commits: &'a [Commit]) -> Vec<&'a Commit> {
    commits
        .iter()
        .filter(|commit| commit.touches(&workspace.path))
        .collect()
}

/// Partition commits across all workspaces, preserving workspace order
pub fn bind_commits<'a>(
    workspaces: &'a [Workspace],
    commits: &'a [Commit],
) -> Vec<(&'a Workspace, Vec<&'a Commit>)> {
    workspaces
        .iter()
        .map(|workspace| (workspace, impacting_commits(workspace, commits)))
        .collect()
}
