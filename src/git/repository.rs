use crate::domain::Commit;
use crate::error::{ReleaseError, Result};
use crate::git::CommitSource;
use git2::{DescribeFormatOptions, DescribeOptions, Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository implementing [CommitSource]
pub struct Git2Repository {
    repo: Git2Repo,
    workdir: PathBuf,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    ///
    /// Bare repositories are rejected since touched files are resolved
    /// against the work directory.
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let workdir = repo
            .workdir()
            .ok_or_else(|| ReleaseError::configuration("Repository has no work directory"))?
            .canonicalize()?;

        Ok(Git2Repository { repo, workdir })
    }

    /// Absolute path of the work directory
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn resolve(&self, reference: &str) -> Result<Option<Oid>> {
        let Ok(object) = self.repo.revparse_single(reference) else {
            return Ok(None);
        };

        Ok(Some(object.peel_to_commit()?.id()))
    }

    fn touched_files(&self, commit: &git2::Commit) -> Result<Vec<PathBuf>> {
        let tree = commit.tree()?;
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            for file in [delta.old_file().path(), delta.new_file().path()]
                .into_iter()
                .flatten()
            {
                let absolute = self.workdir.join(file);
                if !files.contains(&absolute) {
                    files.push(absolute);
                }
            }
        }

        Ok(files)
    }
}

impl CommitSource for Git2Repository {
    fn commits_since(&self, since: Option<&str>) -> Result<Vec<Commit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;

        if let Some(reference) = since {
            let oid = self.resolve(reference)?.ok_or_else(|| {
                ReleaseError::configuration(format!("Cannot resolve reference '{}'", reference))
            })?;
            revwalk.hide(oid)?;
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            let message = commit.message().unwrap_or("(empty message)").to_string();
            let files = self.touched_files(&commit)?;

            commits.push(Commit::new(oid.to_string(), message).with_files(files));
        }

        commits.reverse();
        debug!(count = commits.len(), since = ?since, "collected commits");
        Ok(commits)
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        if self.repo.tag_names(None)?.is_empty() {
            return Ok(None);
        }

        let mut options = DescribeOptions::new();
        options.describe_tags();

        let describe = match self.repo.describe(&options) {
            Ok(describe) => describe,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);

        Ok(Some(describe.format(Some(&format))?))
    }

    fn is_ref_in_history(&self, reference: &str) -> Result<bool> {
        let Some(oid) = self.resolve(reference)? else {
            return Ok(false);
        };
        let head = self.repo.head()?.peel_to_commit()?.id();

        Ok(oid == head || self.repo.graph_descendant_of(head, oid)?)
    }
}
