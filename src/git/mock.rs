use crate::domain::Commit;
use crate::error::{ReleaseError, Result};
use crate::git::CommitSource;
use std::collections::{HashMap, HashSet};

/// In-memory commit history for tests
///
/// Commits form a single linear history, oldest first. Tags point at an index
/// in that history; foreign references resolve but are not ancestors of HEAD.
#[derive(Debug, Default)]
pub struct MockRepository {
    commits: Vec<Commit>,
    tags: HashMap<String, usize>,
    foreign_refs: HashSet<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit on top of the history
    pub fn add_commit(&mut self, commit: Commit) {
        self.commits.push(commit);
    }

    /// Tag the most recent commit
    pub fn add_tag(&mut self, name: impl Into<String>) {
        if let Some(last) = self.commits.len().checked_sub(1) {
            self.tags.insert(name.into(), last);
        }
    }

    /// Register a reference that exists outside the HEAD history
    pub fn add_foreign_ref(&mut self, name: impl Into<String>) {
        self.foreign_refs.insert(name.into());
    }

    fn position(&self, reference: &str) -> Option<usize> {
        self.tags
            .get(reference)
            .copied()
            .or_else(|| self.commits.iter().position(|c| c.hash == reference))
    }
}

impl CommitSource for MockRepository {
    fn commits_since(&self, since: Option<&str>) -> Result<Vec<Commit>> {
        let Some(reference) = since else {
            return Ok(self.commits.clone());
        };

        if self.foreign_refs.contains(reference) {
            return Ok(self.commits.clone());
        }

        let index = self.position(reference).ok_or_else(|| {
            ReleaseError::configuration(format!("Cannot resolve reference '{}'", reference))
        })?;

        Ok(self.commits[index + 1..].to_vec())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self
            .tags
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)))
            .map(|(name, _)| name.clone()))
    }

    fn is_ref_in_history(&self, reference: &str) -> Result<bool> {
        Ok(self.position(reference).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.add_commit(Commit::new("aaa", "chore: init"));
        repo.add_tag("v1.0.0");
        repo.add_commit(Commit::new("bbb", "feat: login"));
        repo.add_commit(Commit::new("ccc", "fix: typo"));
        repo
    }

    #[test]
    fn test_mock_full_history() {
        assert_eq!(repo().commits_since(None).unwrap().len(), 3);
    }

    #[test]
    fn test_mock_commits_since_tag_and_hash() {
        let repo = repo();

        let since_tag = repo.commits_since(Some("v1.0.0")).unwrap();
        assert_eq!(since_tag.len(), 2);
        assert_eq!(since_tag[0].hash, "bbb");

        let since_hash = repo.commits_since(Some("bbb")).unwrap();
        assert_eq!(since_hash.len(), 1);
        assert_eq!(since_hash[0].hash, "ccc");
    }

    #[test]
    fn test_mock_latest_tag() {
        let mut repo = repo();
        assert_eq!(repo.latest_tag().unwrap().as_deref(), Some("v1.0.0"));

        repo.add_tag("v1.1.0");
        assert_eq!(repo.latest_tag().unwrap().as_deref(), Some("v1.1.0"));
        assert_eq!(MockRepository::new().latest_tag().unwrap(), None);
    }

    #[test]
    fn test_mock_foreign_reference() {
        let mut repo = repo();
        repo.add_foreign_ref("other-branch");

        assert!(!repo.is_ref_in_history("other-branch").unwrap());
        assert_eq!(repo.commits_since(Some("other-branch")).unwrap().len(), 3);
        assert!(repo.commits_since(Some("unknown")).is_err());
    }
}
