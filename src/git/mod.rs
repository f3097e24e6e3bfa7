//! Commit history access
//!
//! The analysis engine only needs three things from version control: the
//! commits made since a reference, the most recent tag, and whether a
//! reference belongs to the current history.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for tests
//!
//! Workflow code depends on the [CommitSource] trait rather than a concrete
//! implementation.
//!
//! ```rust
//! # use mono_release::git::CommitSource;
//! # fn example<S: CommitSource>(source: &S) -> mono_release::Result<()> {
//! let since = source.latest_tag()?;
//! let commits = source.commits_since(since.as_deref())?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::Commit;
use crate::error::Result;

/// Source of commits for release analysis
pub trait CommitSource {
    /// Commits reachable from HEAD but not from `since`, oldest first.
    ///
    /// With `since` set to `None` the whole history is returned. Every commit
    /// carries the absolute paths of the files it touched.
    ///
    /// # Arguments
    /// * `since` - Tag, branch or commit hash marking the previous release
    fn commits_since(&self, since: Option<&str>) -> Result<Vec<Commit>>;

    /// Name of the nearest tag reachable from HEAD, if any
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Whether `reference` is HEAD or one of its ancestors.
    ///
    /// Unknown references yield `Ok(false)`.
    fn is_ref_in_history(&self, reference: &str) -> Result<bool>;
}
