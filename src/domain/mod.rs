//! Domain model - pure types shared by the analysis engine

pub mod commit;
pub mod prerelease;
pub mod release;
pub mod rule;
pub mod severity;
pub mod workspace;

pub use commit::Commit;
pub use prerelease::PreRelease;
pub use release::{find_release, Release};
pub use rule::{default_rules, Rule};
pub use severity::{PrereleasePolicy, Severity};
pub use workspace::{Dependency, DependencyKind, Workspace};
