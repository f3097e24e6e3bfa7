//! Dependency-closure propagation of release severities
//!
//! A workspace's effective severity is the maximum of its own direct severity
//! and the effective severities of its local dependencies. The dependency
//! graph may contain cycles; the walk carries the set of names already on the
//! current path and never re-enters one of them.

use crate::domain::{PrereleasePolicy, Release, Severity};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Propagates severities over a complete set of preliminary releases
pub struct Propagator<'r, 'a> {
    releases: &'r [Release<'a>],
    by_name: HashMap<&'a str, usize>,
    policy: PrereleasePolicy,
}

impl<'r, 'a> Propagator<'r, 'a> {
    /// Index releases by workspace name
    pub fn new(releases: &'r [Release<'a>], policy: PrereleasePolicy) -> Self {
        let by_name = releases
            .iter()
            .enumerate()
            .map(|(index, release)| (release.name(), index))
            .collect();

        Propagator {
            releases,
            by_name,
            policy,
        }
    }

    /// New releases carrying effective severities, in input order
    pub fn propagate(&self) -> Vec<Release<'a>> {
        (0..self.releases.len())
            .map(|index| {
                let severity = self.effective_severity(index, &HashSet::new());
                self.releases[index].with_severity(severity)
            })
            .collect()
    }

    /// Effective severity of the release at `index`.
    ///
    /// `path` holds the dependency names entered so far on this recursion
    /// stack; the starting release's own name is not in it. A dependency is
    /// added to the path before descending into it.
    pub fn effective_severity(&self, index: usize, path: &HashSet<&'a str>) -> Severity {
        let release = &self.releases[index];

        release
            .workspace
            .dependency_names()
            .into_iter()
            .filter_map(|name| self.by_name.get(name).map(|&dep| (name, dep)))
            .fold(release.severity.clone(), |acc, (name, dep)| {
                if path.contains(name) {
                    trace!(workspace = release.name(), dependency = name, "dependency cycle cut");
                    return acc;
                }

                let mut next = path.clone();
                next.insert(self.releases[dep].name());
                let inherited = self.effective_severity(dep, &next);
                self.policy.max(acc, inherited)
            })
    }
}
