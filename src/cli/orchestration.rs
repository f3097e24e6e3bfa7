//! Main workflow orchestration logic
//!
//! Ties configuration, workspace discovery, commit history, analysis,
//! version planning and manifest rewriting together. The CLI only parses
//! arguments, renders the report and asks for confirmation.

use crate::analyzer::Analyzer;
use crate::boundary::BoundaryWarning;
use crate::changelog;
use crate::config::Config;
use crate::domain::{Commit, Release, Severity, Workspace};
use crate::error::{ReleaseError, Result};
use crate::git::CommitSource;
use crate::manifest::{discover_workspaces, rewrite_manifest, workspace_patterns, write_manifest};
use crate::version::next_version;
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Monorepo root holding the root manifest
    pub root: PathBuf,

    /// Reference marking the previous release
    pub since: Option<String>,

    /// Skip confirmation prompts
    pub force: bool,

    /// Preview mode - report only, never write manifests
    pub dry_run: bool,

    /// False when nobody can answer a prompt; writes then require `force`
    pub interactive: bool,
}

impl WorkflowArgs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        WorkflowArgs {
            root: root.into(),
            since: None,
            force: false,
            dry_run: false,
            interactive: true,
        }
    }
}

/// Planned outcome for one workspace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedRelease {
    pub name: String,
    pub path: PathBuf,
    pub current_version: String,
    /// `None` when the current version could not be parsed
    pub next_version: Option<String>,
    pub severity: Severity,
    /// Hashes of the commits attributed to this workspace
    pub commits: Vec<String>,
    pub changelog: Option<String>,
    /// New manifest text, present only when the manifest changes
    #[serde(skip)]
    pub manifest: Option<String>,
}

impl PlannedRelease {
    /// True when the manifest is going to be rewritten
    pub fn has_changes(&self) -> bool {
        self.manifest.is_some()
    }
}

fn serialize_errors<S: Serializer>(errors: &[ReleaseError], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(|e| e.to_string()))
}

/// Everything the workflow found, before anything is written
#[derive(Debug, Serialize)]
pub struct WorkflowReport {
    pub since: Option<String>,
    pub commit_count: usize,
    pub releases: Vec<PlannedRelease>,
    pub warnings: Vec<BoundaryWarning>,
    /// Version parsing failures, one per workspace
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<ReleaseError>,
    /// Manifests that could not be rewritten safely
    #[serde(serialize_with = "serialize_errors")]
    pub rewrite_errors: Vec<ReleaseError>,
}

impl WorkflowReport {
    /// Releases whose manifest will change
    pub fn pending_writes(&self) -> impl Iterator<Item = &PlannedRelease> {
        self.releases.iter().filter(|r| r.has_changes())
    }

    pub fn find(&self, name: &str) -> Option<&PlannedRelease> {
        self.releases.iter().find(|r| r.name == name)
    }
}

/// Result of a completed workflow
#[derive(Debug, Serialize)]
pub struct WorkflowResult {
    pub report: WorkflowReport,
    /// Names of the workspaces whose manifest was written
    pub written: Vec<String>,
    pub dry_run: bool,
    /// False when writing was declined, or skipped because nobody could confirm it
    pub confirmed: bool,
}

/// Analyse the monorepo and plan every release without touching disk.
///
/// Workspace loading failures abort before analysis. Version parsing failures
/// are collected per workspace into the report.
pub fn plan_release<S: CommitSource>(source: &S, args: &WorkflowArgs, config: &Config) -> Result<WorkflowReport> {
    let root = args.root.canonicalize().map_err(|e| {
        ReleaseError::configuration(format!("Cannot open project root {}: {}", args.root.display(), e))
    })?;

    let patterns = if config.workspaces.is_empty() {
        workspace_patterns(&root)?
    } else {
        config.workspaces.clone()
    };
    let workspaces = discover_workspaces(&root, &patterns)?;
    info!(count = workspaces.len(), "discovered workspaces");

    let rules = config.compiled_rules()?;
    let mut warnings = Vec::new();

    let since = match &args.since {
        Some(reference) => Some(reference.clone()),
        None => {
            let tag = source.latest_tag()?;
            if tag.is_none() {
                warnings.push(BoundaryWarning::NoPreviousTag);
            }
            tag
        }
    };

    if let Some(reference) = &since {
        if !source.is_ref_in_history(reference)? {
            warn!(reference = %reference, "reference is not an ancestor of HEAD");
            warnings.push(BoundaryWarning::ReferenceNotInHistory {
                reference: reference.clone(),
            });
        }
    }

    let commits = source.commits_since(since.as_deref())?;
    info!(count = commits.len(), since = ?since, "collected commits");

    warnings.extend(history_warnings(&workspaces, &commits, since.as_deref()));

    let analyzer = Analyzer::new(rules).with_policy(config.versioning.prerelease_policy);
    let releases = analyzer.analyze(&workspaces, &commits);

    let mut errors = Vec::new();
    let mut planned: Vec<PlannedRelease> = releases
        .iter()
        .map(|release| {
            let next = match next_version(release) {
                Ok(version) => Some(version),
                Err(e) => {
                    errors.push(e);
                    None
                }
            };

            PlannedRelease {
                name: release.name().to_string(),
                path: release.workspace.path.clone(),
                current_version: release.workspace.version.clone(),
                changelog: next.as_deref().map(|v| changelog::summarize(release, v)),
                next_version: next,
                severity: release.severity.clone(),
                commits: release.commits.iter().map(|c| c.hash.clone()).collect(),
                manifest: None,
            }
        })
        .collect();

    let mut rewrite_errors = Vec::new();
    if errors.is_empty() {
        for (release, plan) in releases.iter().zip(planned.iter_mut()) {
            match render_manifest(release, &releases) {
                Ok(manifest) => plan.manifest = manifest,
                Err(e) => rewrite_errors.push(e),
            }
        }
    }

    Ok(WorkflowReport {
        since,
        commit_count: commits.len(),
        releases: planned,
        warnings,
        errors,
        rewrite_errors,
    })
}

/// Rewritten manifest text, or `None` when the workspace is not released or
/// nothing changes
fn render_manifest(release: &Release, releases: &[Release]) -> Result<Option<String>> {
    let Some(raw) = release.workspace.manifest.as_ref().filter(|_| !release.severity.is_ignore()) else {
        return Ok(None);
    };

    let rewritten = rewrite_manifest(raw, releases)?;
    Ok((rewritten != *raw).then_some(rewritten))
}

fn history_warnings(workspaces: &[Workspace], commits: &[Commit], since: Option<&str>) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();

    if let Some(since) = since.filter(|_| commits.is_empty()) {
        warnings.push(BoundaryWarning::NoNewCommits {
            since: since.to_string(),
        });
    }

    let touches_any = commits
        .iter()
        .any(|c| workspaces.iter().any(|w| c.touches(&w.path)));
    if !commits.is_empty() && !touches_any {
        warnings.push(BoundaryWarning::NoImpactingCommits {
            commit_count: commits.len(),
        });
    }

    for workspace in workspaces {
        if workspace.dependency_names().contains(&workspace.name.as_str()) {
            warnings.push(BoundaryWarning::SelfDependency {
                workspace: workspace.name.clone(),
            });
        }
    }

    warnings
}

/// Write every pending manifest.
///
/// Each manifest is written independently; manifests that could not be
/// rewritten and failed writes are reported together afterwards.
pub fn apply_release(report: &mut WorkflowReport) -> Result<Vec<String>> {
    let mut written = Vec::new();
    let mut errors = std::mem::take(&mut report.rewrite_errors);

    for release in report.pending_writes() {
        let Some(contents) = &release.manifest else { continue };

        match write_manifest(&release.path, contents) {
            Ok(path) => {
                info!(workspace = %release.name, path = %path.display(), "manifest written");
                written.push(release.name.clone());
            }
            Err(e) => errors.push(ReleaseError::rewrite(release.name.as_str(), e.to_string())),
        }
    }

    ReleaseError::aggregate(errors)?;
    Ok(written)
}

/// Main release workflow
///
/// Orchestrates the entire process:
/// 1. Load workspaces and commits, analyse and plan versions
/// 2. In dry-run mode, return the report as is
/// 3. Fail on version parsing errors
/// 4. Without `force`, stop before writing in non-interactive mode, otherwise
///    ask for confirmation unless disabled in the configuration
/// 5. Rewrite manifests
///
/// # Arguments
///
/// * `source` - Commit history
/// * `args` - Workflow arguments (root, since, force, dry_run, interactive)
/// * `config` - Loaded configuration
/// * `confirm` - Called with the plan before anything is written
pub fn run_release_workflow<S, F>(source: &S, args: &WorkflowArgs, config: &Config, confirm: F) -> Result<WorkflowResult>
where
    S: CommitSource,
    F: FnOnce(&WorkflowReport) -> Result<bool>,
{
    let mut report = plan_release(source, args, config)?;

    if args.dry_run {
        debug!("dry run, nothing written");
        return Ok(WorkflowResult {
            report,
            written: Vec::new(),
            dry_run: true,
            confirmed: false,
        });
    }

    ReleaseError::aggregate(std::mem::take(&mut report.errors))?;

    let has_writes = report.pending_writes().next().is_some();
    let declined = if args.force || !has_writes {
        false
    } else if !args.interactive {
        debug!("non-interactive run without force, nothing written");
        true
    } else {
        config.behavior.confirm_writes && !confirm(&report)?
    };

    if declined {
        return Ok(WorkflowResult {
            report,
            written: Vec::new(),
            dry_run: false,
            confirmed: false,
        });
    }

    let written = apply_release(&mut report)?;

    Ok(WorkflowResult {
        report,
        written,
        dry_run: false,
        confirmed: true,
    })
}
