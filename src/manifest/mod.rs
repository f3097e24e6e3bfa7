//! Package manifest (`package.json`) loading and rewriting.

pub mod loader;
pub mod rewrite;

pub use loader::{
    discover_workspaces, load_workspace, parse_workspace, workspace_patterns, write_manifest,
    MANIFEST_FILE,
};
pub use rewrite::rewrite_manifest;
