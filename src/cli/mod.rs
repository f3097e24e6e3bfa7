//! Command-line workflow

pub mod orchestration;

pub use orchestration::{
    apply_release, plan_release, run_release_workflow, PlannedRelease, WorkflowArgs, WorkflowReport,
    WorkflowResult,
};
