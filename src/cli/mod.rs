//! Driver-side workflows shared by the binary and programmatic callers.

pub mod orchestration;

pub use orchestration::{
    current_versions, run_bump_workflow, BumpWorkflowArgs, FileBump, WorkflowResult,
};
