pub mod orchestration;

pub use orchestration::{plan_bump, run_bump_workflow, BumpPlan, BumpWorkflowArgs, WorkflowResult};
