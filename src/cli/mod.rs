pub mod orchestration;

pub use orchestration::{
    ReleaseContext, ReleaseOutcome, ReleasePlan, ReleaseRequest, ReleaseWorkflow,
};
