pub mod playthrough;
pub mod reports;
pub mod tester;

pub use playthrough::{PlaythroughPlan, PlaythroughRunner, PlaythroughSummary, StepOrder};
pub use tester::*;
