pub mod orchestrator;
pub mod prompts;
pub mod report;

pub use orchestrator::{Orchestrator, validate_instrument_name};
pub use report::{Analysis, AnalysisField, AnalysisResult};
