pub mod orchestrator;

pub use orchestrator::{AnalysisOrchestrator, AnalysisOutcome, OrchestratorError};
