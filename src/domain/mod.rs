//! Domain Layer - Core types for the index analysis
//!
//! Pure data with no I/O. Everything the analyses consume or produce:
//! - `observation`: dated closes and the validated `History`
//! - `regime`: bull/bear regime intervals

pub mod observation;
pub mod regime;

pub use observation::{History, HistoryValidationError, Observation};
pub use regime::{Regime, RegimeKind};
