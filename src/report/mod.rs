//! Report Module
//!
//! - `render`: fixed-layout plain-text summary
//! - `writer`: single output file, overwritten each run

pub mod render;
pub mod writer;

pub use render::{percent, render_report, ReportInput};
pub use writer::{write_report, ReportError};
