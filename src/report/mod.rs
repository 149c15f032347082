// Public API - what other modules can use
pub use errors::ReportError;
pub use models::{AngleResult, Attempt, ScoreCard, MAX_TRIES};
pub use parser::{parse_report, REPORT_TAG};

// Internal modules
mod errors;
pub mod models;
pub mod parser;
