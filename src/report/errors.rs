use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Malformed report: {0}")]
    Malformed(String),
}

impl ReportError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ReportError::Malformed(reason.into())
    }
}
