use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("There is no quote at position {position}, the list has {len}")]
    InvalidPosition { position: i64, len: usize },

    #[error("Repository error: {0}")]
    Repository(String),
}
