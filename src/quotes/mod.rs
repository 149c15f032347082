// Public API - what other modules can use
pub use errors::QuoteError;
pub use models::QuoteEntry;
pub use repository::{InMemoryQuoteRepository, PostgresQuoteRepository, QuoteRepository};
pub use service::QuoteService;

// Internal modules
mod errors;
pub mod models;
pub mod repository;
pub mod service;
