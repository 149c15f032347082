pub mod setup;

// Re-export main utilities for use by test files
pub use setup::{user, TestApp, TestAppBuilder};
