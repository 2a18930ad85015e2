//! Remote review-service integration.

pub mod client;
pub mod error;

pub use client::LaasClient;
pub use error::LaasError;
