//! # staged-review
//!
//! AI-powered pre-commit code review for staged changes.
//!
//! Inspects the files staged for commit, fetches each file's full
//! content alongside its staged delta, and sends both to a remote
//! review service, printing per-file reviews as they complete. One
//! file's failure never aborts the others.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod git;
pub mod laas;
pub mod review;
pub mod settings;

pub use crate::cli::Cli;

/// The current version of staged-review.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
