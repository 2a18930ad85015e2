//! CLI interface for staged-review.

use anyhow::Result;
use clap::Parser;

use crate::config::ReviewConfig;
use crate::laas::LaasClient;
use crate::review;

/// staged-review: AI-powered pre-commit code review.
#[derive(Parser)]
#[command(name = "staged-review")]
#[command(about = "Reviews staged changes with an AI reviewer", long_about = None)]
#[command(version)]
pub struct Cli {}

impl Cli {
    /// Executes the review run. This is the tool's single action; it is
    /// intended to be invoked directly or from a pre-commit hook.
    pub async fn execute(self) -> Result<()> {
        let config = ReviewConfig::from_env()?;
        let client = LaasClient::new(&config);
        review::run(&config, &client).await
    }
}
