//! Review run configuration.
//!
//! The remote-service identifiers and the reviewed-extension set are
//! compiled-in defaults; only the API key comes from the environment.
//! Validation is a fail-fast gate: commands should build the config
//! before any git or network work so a missing credential is reported
//! once, with nothing else attempted.

use anyhow::Result;

use crate::settings;

/// Environment variable carrying the review-service API key.
pub const API_KEY_VAR: &str = "LAAS_API_KEY";

/// Project identifier sent with every review request.
const PROJECT_ID: &str = "CODE_REVIEW";

/// Opaque preset identifier selecting the server-side review behavior.
const PRESET_HASH: &str = "a1d2f5c9e8b34f6d9c0a7e21b8d4c3f5";

/// File suffixes that qualify for review.
const FILE_EXTENSIONS: &[&str] = &[".ts", ".tsx"];

/// Immutable process-wide review configuration.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    /// Review-service API key. Required, never empty.
    pub api_key: String,
    /// Project identifier sent as the `project` header.
    pub project_id: &'static str,
    /// Preset hash sent in the request body.
    pub preset_hash: &'static str,
    /// Suffixes a staged path must end with to qualify for review.
    pub file_extensions: Vec<String>,
}

impl ReviewConfig {
    /// Builds the configuration from the environment, validating the
    /// API key before anything else runs.
    pub fn from_env() -> Result<Self> {
        let api_key = settings::get_env_var(API_KEY_VAR).map_err(|_| missing_key_error())?;

        if api_key.trim().is_empty() {
            return Err(missing_key_error());
        }

        Ok(Self {
            api_key,
            project_id: PROJECT_ID,
            preset_hash: PRESET_HASH,
            file_extensions: FILE_EXTENSIONS.iter().map(ToString::to_string).collect(),
        })
    }

    /// Builds a configuration with an explicit key, for tests and
    /// embedding. The compiled-in identifiers still apply.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: PROJECT_ID,
            preset_hash: PRESET_HASH,
            file_extensions: FILE_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

fn missing_key_error() -> anyhow::Error {
    anyhow::anyhow!(
        "Review service API key not found.\n\
         Set the {API_KEY_VAR} environment variable (a .env file in the\n\
         working directory is also honored)."
    )
}
