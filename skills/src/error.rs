//! Error types for loading matcher tables and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a matcher.
///
/// Scoring itself never fails; these only come from reading or parsing
/// related-skills tables and matcher configuration.
#[derive(Debug, Error)]
pub enum SkillError {
    /// Failed to read a table or config file.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a related-skills table.
    #[error("failed to parse related-skills table: {0}")]
    ParseTable(#[source] serde_yaml::Error),

    /// Failed to parse matcher configuration.
    #[error("failed to parse matcher config: {0}")]
    ParseConfig(#[source] serde_yaml::Error),

    /// Weights that would break the scoring rules.
    #[error("invalid match weights: {reason}")]
    InvalidWeights {
        /// Which rule was violated.
        reason: String,
    },
}
