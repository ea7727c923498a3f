//! CLI error types.

use docgen_core::{ConfigError, GenerateError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{count} template(s) failed")]
    Failures { count: usize },
}
