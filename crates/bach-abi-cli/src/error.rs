//! CLI error types

use bach_abi::AbiError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Encoding error
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}

impl From<toml::ser::Error> for CliError {
    fn from(e: toml::ser::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abi_error_wrapped() {
        let err: CliError = AbiError::MalformedType {
            signature: "uint7".into(),
            reason: "bad width".into(),
        }
        .into();
        assert!(err.to_string().starts_with("ABI error: malformed type `uint7`"));
    }
}
