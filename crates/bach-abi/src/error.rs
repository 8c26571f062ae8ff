//! ABI error types

use thiserror::Error;

/// Result alias for ABI operations
pub type Result<T> = std::result::Result<T, AbiError>;

/// ABI encoding error
///
/// Every variant is raised while parsing signatures or normalizing values,
/// before a single byte of output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Type signature does not match the grammar or nests too deeply
    #[error("malformed type `{signature}`: {reason}")]
    MalformedType {
        /// Offending signature
        signature: String,
        /// What went wrong
        reason: String,
    },

    /// Member count mismatch (parameter list, fixed array, tuple)
    #[error("arity mismatch at {path}: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Nesting path of the offending value
        path: String,
        /// Declared member count
        expected: usize,
        /// Supplied member count
        actual: usize,
    },

    /// Value shape incompatible with its type
    #[error("value mismatch at {path} for `{ty}`: {reason} (got {value})")]
    ValueMismatch {
        /// Nesting path of the offending value
        path: String,
        /// Canonical type signature
        ty: String,
        /// Rendering of the offending value
        value: String,
        /// What went wrong
        reason: String,
    },

    /// Integer outside the range of its declared width
    #[error("value out of range at {path} for `{ty}`: {value}")]
    ValueOutOfRange {
        /// Nesting path of the offending value
        path: String,
        /// Canonical type signature
        ty: String,
        /// Rendering of the offending value
        value: String,
    },
}

impl AbiError {
    pub(crate) fn malformed(signature: &str, reason: impl Into<String>) -> Self {
        AbiError::MalformedType {
            signature: signature.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn arity(path: &str, expected: usize, actual: usize) -> Self {
        AbiError::ArityMismatch {
            path: path.to_string(),
            expected,
            actual,
        }
    }

    /// Short name of the error kind, stable across messages
    pub fn kind(&self) -> &'static str {
        match self {
            AbiError::MalformedType { .. } => "MalformedType",
            AbiError::ArityMismatch { .. } => "ArityMismatch",
            AbiError::ValueMismatch { .. } => "ValueMismatch",
            AbiError::ValueOutOfRange { .. } => "ValueOutOfRange",
        }
    }
}
