//! # bach-abi
//!
//! Contract ABI parameter encoding for BachLedger.
//!
//! ## Features
//!
//! - **Type parser**: Solidity type signatures (`uint256`, `bytes32[2]`,
//!   `tuple(address,string)[]`) into a recursive type descriptor
//! - **Normalizer**: JSON values (numbers, decimal or hex strings, arrays)
//!   checked against a type and converted into [`Token`]s
//! - **Encoder**: head/tail ABI layout with offsets, length prefixes and
//!   32-byte padding
//! - **Selectors**: keccak-256 function selectors from canonical signatures
//!
//! ## Quick Start
//!
//! ```rust
//! use bach_abi::encode_parameters;
//! use serde_json::json;
//!
//! let encoded = encode_parameters(&["uint256", "string"], &[json!("2345675643"), json!("Hello!%")])?;
//! assert!(encoded.starts_with("0x000000000000000000000000000000000000000000000000000000008bd02b7b"));
//! # Ok::<(), bach_abi::AbiError>(())
//! ```
//!
//! ## Function Calls
//!
//! ```rust
//! use bach_abi::{encode_function_call, function_selector};
//! use serde_json::json;
//!
//! assert_eq!(function_selector("transfer(address,uint256)")?, [0xa9, 0x05, 0x9c, 0xbb]);
//!
//! let data = encode_function_call(
//!     "transfer(address,uint256)",
//!     &[json!("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d"), json!(1000)],
//! )?;
//! assert!(data.starts_with("0xa9059cbb"));
//! # Ok::<(), bach_abi::AbiError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod cache;
pub mod config;
pub mod encode;
mod encoder;
mod error;
pub mod normalize;
pub mod parser;
pub mod selector;
pub mod types;
pub mod word;

use once_cell::sync::Lazy;
use serde_json::Value;

// Re-export main types
pub use address::{Address, AddressError};
pub use config::{EncoderConfig, DEFAULT_MAX_DEPTH};
pub use encode::{encode, encode_tokens, encode_with_selector};
pub use encoder::AbiEncoder;
pub use error::{AbiError, Result};
pub use normalize::{check_token, normalize};
pub use parser::{parse_function_signature, parse_type, FunctionSignature};
pub use selector::{function_selector, keccak256};
pub use types::{Kind, ParamType, Token, I256};

// Re-export primitives for convenience
pub use primitive_types::U256;

static DEFAULT_ENCODER: Lazy<AbiEncoder> = Lazy::new(AbiEncoder::default);

/// Process-wide encoder with the default configuration
pub fn default_encoder() -> &'static AbiEncoder {
    &DEFAULT_ENCODER
}

/// Encode a parameter list to a `0x`-prefixed hex string
pub fn encode_parameters(types: &[&str], values: &[Value]) -> Result<String> {
    DEFAULT_ENCODER.encode_parameters(types, values)
}

/// Encode a single parameter to a `0x`-prefixed hex string
pub fn encode_parameter(ty: &str, value: &Value) -> Result<String> {
    DEFAULT_ENCODER.encode_parameter(ty, value)
}

/// Encode a parameter list to raw bytes
pub fn encode_parameters_raw(types: &[&str], values: &[Value]) -> Result<Vec<u8>> {
    DEFAULT_ENCODER.encode_bytes(types, values)
}

/// Encode a function call (selector + parameters) to a `0x`-prefixed hex string
pub fn encode_function_call(signature: &str, values: &[Value]) -> Result<String> {
    DEFAULT_ENCODER.encode_function_call(signature, values)
}
