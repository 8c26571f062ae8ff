//! Function selectors

use sha3::{Digest, Keccak256};

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::Result;
use crate::parser::parse_function_signature;

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute function selector (first 4 bytes of keccak256(signature))
///
/// The signature is parsed and re-rendered in canonical form first, so
/// `transfer(address,uint)` and `transfer(address,uint256)` agree.
pub fn function_selector(signature: &str) -> Result<[u8; 4]> {
    let canonical = parse_function_signature(signature, DEFAULT_MAX_DEPTH)?.canonical();
    Ok(selector_of(&canonical))
}

/// Selector of an already-canonical signature
pub(crate) fn selector_of(canonical: &str) -> [u8; 4] {
    let hash = keccak256(canonical.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}
