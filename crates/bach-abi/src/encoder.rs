//! Signature-driven encoder: resolves type strings, normalizes values, encodes

use std::slice;
use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use crate::cache::TypeCache;
use crate::config::EncoderConfig;
use crate::encode::encode_validated;
use crate::error::Result;
use crate::normalize::normalize_params;
use crate::parser::{parse_function_signature, parse_type_with_depth};
use crate::selector::selector_of;
use crate::types::ParamType;
use crate::word::to_hex;

/// ABI parameter encoder
///
/// Owns its configuration and, unless disabled, a cache of parsed type
/// signatures. Shareable across threads.
pub struct AbiEncoder {
    config: EncoderConfig,
    cache: Option<TypeCache>,
}

impl AbiEncoder {
    /// Create an encoder with the given configuration
    pub fn new(config: EncoderConfig) -> Self {
        let cache = config
            .cache_types
            .then(|| TypeCache::new(config.max_depth));
        Self { config, cache }
    }

    /// Active configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Type cache, if enabled
    pub fn cache(&self) -> Option<&TypeCache> {
        self.cache.as_ref()
    }

    /// Resolve a type signature, going through the cache when enabled
    pub fn resolve(&self, signature: &str) -> Result<Arc<ParamType>> {
        match &self.cache {
            Some(cache) => cache.get_or_parse(signature),
            None => parse_type_with_depth(signature, self.config.max_depth).map(Arc::new),
        }
    }

    /// Encode parameters to raw bytes
    pub fn encode_bytes<S: AsRef<str>>(&self, types: &[S], values: &[Value]) -> Result<Vec<u8>> {
        let resolved = types
            .iter()
            .map(|t| self.resolve(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let refs: Vec<&ParamType> = resolved.iter().map(Arc::as_ref).collect();
        encode_resolved(&refs, values)
    }

    /// Encode parameters to a `0x`-prefixed lowercase hex string
    pub fn encode_parameters<S: AsRef<str>>(&self, types: &[S], values: &[Value]) -> Result<String> {
        self.encode_bytes(types, values).map(|bytes| to_hex(&bytes))
    }

    /// Encode a single parameter
    pub fn encode_parameter(&self, ty: &str, value: &Value) -> Result<String> {
        self.encode_parameters(&[ty], slice::from_ref(value))
    }

    /// Encode a function call: selector followed by the encoded parameters
    ///
    /// Parameter types come from the signature, e.g. `transfer(address,uint256)`.
    pub fn encode_function_call(&self, signature: &str, values: &[Value]) -> Result<String> {
        let function = parse_function_signature(signature, self.config.max_depth)?;
        let refs: Vec<&ParamType> = function.inputs.iter().collect();
        let encoded = encode_resolved(&refs, values)?;

        let mut data = selector_of(&function.canonical()).to_vec();
        data.extend(encoded);
        Ok(to_hex(&data))
    }
}

impl Default for AbiEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

fn encode_resolved(types: &[&ParamType], values: &[Value]) -> Result<Vec<u8>> {
    // full normalize pass first: errors surface before any byte is written
    let tokens = normalize_params(types, values)?;
    trace!(params = tokens.len(), "normalized parameters");
    encode_validated(types.iter().copied().zip(tokens.iter()))
}
