//! Parsed type cache - memoizes type signatures across encode calls

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;
use crate::parser::parse_type_with_depth;
use crate::types::ParamType;

/// Read-through cache of parsed type signatures
///
/// Descriptors are immutable and shared behind `Arc`, so concurrent encode
/// calls can read and populate the cache without coordination beyond the
/// map's own sharded locks. Signatures that fail to parse are never stored.
/// Entries are keyed by the trimmed signature and live until [`clear`](Self::clear);
/// the cache is unbounded, so callers feeding arbitrary signatures should clear it
/// or disable caching in [`EncoderConfig`](crate::EncoderConfig).
pub struct TypeCache {
    /// Map from signature string to parsed type
    entries: DashMap<String, Arc<ParamType>>,
    /// Nesting limit applied on every miss
    max_depth: usize,
}

impl TypeCache {
    /// Create an empty cache parsing with the given nesting limit
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_depth,
        }
    }

    /// Return the cached type for `signature`, parsing and storing it on a miss
    pub fn get_or_parse(&self, signature: &str) -> Result<Arc<ParamType>> {
        let signature = signature.trim();
        if let Some(entry) = self.entries.get(signature) {
            return Ok(Arc::clone(entry.value()));
        }

        let parsed = Arc::new(parse_type_with_depth(signature, self.max_depth)?);
        debug!(signature, dynamic = parsed.is_dynamic(), "type cache miss");

        // another caller may have raced us here; keep whichever landed first
        let entry = self.entries.entry(signature.to_string()).or_insert(parsed);
        Ok(Arc::clone(&*entry))
    }

    /// Check whether a signature is cached
    pub fn contains(&self, signature: &str) -> bool {
        self.entries.contains_key(signature.trim())
    }

    /// Number of cached signatures
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached signatures
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for TypeCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_DEPTH)
    }
}
