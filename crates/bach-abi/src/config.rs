//! Encoder configuration

use serde::{Deserialize, Serialize};

/// Default limit on tuple/array nesting in a type signature
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Encoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Maximum nesting depth accepted by the type parser
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Memoize parsed type signatures
    #[serde(default = "default_cache_types")]
    pub cache_types: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_cache_types() -> bool {
    true
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            cache_types: default_cache_types(),
        }
    }
}

impl EncoderConfig {
    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable the type cache
    pub fn with_cache(mut self, cache_types: bool) -> Self {
        self.cache_types = cache_types;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.max_depth, 32);
        assert!(config.cache_types);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EncoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EncoderConfig::default());

        let config: EncoderConfig = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(config.max_depth, 4);
        assert!(config.cache_types);
    }

    #[test]
    fn test_builders() {
        let config = EncoderConfig::default().with_max_depth(3).with_cache(false);
        assert_eq!(config.max_depth, 3);
        assert!(!config.cache_types);
    }
}
