use crate::core::isomorphism::IsomorphismOptions;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Settings that control how a [`Topology`](super::Topology) deduplicates molecules.
///
/// Every field has a default, so a TOML file only needs to name what it changes:
///
/// ```toml
/// [isomorphism]
/// bond_stereochemistry_matching = false
/// max_steps = 100000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TopologyConfig {
    pub isomorphism: IsomorphismOptions,
}

impl TopologyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn isomorphism(mut self, options: IsomorphismOptions) -> Self {
        self.isomorphism = options;
        self
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}
