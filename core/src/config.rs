use crate::decoder::DecodeOptions;
use serde::{Deserialize, Serialize};

/// Converter settings.
/// Load from a JSON file with ConvertConfig::load(); tests use Default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// `Set` header for events built from tabular input.
    pub set_name:              String,
    /// `Short` header for events built from tabular input.
    pub short_name:            String,
    /// Accept results that stop before the last scheduled race.
    pub allow_partial_results: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            set_name:              "Town Bumps".to_string(),
            short_name:            "Short".to_string(),
            allow_partial_results: false,
        }
    }
}

impl ConvertConfig {
    /// Read a JSON config file. Missing keys fall back to the defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ConvertConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            allow_partial: self.allow_partial_results,
        }
    }
}
