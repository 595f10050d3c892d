//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How many lines below a block label (e.g. "Invoiced To") the
    /// positional rules may look for values.
    pub lookahead_lines: usize,

    /// How many address lines to capture from the "Invoiced To" block.
    pub address_lines: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lookahead_lines: 5,
            address_lines: 2,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
