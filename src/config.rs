//! Loader configuration.
//!
//! [`LoaderConfig`] controls how a JMdict document is read into the markup tree:
//! which root element is required, how DTD entity references are treated and
//! which text encoding the source uses. It can be built in code or read from a
//! JSON file.
//!
//! # Examples
//!
//! ```
//! use jmdict::config::LoaderConfig;
//!
//! # fn main() -> jmdict::Result<()> {
//! let config = LoaderConfig::from_json_str(r#"{ "strict_entities": true }"#)?;
//! assert!(config.strict_entities);
//! assert_eq!(config.root_tag, "JMdict");
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Default name of the JMdict document element.
pub const DEFAULT_ROOT_TAG: &str = "JMdict";

/// Configuration for loading JMdict documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Name of the required document element, compared ASCII case-insensitively
    pub root_tag: String,
    /// Replace `&name;` references with the text declared in the DOCTYPE
    pub expand_entities: bool,
    /// Fail on references to undeclared entities instead of keeping them verbatim
    pub strict_entities: bool,
    /// Source encoding label (e.g. "utf-8", "utf-16le"); empty means sniff the BOM
    pub encoding_label: String,
    /// Percentage of entries between two progress callbacks
    pub report_interval_percent: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            root_tag: DEFAULT_ROOT_TAG.to_string(),
            expand_entities: true,
            strict_entities: false,
            encoding_label: String::new(),
            report_interval_percent: 10,
        }
    }
}

impl LoaderConfig {
    /// Parses a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
