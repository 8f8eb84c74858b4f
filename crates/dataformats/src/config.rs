//! TOML configuration for the built-in data formats

use std::path::Path;

use dataformat_traits::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[cfg(feature = "xml-dom")]
use xml_dom_dataformat::DomXmlConfig;

/// Configuration file contents.
///
/// ```toml
/// [xml]
/// pretty_print = false
/// allow_doctype = false
/// read_limit = 256
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataFormatsConfig {
    /// Settings for the XML format; defaults apply when absent
    #[cfg(feature = "xml-dom")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<DomXmlConfig>,
}

impl DataFormatsConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded data format configuration");
        Ok(config)
    }
}
