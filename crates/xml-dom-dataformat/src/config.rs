//! Configuration of the DOM XML data format

use dataformat_traits::{
    error::{Error, Result},
    format::{DataFormat, DataFormatConfigurator},
    names::XML_DATAFORMAT_NAME,
};
use serde::{Deserialize, Serialize};

use crate::format::DomXmlDataFormat;

/// Default number of characters inspected when sniffing input
pub const DEFAULT_READ_LIMIT: usize = 256;

/// Settings of a [`DomXmlDataFormat`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomXmlConfig {
    /// Indent serialized output
    pub pretty_print: bool,
    /// Accept documents carrying a DOCTYPE declaration. The declaration is
    /// dropped before parsing; entities declared in it are not expanded.
    pub allow_doctype: bool,
    /// Characters inspected by `can_read`
    pub read_limit: usize,
}

impl Default for DomXmlConfig {
    fn default() -> Self {
        Self {
            pretty_print: true,
            allow_doctype: false,
            read_limit: DEFAULT_READ_LIMIT,
        }
    }
}

/// Applies a [`DomXmlConfig`] to the registered XML format
#[derive(Debug, Clone, Default)]
pub struct DomXmlDataFormatConfigurator {
    config: DomXmlConfig,
}

impl DomXmlDataFormatConfigurator {
    pub fn new(config: DomXmlConfig) -> Self {
        Self { config }
    }
}

impl DataFormatConfigurator for DomXmlDataFormatConfigurator {
    fn data_format_name(&self) -> &str {
        XML_DATAFORMAT_NAME
    }

    fn configure(&self, format: &mut dyn DataFormat) -> Result<()> {
        let name = format.name().to_string();
        let format = format.downcast_mut::<DomXmlDataFormat>().ok_or_else(|| {
            Error::config(format!("data format '{}' is not a DOM XML data format", name))
        })?;
        *format.config_mut() = self.config.clone();
        Ok(())
    }
}
