//! Script engines the shared suite can be bound to.
//!
//! An engine decides how a case reaches the XML format. Everything after
//! the document is loaded is shared by all engines.

use dataformat_traits::{
    error::{Error, Result},
    names::XML_DATAFORMAT_NAME,
    DataFormat,
};
use dataformats::DataFormats;
use xml_dom_dataformat::{DomXmlDataFormat, XmlDocument};

/// Names accepted by [`engine_by_name`]
pub const ENGINE_NAMES: &[&str] = &[NativeEngine::NAME, RegistryEngine::NAME];

/// A call surface the shared suite runs under
pub trait ScriptEngine {
    /// Name used to bind tests to this engine
    fn name(&self) -> &'static str;

    /// Load the fixture document through this engine's call surface
    fn load(&self, xml: &str) -> Result<XmlDocument>;
}

/// Calls the typed XML format API directly
#[derive(Debug, Clone)]
pub struct NativeEngine {
    format: DomXmlDataFormat,
}

impl NativeEngine {
    pub const NAME: &'static str = "native";

    pub fn new() -> Self {
        Self {
            format: DomXmlDataFormat::new(XML_DATAFORMAT_NAME),
        }
    }
}

impl Default for NativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEngine for NativeEngine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn load(&self, xml: &str) -> Result<XmlDocument> {
        self.format.read_str(xml)
    }
}

/// Reaches the format only through the global registry: the input is
/// sniffed, the matching format looked up, and its concrete type recovered
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryEngine;

impl RegistryEngine {
    pub const NAME: &'static str = "registry";
}

impl ScriptEngine for RegistryEngine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn load(&self, xml: &str) -> Result<XmlDocument> {
        let format = DataFormats::global()?.detect(xml)?;
        let name = format.name().to_string();
        let format = format
            .into_any()
            .downcast::<DomXmlDataFormat>()
            .map_err(|_| Error::DataFormatNotFound(format!("{} is not a DOM XML format", name)))?;
        tracing::debug!(format = %name, "registry engine resolved format");
        format.read_str(xml)
    }
}

/// Look up an engine by its binding name
pub fn engine_by_name(name: &str) -> Result<Box<dyn ScriptEngine>> {
    match name {
        NativeEngine::NAME => Ok(Box::new(NativeEngine::new())),
        RegistryEngine::NAME => Ok(Box::new(RegistryEngine)),
        other => Err(Error::Other(format!(
            "unknown script engine '{}', expected one of {:?}",
            other, ENGINE_NAMES
        ))),
    }
}
