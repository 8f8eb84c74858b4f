//! The data formats available to an application.
//!
//! `DataFormats` wraps a [`DataFormatRegistry`] preloaded with every
//! built-in provider enabled by cargo features, configured from a
//! [`DataFormatsConfig`]. A process-wide instance is available through
//! [`DataFormats::global`].
//!
//! ```rust,ignore
//! use dataformats::DataFormats;
//!
//! let formats = DataFormats::global()?;
//! let xml = formats.xml()?;
//! let document = xml.read_str("<root><item>Hello</item></root>")?;
//! println!("{}", document.xpath("//item").string()?);
//! ```

pub mod config;

use std::sync::Arc;

use dataformat_traits::{
    error::{Error, Result},
    names, DataFormat, DataFormatRegistry, DataFormatRegistryBuilder,
};
use once_cell::sync::OnceCell;

pub use config::DataFormatsConfig;
pub use dataformat_traits;

#[cfg(feature = "xml-dom")]
pub use xml_dom_dataformat;
#[cfg(feature = "xml-dom")]
use xml_dom_dataformat::{DomXmlDataFormat, DomXmlDataFormatConfigurator, DomXmlDataFormatProvider};

static GLOBAL: OnceCell<DataFormats> = OnceCell::new();

/// Registry of the built-in data formats
#[derive(Debug, Clone)]
pub struct DataFormats {
    registry: DataFormatRegistry,
}

impl DataFormats {
    /// Name of the XML data format
    pub const XML_DATAFORMAT_NAME: &'static str = names::XML_DATAFORMAT_NAME;

    /// Register the built-in providers and apply `config`
    pub fn load(config: &DataFormatsConfig) -> Result<Self> {
        let builder = register_builtin(DataFormatRegistry::builder(), config);
        let registry = builder.build()?;
        tracing::info!(formats = ?registry.names(), "loaded data formats");
        Ok(Self { registry })
    }

    /// Register the built-in providers with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::load(&DataFormatsConfig::default())
    }

    /// The process-wide instance, loaded with defaults on first use
    /// unless [`init_global`](Self::init_global) ran before
    pub fn global() -> Result<&'static DataFormats> {
        GLOBAL.get_or_try_init(Self::with_defaults)
    }

    /// Install a configured process-wide instance.
    ///
    /// Fails if the global instance was already initialized.
    pub fn init_global(config: &DataFormatsConfig) -> Result<&'static DataFormats> {
        let formats = Self::load(config)?;
        GLOBAL
            .set(formats)
            .map_err(|_| Error::config("data formats are already initialized"))?;
        Self::global()
    }

    /// The underlying registry
    pub fn registry(&self) -> &DataFormatRegistry {
        &self.registry
    }

    /// Look up a format by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn DataFormat>> {
        self.registry.get(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Find the format that recognizes `input`
    pub fn detect(&self, input: &str) -> Result<Arc<dyn DataFormat>> {
        self.registry.detect(input)
    }

    /// The XML data format
    #[cfg(feature = "xml-dom")]
    pub fn xml(&self) -> Result<Arc<DomXmlDataFormat>> {
        self.registry.get_as::<DomXmlDataFormat>(Self::XML_DATAFORMAT_NAME)
    }
}

#[cfg_attr(not(feature = "xml-dom"), allow(unused_mut, unused_variables))]
fn register_builtin(
    mut builder: DataFormatRegistryBuilder,
    config: &DataFormatsConfig,
) -> DataFormatRegistryBuilder {
    #[cfg(feature = "xml-dom")]
    {
        builder = builder.provider(DomXmlDataFormatProvider);
        if let Some(xml) = &config.xml {
            builder = builder.configurator(DomXmlDataFormatConfigurator::new(xml.clone()));
        }
    }
    builder
}
