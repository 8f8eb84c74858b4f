//! Provider of the DOM XML data format

use dataformat_traits::{
    format::DataFormat, names::XML_DATAFORMAT_NAME, provider::DataFormatProvider,
};

use crate::format::DomXmlDataFormat;

/// Provides the [`DomXmlDataFormat`] with default configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct DomXmlDataFormatProvider;

impl DataFormatProvider for DomXmlDataFormatProvider {
    fn data_format_name(&self) -> &str {
        XML_DATAFORMAT_NAME
    }

    fn create_instance(&self) -> Box<dyn DataFormat> {
        Box::new(DomXmlDataFormat::new(XML_DATAFORMAT_NAME))
    }
}
