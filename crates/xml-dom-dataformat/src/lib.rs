//! DOM XML data format
//!
//! Reads XML into a xot-backed document, writes it back, and queries it
//! with XPath through the xee engine.

pub mod config;
pub mod format;
pub mod provider;
pub mod tree;
pub mod xpath;

// Re-export main types
pub use config::{DomXmlConfig, DomXmlDataFormatConfigurator};
pub use format::{DomXmlDataFormat, DomXmlDataFormatReader, DomXmlDataFormatWriter};
pub use provider::DomXmlDataFormatProvider;
pub use tree::{XmlAttribute, XmlDocument, XmlElement};
pub use xpath::{XPathQuery, XeeXPathEngine};

// Re-export key types for convenience
pub use xot::Node;
