//! Service provider interface for pluggable data formats.
//!
//! This crate defines the traits a data format and its provider implement,
//! the registry that collects them, and the tree and XPath abstractions
//! the XML format is built on.

pub mod error;
pub mod format;
pub mod names;
pub mod provider;
pub mod registry;
pub mod tree;
pub mod xpath;

pub use error::{Error, Result};
pub use format::{DataFormat, DataFormatConfigurator, DataFormatReader, DataFormatWriter};
pub use names::XML_DATAFORMAT_NAME;
pub use provider::DataFormatProvider;
pub use registry::{DataFormatRegistry, DataFormatRegistryBuilder};
pub use tree::{MutableXmlTree, NodeType, XmlTree};
pub use xpath::{NamespaceContext, XPathEngine, XPathItem};
