//! Names of the data formats known to this workspace.
//!
//! Providers report these names and the registry keys formats by them.

/// Name of the XML data format
pub const XML_DATAFORMAT_NAME: &str = "application/xml";

/// All known data format names
pub const KNOWN_DATAFORMAT_NAMES: &[&str] = &[XML_DATAFORMAT_NAME];

/// Check whether `name` is one of the known data format names
pub fn is_known(name: &str) -> bool {
    KNOWN_DATAFORMAT_NAMES.contains(&name)
}
