//! Data format provider trait

use crate::format::DataFormat;

/// Factory that names and instantiates one data format implementation.
///
/// A registry calls `create_instance` once per build; every call must
/// return a new, unshared instance that reports `data_format_name`.
pub trait DataFormatProvider: Send + Sync {
    /// Name of the data format this provider creates
    fn data_format_name(&self) -> &str;

    /// Create a new instance of the data format
    fn create_instance(&self) -> Box<dyn DataFormat>;
}
