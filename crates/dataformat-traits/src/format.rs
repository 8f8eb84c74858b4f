//! Data format abstraction traits

use std::any::Any;
use std::fmt::Debug;
use std::io::Write;
use std::sync::Arc;

use crate::error::Result;

/// A named strategy for converting between text and a structured
/// in-memory representation.
///
/// Instances are looked up by name in a registry and handed out as
/// `Arc<dyn DataFormat>`. The `Any` accessors let callers recover the
/// concrete format type to reach its typed reader and writer.
pub trait DataFormat: Send + Sync + Debug {
    /// Name the format is registered under
    fn name(&self) -> &str;

    /// Check whether this format recognizes the given input
    fn can_read(&self, input: &str) -> bool;

    /// Borrow as `Any` for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as `Any` for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Convert a shared handle into a shared `Any` for downcasting
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<'a> dyn DataFormat + 'a {
    /// Downcast a borrowed format to its concrete type
    pub fn downcast_ref<T: DataFormat + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast a mutably borrowed format to its concrete type
    pub fn downcast_mut<T: DataFormat + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Reads text into a format's in-memory representation
pub trait DataFormatReader {
    /// The in-memory representation produced by this reader
    type Output;

    /// Check whether the first `read_limit` characters of `input` look
    /// like something this reader understands
    fn can_read(&self, input: &str, read_limit: usize) -> bool;

    /// Read the whole input
    fn read_input(&self, input: &str) -> Result<Self::Output>;
}

/// Writes a format's in-memory representation as text
pub trait DataFormatWriter {
    /// The in-memory representation consumed by this writer
    type Input: ?Sized;

    /// Write `input` to `writer`
    fn write_to_writer(&self, writer: &mut dyn Write, input: &Self::Input) -> Result<()>;

    /// Write `input` into a new string
    fn write_to_string(&self, input: &Self::Input) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer, input)?;
        String::from_utf8(buffer).map_err(|e| crate::Error::Other(e.to_string()))
    }
}

/// Adjusts a freshly created format before it is registered
pub trait DataFormatConfigurator: Send + Sync {
    /// Name of the format this configurator applies to
    fn data_format_name(&self) -> &str;

    /// Apply configuration to the format
    fn configure(&self, format: &mut dyn DataFormat) -> Result<()>;
}
