//! Registry of instantiated data formats

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::format::{DataFormat, DataFormatConfigurator};
use crate::names;
use crate::provider::DataFormatProvider;

/// Immutable set of data formats keyed by name
#[derive(Debug, Clone, Default)]
pub struct DataFormatRegistry {
    formats: BTreeMap<String, Arc<dyn DataFormat>>,
}

/// Collects providers and configurators for a [`DataFormatRegistry`]
#[derive(Default)]
pub struct DataFormatRegistryBuilder {
    providers: Vec<Box<dyn DataFormatProvider>>,
    configurators: Vec<Box<dyn DataFormatConfigurator>>,
}

impl DataFormatRegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider
    pub fn provider<P: DataFormatProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Add a configurator; configurators run in the order they were added
    pub fn configurator<C: DataFormatConfigurator + 'static>(mut self, configurator: C) -> Self {
        self.configurators.push(Box::new(configurator));
        self
    }

    /// Instantiate every provider once and apply matching configurators
    pub fn build(self) -> Result<DataFormatRegistry> {
        let mut formats: BTreeMap<String, Box<dyn DataFormat>> = BTreeMap::new();

        for provider in &self.providers {
            let name = provider.data_format_name().to_string();
            if formats.contains_key(&name) {
                return Err(Error::DuplicateDataFormat(name));
            }
            if !names::is_known(&name) {
                tracing::debug!(format = %name, "registering data format with an unlisted name");
            }
            let format = provider.create_instance();
            tracing::info!(format = %name, "registered data format");
            formats.insert(name, format);
        }

        for configurator in &self.configurators {
            let name = configurator.data_format_name();
            let format = formats
                .get_mut(name)
                .ok_or_else(|| Error::DataFormatNotFound(name.to_string()))?;
            configurator.configure(&mut **format)?;
            tracing::debug!(format = %name, "applied data format configurator");
        }

        Ok(DataFormatRegistry {
            formats: formats
                .into_iter()
                .map(|(name, format)| (name, Arc::from(format)))
                .collect(),
        })
    }
}

impl DataFormatRegistry {
    /// Start building a registry
    pub fn builder() -> DataFormatRegistryBuilder {
        DataFormatRegistryBuilder::new()
    }

    /// Look up a format by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn DataFormat>> {
        self.formats
            .get(name)
            .cloned()
            .ok_or_else(|| Error::DataFormatNotFound(name.to_string()))
    }

    /// Look up a format by name and recover its concrete type
    pub fn get_as<T: DataFormat + 'static>(&self, name: &str) -> Result<Arc<T>> {
        self.get(name)?
            .into_any()
            .downcast::<T>()
            .map_err(|_| {
                Error::DataFormatNotFound(format!("{} as {}", name, std::any::type_name::<T>()))
            })
    }

    /// Check whether a format is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.formats.keys().map(String::as_str).collect()
    }

    /// Number of registered formats
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Whether no formats are registered
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Find the first format, in name order, that recognizes `input`
    pub fn detect(&self, input: &str) -> Result<Arc<dyn DataFormat>> {
        self.formats
            .values()
            .find(|format| format.can_read(input))
            .cloned()
            .ok_or(Error::UnrecognizableInput)
    }
}
