use std::hash::{Hash, Hasher};

use h5filters_options::{
    filter::blosc::BloscCompressor, Configuration, EncodeOptions, FilterMetadata,
    InvalidParameterError,
};
use h5filters_plugin::BuildCapability;
use h5filters_registry::filter::{BLOSC_ID, FCIDECOMP_ID};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::config::build_config;

mod plugins;

/// A filter creation error.
#[derive(Debug, Error)]
pub enum FilterCreateError {
    /// The filter name is not supported.
    #[error("filter {0} is not supported")]
    Unsupported(String),
    /// The filter configuration does not match the filter.
    #[error("invalid {name} filter configuration: {source}")]
    ConfigurationInvalid {
        /// The filter name.
        name: &'static str,
        /// The deserialization error.
        source: serde_json::Error,
    },
    /// A filter parameter is invalid.
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),
}

/// A filter plugin, creating a [`FilterDescriptor`] from a filter configuration.
pub struct FilterPlugin {
    name: &'static str,
    create_fn: fn(configuration: &Configuration) -> Result<FilterDescriptor, FilterCreateError>,
}
inventory::collect!(FilterPlugin);

impl FilterPlugin {
    /// Create a new plugin for registration.
    pub const fn new(
        name: &'static str,
        create_fn: fn(configuration: &Configuration) -> Result<FilterDescriptor, FilterCreateError>,
    ) -> Self {
        Self { name, create_fn }
    }

    /// Create a new plugin for the typed configuration `C`.
    #[must_use]
    pub const fn new_typed<C: EncodeOptions + DeserializeOwned>() -> Self {
        Self::new(C::FILTER_NAME, create_typed::<C>)
    }

    /// The filter name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this plugin is associated with `name`.
    #[must_use]
    pub fn match_name(&self, name: &str) -> bool {
        self.name == name
    }

    /// Create a [`FilterDescriptor`] from `configuration`.
    ///
    /// # Errors
    /// Returns a [`FilterCreateError`] if the configuration is invalid.
    pub fn create(&self, configuration: &Configuration) -> Result<FilterDescriptor, FilterCreateError> {
        (self.create_fn)(configuration)
    }
}

fn create_typed<C: EncodeOptions + DeserializeOwned>(
    configuration: &Configuration,
) -> Result<FilterDescriptor, FilterCreateError> {
    let configuration: C =
        configuration
            .to_typed()
            .map_err(|source| FilterCreateError::ConfigurationInvalid {
                name: C::FILTER_NAME,
                source,
            })?;
    FilterDescriptor::from_configuration(&configuration)
}

/// The arguments for the HDF5 dataset creation call: the filter identifier and its options.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct CompressionArgs {
    /// The HDF5 filter identifier.
    pub compression: u32,
    /// The filter options (`cd_values`).
    pub compression_opts: Vec<u32>,
}

/// A configured HDF5 compression filter.
///
/// Descriptors are equal if their filter identifier and options are equal.
#[derive(Clone, Debug)]
pub struct FilterDescriptor {
    filter_id: u32,
    filter_name: &'static str,
    options: Vec<u32>,
}

impl PartialEq for FilterDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.filter_id == other.filter_id && self.options == other.options
    }
}

impl Eq for FilterDescriptor {}

impl Hash for FilterDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filter_id.hash(state);
        self.options.hash(state);
    }
}

fn required_capability(filter_id: u32, options: &[u32]) -> Option<BuildCapability> {
    match filter_id {
        FCIDECOMP_ID => Some(BuildCapability::Cpp11),
        BLOSC_ID if options.get(6) == Some(&BloscCompressor::Snappy.code()) => {
            Some(BuildCapability::Cpp11)
        }
        _ => None,
    }
}

impl FilterDescriptor {
    /// Create a filter descriptor for the filter `name` with `configuration`.
    ///
    /// # Errors
    /// Returns a [`FilterCreateError`] if `name` is not a supported filter or `configuration` is invalid.
    pub fn new(name: &str, configuration: &Configuration) -> Result<Self, FilterCreateError> {
        for plugin in inventory::iter::<FilterPlugin> {
            if plugin.match_name(name) {
                return plugin.create(configuration);
            }
        }
        Err(FilterCreateError::Unsupported(name.to_string()))
    }

    /// Create a filter descriptor from filter metadata.
    ///
    /// # Errors
    /// Returns a [`FilterCreateError`] if the filter is not supported or its configuration is invalid.
    pub fn from_metadata(metadata: &FilterMetadata) -> Result<Self, FilterCreateError> {
        Self::new(metadata.name(), metadata.configuration())
    }

    /// Create a filter descriptor from a typed filter configuration.
    ///
    /// The filter plugins are registered with HDF5 on the first descriptor creation, see [`init`](crate::init).
    /// If the native plugin needs a build capability the plugins were built without, an error is logged but the descriptor is still created.
    ///
    /// # Errors
    /// Returns [`FilterCreateError::InvalidParameter`] if a parameter is invalid.
    pub fn from_configuration<C: EncodeOptions>(configuration: &C) -> Result<Self, FilterCreateError> {
        crate::init();
        let options = configuration.encode_options()?;
        if let Some(capability) = required_capability(C::FILTER_ID, &options) {
            if !build_config().has(capability) {
                log::error!(
                    "{} filter requires {capability:?}, which is not available in this build",
                    C::FILTER_NAME
                );
            }
        }
        Ok(Self {
            filter_id: C::FILTER_ID,
            filter_name: C::FILTER_NAME,
            options,
        })
    }

    /// The HDF5 filter identifier.
    #[must_use]
    pub const fn filter_id(&self) -> u32 {
        self.filter_id
    }

    /// The filter name.
    #[must_use]
    pub const fn filter_name(&self) -> &'static str {
        self.filter_name
    }

    /// The filter options.
    #[must_use]
    pub fn options(&self) -> &[u32] {
        &self.options
    }

    /// The arguments for the HDF5 dataset creation call.
    #[must_use]
    pub fn compression_args(&self) -> CompressionArgs {
        CompressionArgs {
            compression: self.filter_id,
            compression_opts: self.options.clone(),
        }
    }
}
