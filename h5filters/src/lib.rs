//! HDF5 compression filters for Rust.
//!
//! `h5filters` configures the compression filters of a bundle of native HDF5 filter plugins and registers those plugins with the HDF5 runtime of the process.
//!
//! A [`FilterDescriptor`] is created from a filter configuration and exposes the two values the HDF5 dataset creation property list needs, the filter identifier and its `compression_opts`:
//! ```rust
//! # use h5filters::FilterDescriptor;
//! use h5filters::options::filter::blosc::{BloscCompressor, BloscConfiguration, BloscShuffle};
//!
//! let configuration = BloscConfiguration::new(BloscCompressor::Zstd, 5, BloscShuffle::Shuffle);
//! let descriptor = FilterDescriptor::from_configuration(&configuration)?;
//! let args = descriptor.compression_args();
//! assert_eq!(args.compression, 32001);
//! assert_eq!(args.compression_opts, vec![0, 0, 0, 0, 5, 1, 5]);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Descriptors can also be created from JSON filter metadata:
//! ```rust
//! # use h5filters::{FilterDescriptor, FilterMetadata};
//! let metadata: FilterMetadata = serde_json::from_str(r#"{"name": "zstd", "configuration": {"clevel": 9}}"#)?;
//! let descriptor = FilterDescriptor::from_metadata(&metadata)?;
//! assert_eq!(descriptor.options(), &[9]);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! The plugins embedded in the build are registered automatically on the first descriptor creation or the first call to a registration function, see [`init`].
//! The location of the plugins and of the HDF5 library is set through the [`config`].
//!
//! ## Crate Features
//! `h5filters` has no optional features.
//!
//! ## Licence
//! `h5filters` is licensed under either of
//!  - the Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license <http://opensource.org/licenses/MIT>, at your option.

pub mod config;

mod filter;
pub use filter::{CompressionArgs, FilterCreateError, FilterDescriptor, FilterPlugin};

mod registration;
pub use registration::{
    get_config, init, is_filter_available, register, register_filter, H5FiltersConfig,
};

pub use h5filters_options as options;
pub use h5filters_options::{Configuration, EncodeOptions, FilterMetadata, InvalidParameterError};
pub use h5filters_plugin::{
    Availability, BuildCapability, BuildConfig, FilterKey, FilterState, RegisterError,
};
pub use h5filters_registry::{filter_id, filter_name, FILTERS};
