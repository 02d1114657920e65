//! HDF5 filter configurations and compression options encoding for the `h5filters` crate.
//!
//! Every filter supported by `h5filters` has a configuration type in [`filter`].
//! A configuration holds the high-level, named parameters of a filter (e.g. the compressor and compression level of `blosc`) and encodes them to the filter's `compression_opts`, the fixed sequence of [`u32`] words read by the native HDF5 filter plugin.
//!
//! There is no schema at this boundary: the native plugin interprets the words purely by position.
//! The encodings in this crate therefore match the layout expected by each plugin bit for bit.
//!
//! ```rust
//! # use h5filters_options::filter::blosc::{BloscCompressor, BloscConfiguration, BloscShuffle};
//! let configuration = BloscConfiguration::new(BloscCompressor::Zstd, 5, BloscShuffle::Shuffle);
//! assert_eq!(configuration.encode().unwrap(), [0, 0, 0, 0, 5, 1, 5]);
//! ```
//!
//! ## Licence
//! `h5filters_options` is licensed under either of
//!  - the Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license <http://opensource.org/licenses/MIT>, at your option.

use thiserror::Error;

mod configuration;
pub use configuration::{Configuration, FilterMetadata};

mod float;
pub use float::{pack_f64_be, pack_f64_ne, unpack_f64_be, unpack_f64_ne};

pub mod filter;

/// An invalid filter parameter error.
///
/// Raised when the parameters of a filter are out of range or contradict each other.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid {filter} filter parameter: {reason}")]
pub struct InvalidParameterError {
    filter: &'static str,
    reason: String,
}

impl InvalidParameterError {
    /// Create a new [`InvalidParameterError`].
    #[must_use]
    pub fn new(filter: &'static str, reason: impl Into<String>) -> Self {
        Self {
            filter,
            reason: reason.into(),
        }
    }

    /// The name of the filter with the invalid parameter.
    #[must_use]
    pub const fn filter(&self) -> &'static str {
        self.filter
    }

    /// The reason the parameter is invalid.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Encode a filter configuration to its `compression_opts`.
pub trait EncodeOptions {
    /// The name of the filter the configuration belongs to.
    const FILTER_NAME: &'static str;

    /// The HDF5 identifier of the filter the configuration belongs to.
    const FILTER_ID: u32;

    /// Validate the configuration and encode it to the options read by the native filter.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if a parameter is out of range or parameters conflict.
    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError>;
}
