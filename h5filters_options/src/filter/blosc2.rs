//! The `blosc2` filter configuration.
//!
//! ### Configuration Example - [`Blosc2Configuration`]:
//! ```rust
//! # let JSON = r#"
//! {
//!     "cname": "zstd",
//!     "clevel": 3,
//!     "filters": 3
//! }
//! # "#;
//! # use h5filters_options::filter::blosc2::Blosc2Configuration;
//! # serde_json::from_str::<Blosc2Configuration>(JSON).unwrap();
//! ```

use derive_more::Display;
use h5filters_registry::filter::{BLOSC2, BLOSC2_ID};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::blosc::{BloscCompressor, BLOSC_CLEVEL_MAX};
use crate::{EncodeOptions, InvalidParameterError};

/// The blosc2 pre-compression filter.
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Blosc2Filter {
    /// No pre-compression filter.
    NoFilter = 0,
    /// Byte-wise shuffle.
    #[default]
    Shuffle = 1,
    /// Bit-wise shuffle.
    BitShuffle = 2,
    /// Store blocks diff'ed with respect to the first block of the chunk.
    Delta = 3,
    /// Zero the least significant bits of the mantissa of `float32` and `float64` data.
    TruncPrec = 4,
}

/// `blosc2` filter configuration parameters.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Debug, Display)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct Blosc2Configuration {
    /// The compressor. `snappy` is not supported by `blosc2`.
    #[serde(default = "default_cname")]
    pub cname: BloscCompressor,
    /// The compression level, from 0 (no compression) to 9 (maximum compression).
    #[serde(default = "default_clevel")]
    pub clevel: u32,
    /// The pre-compression filter.
    #[serde(default)]
    pub filters: Blosc2Filter,
}

const fn default_cname() -> BloscCompressor {
    BloscCompressor::BloscLZ
}

const fn default_clevel() -> u32 {
    5
}

impl Default for Blosc2Configuration {
    fn default() -> Self {
        Self {
            cname: default_cname(),
            clevel: default_clevel(),
            filters: Blosc2Filter::default(),
        }
    }
}

impl Blosc2Configuration {
    /// Create a new `blosc2` configuration.
    #[must_use]
    pub const fn new(cname: BloscCompressor, clevel: u32, filters: Blosc2Filter) -> Self {
        Self {
            cname,
            clevel,
            filters,
        }
    }

    /// Encode the configuration to `(0, 0, 0, 0, clevel, filters, compressor)`.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if `clevel` is above 9 or the compressor is `snappy`.
    pub fn encode(&self) -> Result<[u32; 7], InvalidParameterError> {
        if self.cname == BloscCompressor::Snappy {
            return Err(InvalidParameterError::new(
                BLOSC2,
                "the snappy compressor is not supported",
            ));
        }
        if self.clevel > BLOSC_CLEVEL_MAX {
            return Err(InvalidParameterError::new(
                BLOSC2,
                format!("clevel {} is not in [0, 9]", self.clevel),
            ));
        }
        Ok([
            0,
            0,
            0,
            0,
            self.clevel,
            u32::from(self.filters as u8),
            self.cname.code(),
        ])
    }
}

impl EncodeOptions for Blosc2Configuration {
    const FILTER_NAME: &'static str = BLOSC2;
    const FILTER_ID: u32 = BLOSC2_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        self.encode().map(Vec::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blosc2_default() {
        assert_eq!(
            Blosc2Configuration::default().encode().unwrap(),
            [0, 0, 0, 0, 5, 1, 0]
        );
    }

    #[test]
    fn blosc2_delta_zstd() {
        let configuration: Blosc2Configuration =
            serde_json::from_str(r#"{"cname": "zstd", "clevel": 3, "filters": 3}"#).unwrap();
        assert_eq!(configuration.encode().unwrap(), [0, 0, 0, 0, 3, 3, 5]);
    }

    #[test]
    fn blosc2_snappy_unsupported() {
        let configuration =
            Blosc2Configuration::new(BloscCompressor::Snappy, 5, Blosc2Filter::NoFilter);
        assert!(configuration.encode().is_err());
    }

    #[test]
    fn blosc2_invalid_filters() {
        assert!(serde_json::from_str::<Blosc2Configuration>(r#"{"filters": 5}"#).is_err());
    }
}
