//! The `blosc` filter configuration.
//!
//! ### Configuration Example - [`BloscConfiguration`]:
//! ```rust
//! # let JSON = r#"
//! {
//!     "cname": "blosclz",
//!     "clevel": 9,
//!     "shuffle": 2
//! }
//! # "#;
//! # use h5filters_options::filter::blosc::BloscConfiguration;
//! # serde_json::from_str::<BloscConfiguration>(JSON).unwrap();
//! ```

use derive_more::Display;
use h5filters_registry::filter::{BLOSC, BLOSC_ID};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::{EncodeOptions, InvalidParameterError};

/// A blosc compressor.
///
/// The discriminants are the compressor codes of the `blosc` and `blosc2` filters and must not change.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug, Display, Default)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum BloscCompressor {
    /// `blosclz`.
    #[display("blosclz")]
    BloscLZ = 0,
    /// `lz4`.
    #[default]
    #[display("lz4")]
    LZ4 = 1,
    /// `lz4hc`.
    #[display("lz4hc")]
    LZ4HC = 2,
    /// `snappy`. Only available if the plugin was built with C++11.
    #[display("snappy")]
    Snappy = 3,
    /// `zlib`.
    #[display("zlib")]
    Zlib = 4,
    /// `zstd`.
    #[display("zstd")]
    Zstd = 5,
}

impl BloscCompressor {
    /// The compressor code written to the filter options.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// The blosc shuffle mode.
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
#[repr(u8)]
pub enum BloscShuffle {
    /// No shuffling.
    NoShuffle = 0,
    /// Byte-wise shuffling.
    #[default]
    Shuffle = 1,
    /// Bit-wise shuffling.
    BitShuffle = 2,
}

/// The highest blosc compression level.
pub const BLOSC_CLEVEL_MAX: u32 = 9;

/// `blosc` filter configuration parameters.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Debug, Display)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct BloscConfiguration {
    /// The compressor.
    #[serde(default)]
    pub cname: BloscCompressor,
    /// The compression level, from 0 (no compression) to 9 (maximum compression).
    #[serde(default = "default_clevel")]
    pub clevel: u32,
    /// The shuffle mode.
    #[serde(default)]
    pub shuffle: BloscShuffle,
}

const fn default_clevel() -> u32 {
    5
}

impl Default for BloscConfiguration {
    fn default() -> Self {
        Self {
            cname: BloscCompressor::default(),
            clevel: default_clevel(),
            shuffle: BloscShuffle::default(),
        }
    }
}

impl BloscConfiguration {
    /// Create a new `blosc` configuration.
    #[must_use]
    pub const fn new(cname: BloscCompressor, clevel: u32, shuffle: BloscShuffle) -> Self {
        Self {
            cname,
            clevel,
            shuffle,
        }
    }

    /// Encode the configuration to `(0, 0, 0, 0, clevel, shuffle, compressor)`.
    ///
    /// The first four words are reserved for the filter and are filled in by the plugin.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if `clevel` is above 9.
    pub fn encode(&self) -> Result<[u32; 7], InvalidParameterError> {
        if self.clevel > BLOSC_CLEVEL_MAX {
            return Err(InvalidParameterError::new(
                BLOSC,
                format!("clevel {} is not in [0, 9]", self.clevel),
            ));
        }
        Ok([
            0,
            0,
            0,
            0,
            self.clevel,
            u32::from(self.shuffle as u8),
            self.cname.code(),
        ])
    }
}

impl EncodeOptions for BloscConfiguration {
    const FILTER_NAME: &'static str = BLOSC;
    const FILTER_ID: u32 = BLOSC_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        self.encode().map(Vec::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blosc_zstd_shuffle() {
        let configuration = BloscConfiguration::new(BloscCompressor::Zstd, 5, BloscShuffle::Shuffle);
        assert_eq!(configuration.encode().unwrap(), [0, 0, 0, 0, 5, 1, 5]);
    }

    #[test]
    fn blosc_default() {
        assert_eq!(
            BloscConfiguration::default().encode().unwrap(),
            [0, 0, 0, 0, 5, 1, 1]
        );
        let configuration: BloscConfiguration = serde_json::from_str("{}").unwrap();
        assert_eq!(configuration, BloscConfiguration::default());
    }

    #[test]
    fn blosc_compressor_table() {
        let codes: Vec<u32> = [
            BloscCompressor::BloscLZ,
            BloscCompressor::LZ4,
            BloscCompressor::LZ4HC,
            BloscCompressor::Snappy,
            BloscCompressor::Zlib,
            BloscCompressor::Zstd,
        ]
        .iter()
        .map(|cname| cname.code())
        .collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn blosc_json() {
        let configuration: BloscConfiguration =
            serde_json::from_str(r#"{"cname": "blosclz", "clevel": 9, "shuffle": 2}"#).unwrap();
        assert_eq!(configuration.encode().unwrap(), [0, 0, 0, 0, 9, 2, 0]);
        assert_eq!(
            configuration.to_string(),
            r#"{"cname":"blosclz","clevel":9,"shuffle":2}"#
        );
    }

    #[test]
    fn blosc_invalid() {
        assert!(serde_json::from_str::<BloscConfiguration>(r#"{"cname": "brotli"}"#).is_err());
        assert!(serde_json::from_str::<BloscConfiguration>(r#"{"shuffle": 3}"#).is_err());
        let error = BloscConfiguration::new(BloscCompressor::LZ4, 10, BloscShuffle::NoShuffle)
            .encode()
            .unwrap_err();
        assert_eq!(error.filter(), "blosc");
    }
}
