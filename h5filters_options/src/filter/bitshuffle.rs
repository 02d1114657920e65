//! The bitshuffle (`bshuf`) filter configuration.
//!
//! ### Configuration Example - [`BitshuffleConfiguration`]:
//! ```rust
//! # let JSON = r#"
//! {
//!     "nelems": 1024,
//!     "cname": "zstd",
//!     "clevel": 5
//! }
//! # "#;
//! # use h5filters_options::filter::bitshuffle::BitshuffleConfiguration;
//! # serde_json::from_str::<BitshuffleConfiguration>(JSON).unwrap();
//! ```

use derive_more::Display;
use h5filters_registry::filter::{BSHUF, BSHUF_ID};
use serde::{Deserialize, Serialize};

use crate::{EncodeOptions, InvalidParameterError};

/// The compressor applied after bitshuffling.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug, Display, Default)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum BitshuffleCompressor {
    /// No compression.
    #[display("none")]
    None = 0,
    /// `lz4`.
    #[default]
    #[display("lz4")]
    LZ4 = 2,
    /// `zstd`.
    #[display("zstd")]
    Zstd = 3,
}

impl BitshuffleCompressor {
    /// The compressor code written to the filter options.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// The highest `zstd` compression level.
const CLEVEL_MAX: i32 = 22;

/// Bitshuffle filter configuration parameters.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Debug, Display)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct BitshuffleConfiguration {
    /// The number of elements per block, a multiple of 8.
    ///
    /// 0 lets the filter choose a block of about 8 kB.
    #[serde(default)]
    pub nelems: u32,
    /// The compressor.
    #[serde(default)]
    pub cname: BitshuffleCompressor,
    /// The `zstd` compression level, at most 22. Negative levels are allowed.
    ///
    /// Ignored by other compressors.
    #[serde(default = "default_clevel")]
    pub clevel: i32,
}

const fn default_clevel() -> i32 {
    3
}

impl Default for BitshuffleConfiguration {
    fn default() -> Self {
        Self {
            nelems: 0,
            cname: BitshuffleCompressor::default(),
            clevel: default_clevel(),
        }
    }
}

impl BitshuffleConfiguration {
    /// Create a new bitshuffle configuration.
    #[must_use]
    pub const fn new(nelems: u32, cname: BitshuffleCompressor, clevel: i32) -> Self {
        Self {
            nelems,
            cname,
            clevel,
        }
    }

    /// Encode the configuration to `(nelems, compressor)`, or `(nelems, compressor, clevel)` with `zstd`.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if `nelems` is not a multiple of 8 or `clevel` is above 22.
    pub fn encode(&self) -> Result<Vec<u32>, InvalidParameterError> {
        if self.nelems % 8 != 0 {
            return Err(InvalidParameterError::new(
                BSHUF,
                format!("nelems {} is not a multiple of 8", self.nelems),
            ));
        }
        if self.clevel > CLEVEL_MAX {
            return Err(InvalidParameterError::new(
                BSHUF,
                format!("clevel {} is above {CLEVEL_MAX}", self.clevel),
            ));
        }
        let mut options = vec![self.nelems, self.cname.code()];
        if self.cname == BitshuffleCompressor::Zstd {
            options.push(self.clevel.cast_unsigned());
        }
        Ok(options)
    }
}

impl EncodeOptions for BitshuffleConfiguration {
    const FILTER_NAME: &'static str = BSHUF;
    const FILTER_ID: u32 = BSHUF_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        self.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitshuffle_zstd() {
        let configuration = BitshuffleConfiguration::new(1024, BitshuffleCompressor::Zstd, 5);
        assert_eq!(configuration.encode().unwrap(), vec![1024, 3, 5]);
    }

    #[test]
    fn bitshuffle_lz4_omits_clevel() {
        assert_eq!(
            BitshuffleConfiguration::default().encode().unwrap(),
            vec![0, 2]
        );
        let configuration = BitshuffleConfiguration::new(8, BitshuffleCompressor::None, 9);
        assert_eq!(configuration.encode().unwrap(), vec![8, 0]);
    }

    #[test]
    fn bitshuffle_negative_clevel() {
        let configuration = BitshuffleConfiguration::new(0, BitshuffleCompressor::Zstd, -1);
        assert_eq!(configuration.encode().unwrap(), vec![0, 3, u32::MAX]);
    }

    #[test]
    fn bitshuffle_invalid() {
        let configuration = BitshuffleConfiguration::new(7, BitshuffleCompressor::LZ4, 3);
        assert!(configuration.encode().is_err());
        let configuration = BitshuffleConfiguration::new(16, BitshuffleCompressor::Zstd, 23);
        assert!(configuration.encode().is_err());
        assert!(
            serde_json::from_str::<BitshuffleConfiguration>(r#"{"cname": "snappy"}"#).is_err()
        );
    }
}
