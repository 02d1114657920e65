//! The `lz4` filter configuration.
//!
//! ### Configuration Example - [`Lz4Configuration`]:
//! ```rust
//! # let JSON = r#"
//! {
//!     "nbytes": 0
//! }
//! # "#;
//! # use h5filters_options::filter::lz4::Lz4Configuration;
//! # serde_json::from_str::<Lz4Configuration>(JSON).unwrap();
//! ```

use derive_more::Display;
use h5filters_registry::filter::{LZ4, LZ4_ID};
use serde::{Deserialize, Serialize};

use crate::{EncodeOptions, InvalidParameterError};

/// The largest `lz4` block size in bytes (about 1.9 GB).
pub const LZ4_NBYTES_MAX: u32 = 0x7E00_0000;

/// `lz4` filter configuration parameters.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Debug, Display, Default)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct Lz4Configuration {
    /// The number of bytes per block, 0 for 1 GB blocks.
    #[serde(default)]
    pub nbytes: u32,
}

impl Lz4Configuration {
    /// Create a new `lz4` configuration.
    #[must_use]
    pub const fn new(nbytes: u32) -> Self {
        Self { nbytes }
    }

    /// Encode the configuration to `(nbytes,)`.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if `nbytes` is above [`LZ4_NBYTES_MAX`].
    pub fn encode(&self) -> Result<[u32; 1], InvalidParameterError> {
        if self.nbytes > LZ4_NBYTES_MAX {
            return Err(InvalidParameterError::new(
                LZ4,
                format!("nbytes {} is above {LZ4_NBYTES_MAX:#X}", self.nbytes),
            ));
        }
        Ok([self.nbytes])
    }
}

impl EncodeOptions for Lz4Configuration {
    const FILTER_NAME: &'static str = LZ4;
    const FILTER_ID: u32 = LZ4_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        self.encode().map(Vec::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lz4_bounds() {
        assert_eq!(Lz4Configuration::default().encode().unwrap(), [0]);
        assert_eq!(
            Lz4Configuration::new(LZ4_NBYTES_MAX).encode().unwrap(),
            [0x7E00_0000]
        );
        assert!(Lz4Configuration::new(LZ4_NBYTES_MAX + 1).encode().is_err());
    }
}
