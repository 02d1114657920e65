//! The `bzip2` filter configuration.
//!
//! ### Configuration Example - [`Bzip2Configuration`]:
//! ```rust
//! # let JSON = r#"
//! {
//!     "blocksize": 5
//! }
//! # "#;
//! # use h5filters_options::filter::bzip2::Bzip2Configuration;
//! # serde_json::from_str::<Bzip2Configuration>(JSON).unwrap();
//! ```

use derive_more::Display;
use h5filters_registry::filter::{BZIP2, BZIP2_ID};
use serde::{Deserialize, Serialize};

use crate::{EncodeOptions, InvalidParameterError};

/// `bzip2` filter configuration parameters.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Debug, Display)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct Bzip2Configuration {
    /// The block size as a multiple of 100 kB, from 1 to 9.
    #[serde(default = "default_blocksize")]
    pub blocksize: u32,
}

const fn default_blocksize() -> u32 {
    9
}

impl Default for Bzip2Configuration {
    fn default() -> Self {
        Self {
            blocksize: default_blocksize(),
        }
    }
}

impl Bzip2Configuration {
    /// Create a new `bzip2` configuration.
    #[must_use]
    pub const fn new(blocksize: u32) -> Self {
        Self { blocksize }
    }

    /// Encode the configuration to `(blocksize,)`.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if `blocksize` is not in `[1, 9]`.
    pub fn encode(&self) -> Result<[u32; 1], InvalidParameterError> {
        if !(1..=9).contains(&self.blocksize) {
            return Err(InvalidParameterError::new(
                BZIP2,
                format!("blocksize {} is not in [1, 9]", self.blocksize),
            ));
        }
        Ok([self.blocksize])
    }
}

impl EncodeOptions for Bzip2Configuration {
    const FILTER_NAME: &'static str = BZIP2;
    const FILTER_ID: u32 = BZIP2_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        self.encode().map(Vec::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bzip2_bounds() {
        assert_eq!(Bzip2Configuration::default().encode().unwrap(), [9]);
        assert_eq!(Bzip2Configuration::new(1).encode().unwrap(), [1]);
        assert!(Bzip2Configuration::new(0).encode().is_err());
        assert!(Bzip2Configuration::new(10).encode().is_err());
    }
}
