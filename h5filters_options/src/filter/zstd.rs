//! The `zstd` filter configuration.
//!
//! ### Configuration Example - [`ZstdConfiguration`]:
//! ```rust
//! # let JSON = r#"
//! {
//!     "clevel": 22
//! }
//! # "#;
//! # use h5filters_options::filter::zstd::ZstdConfiguration;
//! # serde_json::from_str::<ZstdConfiguration>(JSON).unwrap();
//! ```

use derive_more::Display;
use h5filters_registry::filter::{ZSTD, ZSTD_ID};
use serde::{Deserialize, Serialize};

use crate::{EncodeOptions, InvalidParameterError};

/// `zstd` filter configuration parameters.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Debug, Display)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct ZstdConfiguration {
    /// The compression level, from 1 to 22. Levels 20 to 22 are "ultra" levels.
    #[serde(default = "default_clevel")]
    pub clevel: u32,
}

const fn default_clevel() -> u32 {
    3
}

impl Default for ZstdConfiguration {
    fn default() -> Self {
        Self {
            clevel: default_clevel(),
        }
    }
}

impl ZstdConfiguration {
    /// Create a new `zstd` configuration.
    #[must_use]
    pub const fn new(clevel: u32) -> Self {
        Self { clevel }
    }

    /// Encode the configuration to `(clevel,)`.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if `clevel` is not in `[1, 22]`.
    pub fn encode(&self) -> Result<[u32; 1], InvalidParameterError> {
        if !(1..=22).contains(&self.clevel) {
            return Err(InvalidParameterError::new(
                ZSTD,
                format!("clevel {} is not in [1, 22]", self.clevel),
            ));
        }
        Ok([self.clevel])
    }
}

impl EncodeOptions for ZstdConfiguration {
    const FILTER_NAME: &'static str = ZSTD;
    const FILTER_ID: u32 = ZSTD_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        self.encode().map(Vec::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zstd_bounds() {
        assert_eq!(ZstdConfiguration::default().encode().unwrap(), [3]);
        assert_eq!(ZstdConfiguration::new(22).encode().unwrap(), [22]);
        assert!(ZstdConfiguration::new(0).encode().is_err());
        assert!(ZstdConfiguration::new(23).encode().is_err());
    }
}
