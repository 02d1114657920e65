//! The `zfp` filter configuration.
//!
//! The zfp filter has five compression modes. A mode is selected from the configuration by precedence:
//! `rate`, then `precision`, then `accuracy`, then `reversible`, then the expert parameters.
//! Parameters of lower precedence modes are silently ignored.
//! Expert mode is selected by `minbits` and then requires `maxbits`, `maxprec` and `minexp`.
//! If no mode is selected, the options are empty and the plugin applies its own defaults.
//!
//! ### Configuration Example - [`ZfpConfiguration`]:
//! ```rust
//! # let JSON = r#"
//! {
//!     "minbits": 1,
//!     "maxbits": 16657,
//!     "maxprec": 64,
//!     "minexp": -1074
//! }
//! # "#;
//! # use h5filters_options::filter::zfp::{ZfpConfiguration, ZfpMode};
//! # let configuration = serde_json::from_str::<ZfpConfiguration>(JSON).unwrap();
//! # assert!(matches!(configuration.mode().unwrap(), Some(ZfpMode::Expert { .. })));
//! ```

use derive_more::Display;
use h5filters_registry::filter::{ZFP, ZFP_ID};
use serde::{Deserialize, Serialize};

use crate::{pack_f64_ne, EncodeOptions, InvalidParameterError};

/// A zfp compression mode and its parameters.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ZfpMode {
    /// Fixed-rate mode: the number of compressed bits per value.
    FixedRate {
        /// Compressed bits per value.
        rate: f64,
    },
    /// Fixed-precision mode: the number of uncompressed bits per value.
    FixedPrecision {
        /// Uncompressed bits per value.
        precision: u32,
    },
    /// Fixed-accuracy mode: an absolute error tolerance.
    FixedAccuracy {
        /// Absolute error tolerance.
        accuracy: f64,
    },
    /// Expert mode.
    Expert {
        /// Minimum number of compressed bits per block.
        minbits: u32,
        /// Maximum number of compressed bits per block.
        maxbits: u32,
        /// Maximum number of bit planes encoded.
        maxprec: u32,
        /// Smallest absolute bit plane number encoded.
        minexp: i32,
    },
    /// Reversible (lossless) mode.
    Reversible,
}

impl ZfpMode {
    /// The mode identifier read by the zfp plugin.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::FixedRate { .. } => 1,
            Self::FixedPrecision { .. } => 2,
            Self::FixedAccuracy { .. } => 3,
            Self::Expert { .. } => 4,
            Self::Reversible => 5,
        }
    }

    /// Encode the mode to `(mode, 0, a, b, c, d)`.
    ///
    /// `rate` and `accuracy` occupy `a` and `b` as the two native-order halves of a double.
    #[must_use]
    pub fn encode(&self) -> [u32; 6] {
        let id = self.id();
        match *self {
            Self::FixedRate { rate: value } | Self::FixedAccuracy { accuracy: value } => {
                let [first, second] = pack_f64_ne(value);
                [id, 0, first, second, 0, 0]
            }
            Self::FixedPrecision { precision } => [id, 0, precision, 0, 0, 0],
            Self::Expert {
                minbits,
                maxbits,
                maxprec,
                minexp,
            } => [id, 0, minbits, maxbits, maxprec, minexp.cast_unsigned()],
            Self::Reversible => [id, 0, 0, 0, 0, 0],
        }
    }
}

/// `zfp` filter configuration parameters.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Display, Default)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct ZfpConfiguration {
    /// Use fixed-rate mode with this number of compressed bits per value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    /// Use fixed-precision mode with this number of uncompressed bits per value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Use fixed-accuracy mode with this absolute error tolerance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// Use reversible (lossless) mode.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reversible: bool,
    /// Expert mode: minimum number of compressed bits per block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minbits: Option<u32>,
    /// Expert mode: maximum number of compressed bits per block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxbits: Option<u32>,
    /// Expert mode: maximum number of bit planes encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxprec: Option<u32>,
    /// Expert mode: smallest absolute bit plane number encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minexp: Option<i32>,
}

impl From<ZfpMode> for ZfpConfiguration {
    fn from(mode: ZfpMode) -> Self {
        let mut configuration = Self::default();
        match mode {
            ZfpMode::FixedRate { rate } => configuration.rate = Some(rate),
            ZfpMode::FixedPrecision { precision } => configuration.precision = Some(precision),
            ZfpMode::FixedAccuracy { accuracy } => configuration.accuracy = Some(accuracy),
            ZfpMode::Expert {
                minbits,
                maxbits,
                maxprec,
                minexp,
            } => {
                configuration.minbits = Some(minbits);
                configuration.maxbits = Some(maxbits);
                configuration.maxprec = Some(maxprec);
                configuration.minexp = Some(minexp);
            }
            ZfpMode::Reversible => configuration.reversible = true,
        }
        configuration
    }
}

impl ZfpConfiguration {
    /// Select the compression mode, or [`None`] if no mode is selected.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if `minbits` selects expert mode but another expert parameter is missing.
    pub fn mode(&self) -> Result<Option<ZfpMode>, InvalidParameterError> {
        if let Some(rate) = self.rate {
            return Ok(Some(ZfpMode::FixedRate { rate }));
        }
        if let Some(precision) = self.precision {
            return Ok(Some(ZfpMode::FixedPrecision { precision }));
        }
        if let Some(accuracy) = self.accuracy {
            return Ok(Some(ZfpMode::FixedAccuracy { accuracy }));
        }
        if self.reversible {
            return Ok(Some(ZfpMode::Reversible));
        }
        let Some(minbits) = self.minbits else {
            return Ok(None);
        };
        match (self.maxbits, self.maxprec, self.minexp) {
            (Some(maxbits), Some(maxprec), Some(minexp)) => {
                Ok(Some(ZfpMode::Expert {
                    minbits,
                    maxbits,
                    maxprec,
                    minexp,
                }))
            }
            _ => Err(InvalidParameterError::new(
                ZFP,
                "expert mode requires minbits, maxbits, maxprec and minexp",
            )),
        }
    }

    /// Encode the configuration to `(mode, 0, a, b, c, d)`, or no options if no mode is selected.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if the expert mode parameters are incomplete.
    pub fn encode(&self) -> Result<Vec<u32>, InvalidParameterError> {
        let options = match self.mode()? {
            Some(mode) => {
                log::info!("zfp mode {} used", mode.id());
                mode.encode().to_vec()
            }
            None => {
                log::info!("zfp default used");
                Vec::new()
            }
        };
        log::info!("zfp filter options = {options:?}");
        Ok(options)
    }
}

impl EncodeOptions for ZfpConfiguration {
    const FILTER_NAME: &'static str = ZFP;
    const FILTER_ID: u32 = ZFP_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        self.encode()
    }
}
