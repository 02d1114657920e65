//! The `sperr` filter configuration.
//!
//! The sperr plugin reads a single option word holding the compression mode, its quality, and the rank order swap flag:
//!
//! | Bits | Content |
//! |---|---|
//! | 0-15 | fractional part of the quality |
//! | 16-26 | integer part of the quality |
//! | 27 | sign of the quality |
//! | 28-29 | mode: 1 (rate), 2 (psnr) or 3 (absolute) |
//! | 31 | rank order swap |
//!
//! An absolute error bound is stored as its base 2 logarithm.
//!
//! ### Configuration Example - [`SperrConfiguration`]:
//! ```rust
//! # let JSON = r#"
//! {
//!     "absolute": 1e-6,
//!     "swap": true
//! }
//! # "#;
//! # use h5filters_options::filter::sperr::SperrConfiguration;
//! # serde_json::from_str::<SperrConfiguration>(JSON).unwrap();
//! ```

use derive_more::Display;
use h5filters_registry::filter::{SPERR, SPERR_ID};
use serde::{Deserialize, Serialize};

use crate::{EncodeOptions, InvalidParameterError};

const SIGN_BIT: u32 = 1 << 27;
const MODE_SHIFT: u32 = 28;
const SWAP_BIT: u32 = 1 << 31;
const PAYLOAD_MASK: u32 = SIGN_BIT - 1;
const SCALE: f64 = 65536.0;

/// The default bits per value of the rate mode.
pub const SPERR_RATE_DEFAULT: f64 = 16.0;

/// A sperr compression mode and its quality.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SperrMode {
    /// Fixed bit rate in bits per value, in `(0, 64)`.
    Rate(f64),
    /// Target peak signal to noise ratio, positive.
    PeakSignalToNoiseRatio(f64),
    /// Point-wise absolute error bound, positive.
    Absolute(f64),
}

impl Default for SperrMode {
    fn default() -> Self {
        Self::Rate(SPERR_RATE_DEFAULT)
    }
}

impl SperrMode {
    /// The mode identifier stored in bits 28-29.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Rate(_) => 1,
            Self::PeakSignalToNoiseRatio(_) => 2,
            Self::Absolute(_) => 3,
        }
    }

    fn validate(&self) -> Result<(), InvalidParameterError> {
        let valid = match *self {
            Self::Rate(rate) => rate > 0.0 && rate < 64.0,
            Self::PeakSignalToNoiseRatio(quality) | Self::Absolute(quality) => {
                quality > 0.0 && quality.is_finite()
            }
        };
        if valid {
            Ok(())
        } else {
            Err(InvalidParameterError::new(
                SPERR,
                format!("{self:?} is out of range"),
            ))
        }
    }

    /// Encode the mode and the rank order `swap` flag to the packed option word.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if the quality is out of range or does not fit in the fixed-point field.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn encode(&self, swap: bool) -> Result<u32, InvalidParameterError> {
        self.validate()?;
        let (magnitude, negative) = match *self {
            Self::Rate(quality) | Self::PeakSignalToNoiseRatio(quality) => {
                ((quality * SCALE).round(), false)
            }
            Self::Absolute(bound) => {
                let exponent = bound.log2();
                if exponent < 0.0 {
                    ((-exponent * SCALE).ceil(), true)
                } else {
                    ((exponent * SCALE).floor(), false)
                }
            }
        };
        if magnitude >= f64::from(SIGN_BIT) {
            return Err(InvalidParameterError::new(
                SPERR,
                format!("{self:?} does not fit in the fixed-point quality field"),
            ));
        }
        let mut word = magnitude as u32 | (self.id() << MODE_SHIFT);
        if negative {
            word |= SIGN_BIT;
        }
        if swap {
            word |= SWAP_BIT;
        }
        Ok(word)
    }

    /// Decode a packed option word into the mode and the rank order swap flag.
    ///
    /// Returns [`None`] if the mode bits are zero.
    /// An absolute bound is recovered to within the fixed-point precision of its logarithm.
    #[must_use]
    pub fn decode(word: u32) -> Option<(Self, bool)> {
        let swap = word & SWAP_BIT != 0;
        let mut quality = f64::from(word & PAYLOAD_MASK) / SCALE;
        if word & SIGN_BIT != 0 {
            quality = -quality;
        }
        let mode = match (word >> MODE_SHIFT) & 0b11 {
            1 => Self::Rate(quality),
            2 => Self::PeakSignalToNoiseRatio(quality),
            3 => Self::Absolute(quality.exp2()),
            _ => return None,
        };
        Some((mode, swap))
    }
}

/// `sperr` filter configuration parameters.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Display, Default)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct SperrConfiguration {
    /// Fixed bit rate mode, in bits per value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    /// Fixed peak signal to noise ratio mode.
    #[serde(
        default,
        alias = "psnr",
        skip_serializing_if = "Option::is_none"
    )]
    pub peak_signal_to_noise_ratio: Option<f64>,
    /// Point-wise absolute error bound mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute: Option<f64>,
    /// Apply rank order swap pre-filtering.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub swap: bool,
}

impl From<SperrMode> for SperrConfiguration {
    fn from(mode: SperrMode) -> Self {
        let mut configuration = Self::default();
        match mode {
            SperrMode::Rate(quality) => configuration.rate = Some(quality),
            SperrMode::PeakSignalToNoiseRatio(quality) => {
                configuration.peak_signal_to_noise_ratio = Some(quality);
            }
            SperrMode::Absolute(quality) => configuration.absolute = Some(quality),
        }
        configuration
    }
}

impl SperrConfiguration {
    /// Select the compression mode. The rate mode with 16 bits per value is used if none is set.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if more than one mode is set.
    pub fn mode(&self) -> Result<SperrMode, InvalidParameterError> {
        match (self.rate, self.peak_signal_to_noise_ratio, self.absolute) {
            (Some(rate), None, None) => Ok(SperrMode::Rate(rate)),
            (None, Some(psnr), None) => Ok(SperrMode::PeakSignalToNoiseRatio(psnr)),
            (None, None, Some(absolute)) => Ok(SperrMode::Absolute(absolute)),
            (None, None, None) => Ok(SperrMode::default()),
            _ => Err(InvalidParameterError::new(
                SPERR,
                "at most one of rate, peak_signal_to_noise_ratio and absolute can be set",
            )),
        }
    }

    /// Encode the configuration to its single packed option word.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if more than one mode is set or the quality is out of range.
    pub fn encode(&self) -> Result<[u32; 1], InvalidParameterError> {
        let mode = self.mode()?;
        let word = mode.encode(self.swap)?;
        log::info!("sperr mode {} used, filter options ({word},)", mode.id());
        Ok([word])
    }
}

impl EncodeOptions for SperrConfiguration {
    const FILTER_NAME: &'static str = SPERR;
    const FILTER_ID: u32 = SPERR_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        self.encode().map(Vec::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sperr_rate_16() {
        let configuration = SperrConfiguration::from(SperrMode::Rate(16.0));
        // (16 << 16) | (1 << 28)
        assert_eq!(configuration.encode().unwrap(), [269_484_032]);
        assert_eq!(SperrConfiguration::default().encode().unwrap(), [269_484_032]);
    }

    #[test]
    fn sperr_psnr_swap() {
        let configuration: SperrConfiguration =
            serde_json::from_str(r#"{"psnr": 100.5, "swap": true}"#).unwrap();
        let expected: u32 = (1 << 31) | (2 << 28) | (100 << 16) | (1 << 15);
        assert_eq!(configuration.encode().unwrap(), [expected]);
    }

    #[test]
    fn sperr_absolute() {
        // log2(0.25) = -2
        let word = SperrMode::Absolute(0.25).encode(false).unwrap();
        assert_eq!(word, (3 << 28) | (1 << 27) | (2 << 16));
        // log2(8) = 3
        let word = SperrMode::Absolute(8.0).encode(false).unwrap();
        assert_eq!(word, (3 << 28) | (3 << 16));
    }

    #[test]
    fn sperr_decode() {
        assert_eq!(
            SperrMode::decode(269_484_032),
            Some((SperrMode::Rate(16.0), false))
        );
        let word = SperrMode::Absolute(1e-6).encode(true).unwrap();
        let Some((SperrMode::Absolute(bound), true)) = SperrMode::decode(word) else {
            panic!("unexpected decoding of {word}");
        };
        assert!((bound - 1e-6).abs() < 1e-10);
        assert_eq!(SperrMode::decode(1 << 16), None);
    }

    #[test]
    fn sperr_invalid() {
        let configuration = SperrConfiguration {
            rate: Some(8.0),
            absolute: Some(1e-3),
            ..Default::default()
        };
        assert!(configuration.encode().is_err());
        assert!(SperrMode::Rate(64.0).encode(false).is_err());
        assert!(SperrMode::Rate(0.0).encode(false).is_err());
        assert!(SperrMode::Absolute(-1.0).encode(false).is_err());
        assert!(SperrMode::PeakSignalToNoiseRatio(4096.0).encode(false).is_err());
    }
}
