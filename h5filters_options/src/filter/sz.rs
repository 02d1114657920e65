//! The `sz` filter configuration.
//!
//! At most one error bound may be set. Without any, a point-wise relative bound of `1e-5` is used.
//!
//! ### Configuration Example - [`SzConfiguration`]:
//! ```rust
//! # let JSON = r#"
//! {
//!     "absolute": 0.1
//! }
//! # "#;
//! # use h5filters_options::filter::sz::SzConfiguration;
//! # serde_json::from_str::<SzConfiguration>(JSON).unwrap();
//! ```

use derive_more::Display;
use h5filters_registry::filter::{SZ, SZ_ID};
use serde::{Deserialize, Serialize};

use crate::{pack_f64_be, EncodeOptions, InvalidParameterError};

/// The default point-wise relative error bound.
pub const SZ_POINTWISE_RELATIVE_DEFAULT: f64 = 1e-5;

/// An `sz` error bound.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SzMode {
    /// Values are within an absolute tolerance.
    Absolute(f64),
    /// Values are within a tolerance relative to the range of the data.
    Relative(f64),
    /// Each value is within a tolerance relative to itself.
    PointwiseRelative(f64),
}

impl Default for SzMode {
    fn default() -> Self {
        Self::PointwiseRelative(SZ_POINTWISE_RELATIVE_DEFAULT)
    }
}

impl SzMode {
    /// The error bound mode identifier read by the sz plugin.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Absolute(_) => 0,
            Self::Relative(_) => 1,
            Self::PointwiseRelative(_) => 10,
        }
    }

    /// Encode the mode to `(mode, absolute, relative, pointwise_relative, psnr)`.
    ///
    /// Each bound is a big-endian `(high, low)` double and unused bounds are `0.0`.
    #[must_use]
    pub fn encode(&self) -> [u32; 9] {
        let mut bounds = [0.0; 4];
        match *self {
            Self::Absolute(bound) => bounds[0] = bound,
            Self::Relative(bound) => bounds[1] = bound,
            Self::PointwiseRelative(bound) => bounds[2] = bound,
        }
        let mut options = [0; 9];
        options[0] = self.id();
        for (words, bound) in options[1..].chunks_exact_mut(2).zip(bounds) {
            words.copy_from_slice(&pack_f64_be(bound));
        }
        options
    }
}

/// `sz` filter configuration parameters.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Display, Default)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct SzConfiguration {
    /// The absolute error bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute: Option<f64>,
    /// The error bound relative to the range of the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative: Option<f64>,
    /// The point-wise relative error bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointwise_relative: Option<f64>,
}

impl From<SzMode> for SzConfiguration {
    fn from(mode: SzMode) -> Self {
        let mut configuration = Self::default();
        match mode {
            SzMode::Absolute(bound) => configuration.absolute = Some(bound),
            SzMode::Relative(bound) => configuration.relative = Some(bound),
            SzMode::PointwiseRelative(bound) => configuration.pointwise_relative = Some(bound),
        }
        configuration
    }
}

impl SzConfiguration {
    /// Select the error bound.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if more than one bound is set.
    pub fn mode(&self) -> Result<SzMode, InvalidParameterError> {
        match (self.absolute, self.relative, self.pointwise_relative) {
            (Some(bound), None, None) => Ok(SzMode::Absolute(bound)),
            (None, Some(bound), None) => Ok(SzMode::Relative(bound)),
            (None, None, Some(bound)) => Ok(SzMode::PointwiseRelative(bound)),
            (None, None, None) => Ok(SzMode::default()),
            _ => Err(InvalidParameterError::new(
                SZ,
                "at most one of absolute, relative and pointwise_relative can be set",
            )),
        }
    }

    /// Encode the configuration to `(mode, absolute, relative, pointwise_relative, psnr)`.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if more than one bound is set.
    pub fn encode(&self) -> Result<[u32; 9], InvalidParameterError> {
        let mode = self.mode()?;
        let options = mode.encode();
        log::info!("sz mode {} used", mode.id());
        log::info!("sz filter options {options:?}");
        Ok(options)
    }
}

impl EncodeOptions for SzConfiguration {
    const FILTER_NAME: &'static str = SZ;
    const FILTER_ID: u32 = SZ_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        self.encode().map(Vec::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unpack_f64_be;

    #[test]
    fn sz_default_pointwise_relative() {
        let options = SzConfiguration::default().encode().unwrap();
        assert_eq!(options[0], 10);
        assert_eq!(options[1..5], [0, 0, 0, 0]);
        assert_eq!(unpack_f64_be([options[5], options[6]]), 1e-5);
        assert_eq!(options[7..], [0, 0]);
    }

    #[test]
    fn sz_absolute() {
        let configuration: SzConfiguration = serde_json::from_str(r#"{"absolute": 1.0}"#).unwrap();
        assert_eq!(
            configuration.encode().unwrap(),
            [0, 0x3FF0_0000, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn sz_relative() {
        let options = SzConfiguration::from(SzMode::Relative(0.1)).encode().unwrap();
        assert_eq!(options, [1, 0, 0, 0x3FB9_9999, 0x9999_999A, 0, 0, 0, 0]);
    }

    #[test]
    fn sz_multiple_bounds() {
        let configuration = SzConfiguration {
            absolute: Some(0.1),
            pointwise_relative: Some(0.2),
            ..Default::default()
        };
        assert!(configuration.encode().is_err());
    }
}
