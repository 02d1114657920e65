//! The `sz3` filter configuration.
//!
//! At most one error bound may be set. Without any, an absolute bound of `1e-4` is used and a warning is logged.
//!
//! ### Configuration Example - [`Sz3Configuration`]:
//! ```rust
//! # let JSON = r#"
//! {
//!     "norm2": 0.01
//! }
//! # "#;
//! # use h5filters_options::filter::sz3::Sz3Configuration;
//! # serde_json::from_str::<Sz3Configuration>(JSON).unwrap();
//! ```

use derive_more::Display;
use h5filters_registry::filter::{SZ3, SZ3_ID};
use serde::{Deserialize, Serialize};

use crate::{pack_f64_be, EncodeOptions, InvalidParameterError};

/// The absolute error bound used if no bound is set.
pub const SZ3_ABSOLUTE_DEFAULT: f64 = 1e-4;

/// An `sz3` error bound.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Sz3Mode {
    /// Values are within an absolute tolerance.
    Absolute(f64),
    /// Values are within a tolerance relative to the range of the data.
    Relative(f64),
    /// The L2 norm of the error is bounded.
    Norm2(f64),
    /// The peak signal to noise ratio is bounded.
    PeakSignalToNoiseRatio(f64),
}

impl Sz3Mode {
    /// The error bound mode identifier read by the sz3 plugin.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Absolute(_) => 0,
            Self::Relative(_) => 1,
            Self::Norm2(_) => 2,
            Self::PeakSignalToNoiseRatio(_) => 3,
        }
    }

    /// Encode the mode to `(mode, absolute, relative, norm2, psnr)`.
    ///
    /// Each bound is a big-endian `(high, low)` double and unused bounds are `0.0`.
    #[must_use]
    pub fn encode(&self) -> [u32; 9] {
        let mut bounds = [0.0; 4];
        match *self {
            Self::Absolute(bound) => bounds[0] = bound,
            Self::Relative(bound) => bounds[1] = bound,
            Self::Norm2(bound) => bounds[2] = bound,
            Self::PeakSignalToNoiseRatio(bound) => bounds[3] = bound,
        }
        let mut options = [0; 9];
        options[0] = self.id();
        for (words, bound) in options[1..].chunks_exact_mut(2).zip(bounds) {
            words.copy_from_slice(&pack_f64_be(bound));
        }
        options
    }
}

/// `sz3` filter configuration parameters.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Display, Default)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct Sz3Configuration {
    /// The absolute error bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute: Option<f64>,
    /// The error bound relative to the range of the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative: Option<f64>,
    /// The L2 norm error bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm2: Option<f64>,
    /// The peak signal to noise ratio bound.
    #[serde(
        default,
        alias = "psnr",
        skip_serializing_if = "Option::is_none"
    )]
    pub peak_signal_to_noise_ratio: Option<f64>,
}

impl From<Sz3Mode> for Sz3Configuration {
    fn from(mode: Sz3Mode) -> Self {
        let mut configuration = Self::default();
        match mode {
            Sz3Mode::Absolute(bound) => configuration.absolute = Some(bound),
            Sz3Mode::Relative(bound) => configuration.relative = Some(bound),
            Sz3Mode::Norm2(bound) => configuration.norm2 = Some(bound),
            Sz3Mode::PeakSignalToNoiseRatio(bound) => {
                configuration.peak_signal_to_noise_ratio = Some(bound);
            }
        }
        configuration
    }
}

impl Sz3Configuration {
    /// Select the error bound.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if more than one bound is set.
    pub fn mode(&self) -> Result<Sz3Mode, InvalidParameterError> {
        let bounds = [
            self.absolute.map(Sz3Mode::Absolute),
            self.relative.map(Sz3Mode::Relative),
            self.norm2.map(Sz3Mode::Norm2),
            self.peak_signal_to_noise_ratio
                .map(Sz3Mode::PeakSignalToNoiseRatio),
        ];
        let mut set = bounds.into_iter().flatten();
        match (set.next(), set.next()) {
            (Some(mode), None) => Ok(mode),
            (None, _) => {
                log::warn!(
                    "sz3 defaulting to absolute={SZ3_ABSOLUTE_DEFAULT}, this default might not be kept in future releases"
                );
                Ok(Sz3Mode::Absolute(SZ3_ABSOLUTE_DEFAULT))
            }
            (Some(_), Some(_)) => Err(InvalidParameterError::new(
                SZ3,
                "at most one of absolute, relative, norm2 and peak_signal_to_noise_ratio can be set",
            )),
        }
    }

    /// Encode the configuration to `(mode, absolute, relative, norm2, psnr)`.
    ///
    /// # Errors
    /// Returns an [`InvalidParameterError`] if more than one bound is set.
    pub fn encode(&self) -> Result<[u32; 9], InvalidParameterError> {
        let mode = self.mode()?;
        if !matches!(mode, Sz3Mode::Absolute(_) | Sz3Mode::Norm2(_)) {
            log::warn!("sz3: only absolute and norm2 modes are properly tested");
        }
        let options = mode.encode();
        log::info!("sz3 mode {} used", mode.id());
        log::info!("sz3 filter options {options:?}");
        Ok(options)
    }
}

impl EncodeOptions for Sz3Configuration {
    const FILTER_NAME: &'static str = SZ3;
    const FILTER_ID: u32 = SZ3_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        self.encode().map(Vec::from)
    }
}
