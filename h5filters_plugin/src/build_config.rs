use std::{collections::BTreeSet, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The build configuration of the native filter plugins.
///
/// It is written as `build_config.json` next to the plugins when they are built, for example:
/// ```json
/// {
///     "embedded_filters": ["blosc", "bshuf", "lz4", "zstd"],
///     "filter_file_extension": ".so",
///     "openmp": true,
///     "sse2": true,
///     "cpp11": true
/// }
/// ```
/// Capability flags that are absent are `false`.
#[derive(Serialize, Deserialize, Clone, Eq, PartialEq, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct BuildConfig {
    /// The names of the filters with a plugin in this build.
    #[serde(default)]
    pub embedded_filters: BTreeSet<String>,
    /// The file extension of the plugin libraries, including the leading dot.
    #[serde(default = "default_filter_file_extension")]
    pub filter_file_extension: String,
    /// Built with OpenMP.
    #[serde(default)]
    pub openmp: bool,
    /// Built for the native architecture.
    #[serde(default)]
    pub native: bool,
    /// Built with SSE2.
    #[serde(default)]
    pub sse2: bool,
    /// Built with SSSE3.
    #[serde(default)]
    pub ssse3: bool,
    /// Built with AVX2.
    #[serde(default)]
    pub avx2: bool,
    /// Built with AVX-512.
    #[serde(default)]
    pub avx512: bool,
    /// Built with BMI2.
    #[serde(default)]
    pub bmi2: bool,
    /// Built with C++11.
    #[serde(default)]
    pub cpp11: bool,
    /// Built with C++14.
    #[serde(default)]
    pub cpp14: bool,
    /// Built with C++20.
    #[serde(default)]
    pub cpp20: bool,
    /// Built with Intel IPP.
    #[serde(default)]
    pub ipp: bool,
}

fn default_filter_file_extension() -> String {
    if cfg!(windows) {
        ".dll"
    } else if cfg!(target_os = "macos") {
        ".dylib"
    } else {
        ".so"
    }
    .to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            embedded_filters: BTreeSet::new(),
            filter_file_extension: default_filter_file_extension(),
            openmp: false,
            native: false,
            sse2: false,
            ssse3: false,
            avx2: false,
            avx512: false,
            bmi2: false,
            cpp11: false,
            cpp14: false,
            cpp20: false,
            ipp: false,
        }
    }
}

/// A build capability required by some native plugins.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum BuildCapability {
    /// OpenMP.
    OpenMp,
    /// Native architecture.
    Native,
    /// SSE2.
    Sse2,
    /// SSSE3.
    Ssse3,
    /// AVX2.
    Avx2,
    /// AVX-512.
    Avx512,
    /// BMI2.
    Bmi2,
    /// C++11.
    Cpp11,
    /// C++14.
    Cpp14,
    /// C++20.
    Cpp20,
    /// Intel IPP.
    Ipp,
}

/// A build configuration loading error.
#[derive(Debug, Error)]
pub enum BuildConfigError {
    /// The build configuration file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The build configuration is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl BuildConfig {
    /// Parse a build configuration from JSON.
    ///
    /// # Errors
    /// Returns a [`BuildConfigError`] if `json` is not a valid build configuration.
    pub fn from_json(json: &str) -> Result<Self, BuildConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a build configuration from a JSON file.
    ///
    /// # Errors
    /// Returns a [`BuildConfigError`] if the file cannot be read or is not a valid build configuration.
    pub fn load(path: &Path) -> Result<Self, BuildConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Returns true if `name` has a plugin in this build.
    #[must_use]
    pub fn is_embedded(&self, name: &str) -> bool {
        self.embedded_filters.contains(name)
    }

    /// Returns true if the plugins were built with `capability`.
    #[must_use]
    pub const fn has(&self, capability: BuildCapability) -> bool {
        match capability {
            BuildCapability::OpenMp => self.openmp,
            BuildCapability::Native => self.native,
            BuildCapability::Sse2 => self.sse2,
            BuildCapability::Ssse3 => self.ssse3,
            BuildCapability::Avx2 => self.avx2,
            BuildCapability::Avx512 => self.avx512,
            BuildCapability::Bmi2 => self.bmi2,
            BuildCapability::Cpp11 => self.cpp11,
            BuildCapability::Cpp14 => self.cpp14,
            BuildCapability::Cpp20 => self.cpp20,
            BuildCapability::Ipp => self.ipp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_config_json() {
        let build_config = BuildConfig::from_json(
            r#"{"embedded_filters": ["blosc", "zstd"], "filter_file_extension": ".so", "cpp11": true, "sse2": false}"#,
        )
        .unwrap();
        assert!(build_config.is_embedded("blosc"));
        assert!(!build_config.is_embedded("blosc2"));
        assert_eq!(build_config.filter_file_extension, ".so");
        assert!(build_config.has(BuildCapability::Cpp11));
        assert!(!build_config.has(BuildCapability::Cpp14));
        assert!(!build_config.has(BuildCapability::Avx2));
    }

    #[test]
    fn build_config_unknown_flags_ignored() {
        let build_config = BuildConfig::from_json(r#"{"zstd_threads": true}"#).unwrap();
        assert_eq!(build_config, BuildConfig::default());
    }

    #[test]
    fn build_config_load() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("build_config.json");
        assert!(matches!(
            BuildConfig::load(&path),
            Err(BuildConfigError::Io(_))
        ));
        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            BuildConfig::load(&path),
            Err(BuildConfigError::Json(_))
        ));
        std::fs::write(&path, r#"{"embedded_filters": ["lz4"]}"#).unwrap();
        assert!(BuildConfig::load(&path).unwrap().is_embedded("lz4"));
    }
}
