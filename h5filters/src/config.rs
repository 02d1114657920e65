//! `h5filters` global configuration options.
//!
//! The configuration is read with [`global_config`] and changed with [`global_config_mut`].
//! Changes made after the first registration call do not affect the plugins already registered.
//!
//! ## Plugin Path
//! > default: `$H5FILTERS_PLUGIN_PATH`, or the `plugins` directory next to the executable
//!
//! The directory holding the native filter plugins and their `build_config.json`.
//!
//! ## HDF5 Library
//! > default: `$H5FILTERS_HDF5_LIBRARY`, or the platform file name of `hdf5` (e.g. `libhdf5.so`)
//!
//! The HDF5 library the plugins are registered with.
//! It must be the library used by the process.
//!
//! ## Build Config Path
//! > default: `build_config.json` in the plugin path
//!
//! The build configuration of the plugins, see [`BuildConfig`].

use std::{
    path::{Path, PathBuf},
    sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use h5filters_plugin::BuildConfig;

/// The environment variable overriding the default plugin path.
pub const PLUGIN_PATH_ENV: &str = "H5FILTERS_PLUGIN_PATH";

/// The environment variable overriding the default HDF5 library.
pub const HDF5_LIBRARY_ENV: &str = "H5FILTERS_HDF5_LIBRARY";

/// Global configuration options for the `h5filters` crate.
///
/// Retrieve the global [`Config`] with [`global_config`] and modify it with [`global_config_mut`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    plugin_path: PathBuf,
    hdf5_library: PathBuf,
    build_config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let plugin_path = std::env::var_os(PLUGIN_PATH_ENV).map_or_else(
            || {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(|dir| dir.join("plugins")))
                    .unwrap_or_else(|| PathBuf::from("plugins"))
            },
            PathBuf::from,
        );
        let hdf5_library = std::env::var_os(HDF5_LIBRARY_ENV).map_or_else(
            || {
                PathBuf::from(format!(
                    "{}hdf5{}",
                    std::env::consts::DLL_PREFIX,
                    std::env::consts::DLL_SUFFIX
                ))
            },
            PathBuf::from,
        );
        Self {
            plugin_path,
            hdf5_library,
            build_config_path: None,
        }
    }
}

impl Config {
    /// Get the plugin path.
    #[must_use]
    pub fn plugin_path(&self) -> &Path {
        &self.plugin_path
    }

    /// Set the plugin path.
    pub fn set_plugin_path(&mut self, plugin_path: impl Into<PathBuf>) -> &mut Self {
        self.plugin_path = plugin_path.into();
        self
    }

    /// Get the HDF5 library.
    #[must_use]
    pub fn hdf5_library(&self) -> &Path {
        &self.hdf5_library
    }

    /// Set the HDF5 library.
    pub fn set_hdf5_library(&mut self, hdf5_library: impl Into<PathBuf>) -> &mut Self {
        self.hdf5_library = hdf5_library.into();
        self
    }

    /// Get the build config path.
    #[must_use]
    pub fn build_config_path(&self) -> PathBuf {
        self.build_config_path
            .clone()
            .unwrap_or_else(|| self.plugin_path.join("build_config.json"))
    }

    /// Set the build config path.
    pub fn set_build_config_path(&mut self, build_config_path: impl Into<PathBuf>) -> &mut Self {
        self.build_config_path = Some(build_config_path.into());
        self
    }
}

static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();

/// Returns a reference to the global `h5filters` configuration.
pub fn global_config() -> RwLockReadGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Returns a mutable reference to the global `h5filters` configuration.
pub fn global_config_mut() -> RwLockWriteGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .write()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Returns the build configuration of the plugins.
///
/// It is loaded once from the [build config path](Config::build_config_path).
/// If it cannot be loaded, no filter is embedded.
pub fn build_config() -> &'static BuildConfig {
    static BUILD_CONFIG: OnceLock<BuildConfig> = OnceLock::new();
    BUILD_CONFIG.get_or_init(|| {
        let path = global_config().build_config_path();
        BuildConfig::load(&path).unwrap_or_else(|err| {
            log::warn!(
                "cannot load the filter build configuration {}: {err}",
                path.display()
            );
            BuildConfig::default()
        })
    })
}
