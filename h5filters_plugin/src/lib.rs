//! Dynamic loading and HDF5 registration of the native filter plugins shipped with the `h5filters` crate.
//!
//! Every filter embedded in a build is a shared library named `libh5{name}*{ext}` in the plugin directory.
//! A [`PluginLoader`] registers these libraries with the HDF5 runtime of the process:
//!  - it probes whether the filter is already available to HDF5,
//!  - unregisters any existing filter with the same identifier,
//!  - opens the plugin library and runs its initialization entry point, and
//!  - hands the plugin's `H5Z_class2_t` to `H5Zregister`.
//!
//! The HDF5 runtime and the dynamic loader are accessed through the [`FilterHost`] and [`LibraryOpener`] traits.
//! [`Hdf5Library`] and [`NativeLibraryOpener`] are their native implementations.
//!
//! ## Licence
//! `h5filters_plugin` is licensed under either of
//!  - the Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license <http://opensource.org/licenses/MIT>, at your option.

use std::path::PathBuf;

use thiserror::Error;

mod build_config;
pub use build_config::{BuildCapability, BuildConfig, BuildConfigError};

mod host;
pub use host::{probe_is_reliable, Availability, FilterHost, LibVersion};

mod hdf5;
pub use hdf5::Hdf5Library;

mod library;
pub use library::{FilterLibrary, LibraryOpener, NativeFilterLibrary, NativeLibraryOpener, PluginInfo};

mod init;
pub use init::{
    default_init_entry_point, InitByPath, InitEntryPoint, ModulePathError, SelfRegister,
};

mod resolve;
pub use resolve::resolve_plugin_file;

mod registry;
pub use registry::{PluginRegistry, PluginRegistryEntry};

mod loader;
pub use loader::{FilterKey, FilterState, PluginLoader};

/// An error from the hosting HDF5 runtime.
#[derive(Debug, Error)]
pub enum HostError {
    /// The HDF5 library could not be opened.
    #[error("failed to open the HDF5 library {}: {source}", path.display())]
    Open {
        /// The path of the library.
        path: PathBuf,
        /// The underlying error.
        source: libloading::Error,
    },
    /// A required function is not exported by the HDF5 library.
    #[error("the HDF5 library does not export {symbol}: {source}")]
    MissingSymbol {
        /// The symbol name.
        symbol: &'static str,
        /// The underlying error.
        source: libloading::Error,
    },
    /// An HDF5 function returned a negative status.
    #[error("{function} failed with status {status}")]
    Status {
        /// The HDF5 function name.
        function: &'static str,
        /// The returned status.
        status: i32,
    },
}

/// A plugin library loading error.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No plugin file matches the filter.
    #[error("no plugin file for filter {name} in {}", directory.display())]
    NotFound {
        /// The filter name.
        name: String,
        /// The plugin directory.
        directory: PathBuf,
    },
    /// Several plugin files match the filter.
    #[error("ambiguous plugin files for filter {name}: {candidates:?}")]
    Ambiguous {
        /// The filter name.
        name: String,
        /// The matching files.
        candidates: Vec<PathBuf>,
    },
    /// The plugin library could not be opened.
    #[error("failed to open plugin library {}: {reason}", path.display())]
    Open {
        /// The library path.
        path: PathBuf,
        /// The reason reported by the loader.
        reason: String,
    },
    /// The plugin directory could not be listed.
    #[error("failed to list plugin directory {}: {source}", directory.display())]
    Io {
        /// The plugin directory.
        directory: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}

/// A filter registration error.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The filter name or identifier is not known.
    #[error("unknown filter {0}")]
    UnknownFilter(String),
    /// The filter is not embedded in this build.
    #[error("filter {0} is not available in this build")]
    Unavailable(String),
    /// The plugin library could not be found or loaded.
    #[error(transparent)]
    LoadFailure(#[from] LoadError),
    /// The plugin failed to initialize or HDF5 rejected it.
    #[error("failed to register filter {name}: {reason}")]
    RegistrationFailure {
        /// The filter name.
        name: String,
        /// The failure reason.
        reason: String,
    },
}

impl RegisterError {
    pub(crate) fn registration_failure(name: &str, reason: impl ToString) -> Self {
        Self::RegistrationFailure {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
