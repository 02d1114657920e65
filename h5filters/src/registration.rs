//! Process-wide registration of the native filter plugins with HDF5.

use std::{
    collections::BTreeMap,
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use h5filters_plugin::{
    Availability, BuildConfig, FilterKey, Hdf5Library, PluginLoader, RegisterError,
};
use serde::Serialize;

use crate::config::{build_config, global_config};

type Loader = Option<PluginLoader<Hdf5Library>>;

static LOADER: OnceLock<Mutex<Loader>> = OnceLock::new();

fn create_loader() -> Loader {
    let config = global_config().clone();
    let hdf5 = match Hdf5Library::open(config.hdf5_library()) {
        Ok(hdf5) => hdf5,
        Err(err) => {
            log::error!("filters cannot be registered: {err}");
            return None;
        }
    };
    let mut loader = PluginLoader::new(hdf5, build_config().clone(), config.plugin_path());
    if !loader.register(None, false) {
        log::debug!("some filters were not registered");
    }
    Some(loader)
}

fn loader() -> MutexGuard<'static, Loader> {
    LOADER
        .get_or_init(|| Mutex::new(create_loader()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Open the HDF5 library and register every filter embedded in the build that HDF5 does not already provide.
///
/// This runs once, on the first [`FilterDescriptor`](crate::FilterDescriptor) creation or the first call to [`init`], [`register`], [`register_filter`], [`is_filter_available`] or [`get_config`].
/// Later calls have no effect.
///
/// Returns false if the HDF5 library could not be opened, in which case no filter can be registered.
pub fn init() -> bool {
    loader().is_some()
}

/// Register the filter plugins of `filters`, or of every known filter if [`None`].
///
/// Filters already available to HDF5 are skipped unless `force` is true.
/// Returns true if every filter was registered or skipped. Failures are logged.
pub fn register(filters: Option<&[FilterKey]>, force: bool) -> bool {
    loader()
        .as_mut()
        .is_some_and(|loader| loader.register(filters, force))
}

/// Register the filter plugin of `name`, replacing any filter with the same identifier.
///
/// Returns true on success. Failures are logged.
pub fn register_filter(name: &str) -> bool {
    loader()
        .as_mut()
        .is_some_and(|loader| loader.register_filter(name))
}

/// Returns the availability of filter `name` in HDF5.
///
/// The availability is [`Availability::Unknown`] if the HDF5 library could not be opened.
///
/// # Errors
/// Returns [`RegisterError::UnknownFilter`] if `name` is not a known filter.
pub fn is_filter_available(name: &str) -> Result<Availability, RegisterError> {
    match loader().as_ref() {
        Some(loader) => loader.is_available(name),
        None => h5filters_registry::filter_id(name)
            .map(|_| Availability::Unknown)
            .ok_or_else(|| RegisterError::UnknownFilter(name.to_string())),
    }
}

/// The build configuration and the registered filters.
#[derive(Serialize, Clone, Debug)]
pub struct H5FiltersConfig {
    /// The build configuration of the plugins.
    pub build_config: BuildConfig,
    /// The plugin library path of every filter registered by `h5filters`.
    pub registered_filters: BTreeMap<String, PathBuf>,
}

/// Returns the build configuration and the filters registered by `h5filters`.
#[must_use]
pub fn get_config() -> H5FiltersConfig {
    let registered_filters = loader()
        .as_ref()
        .map(|loader| loader.registry().registered_filters())
        .unwrap_or_default();
    H5FiltersConfig {
        build_config: build_config().clone(),
        registered_filters,
    }
}
