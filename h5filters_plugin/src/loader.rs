use std::path::{Path, PathBuf};

use h5filters_registry::{filter_name, filter_names, FILTERS};

use crate::{
    default_init_entry_point, probe_is_reliable, resolve_plugin_file, Availability, BuildConfig,
    FilterHost, InitEntryPoint, LibraryOpener, NativeLibraryOpener, PluginInfo, PluginRegistry,
    PluginRegistryEntry, RegisterError,
};

/// A filter given by name or by HDF5 filter identifier.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FilterKey {
    /// A filter name, e.g. `"zstd"`.
    Name(String),
    /// An HDF5 filter identifier, e.g. `32015`.
    Id(u32),
}

impl From<&str> for FilterKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FilterKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<u32> for FilterKey {
    fn from(filter_id: u32) -> Self {
        Self::Id(filter_id)
    }
}

impl FilterKey {
    /// Resolve the key to a known filter `(name, filter_id)`.
    ///
    /// # Errors
    /// Returns [`RegisterError::UnknownFilter`] if no known filter matches the key.
    pub fn resolve(&self) -> Result<(&'static str, u32), RegisterError> {
        match self {
            Self::Name(name) => lookup(name),
            Self::Id(filter_id) => filter_name(*filter_id)
                .map(|name| (name, *filter_id))
                .ok_or_else(|| RegisterError::UnknownFilter(filter_id.to_string())),
        }
    }
}

fn lookup(name: &str) -> Result<(&'static str, u32), RegisterError> {
    FILTERS
        .iter()
        .find(|(known, _)| *known == name)
        .copied()
        .ok_or_else(|| RegisterError::UnknownFilter(name.to_string()))
}

/// The registration state of a filter.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum FilterState {
    /// The filter is not available to the runtime.
    Unavailable,
    /// The filter is available to the runtime but was not registered by this loader.
    AvailableExternal,
    /// The filter was registered by this loader.
    AvailableOurs,
}

/// Registers the native filter plugins of a build with a [`FilterHost`].
pub struct PluginLoader<H> {
    host: H,
    build_config: BuildConfig,
    plugin_path: PathBuf,
    opener: Box<dyn LibraryOpener>,
    init_entry_point: Box<dyn InitEntryPoint>,
    registry: PluginRegistry,
}

impl<H: FilterHost> PluginLoader<H> {
    /// Create a loader of the plugins in `plugin_path` built with `build_config`.
    ///
    /// Plugins are opened with [`NativeLibraryOpener`] and initialized with the [`default_init_entry_point`].
    #[must_use]
    pub fn new(host: H, build_config: BuildConfig, plugin_path: impl Into<PathBuf>) -> Self {
        Self {
            host,
            build_config,
            plugin_path: plugin_path.into(),
            opener: Box::new(NativeLibraryOpener),
            init_entry_point: default_init_entry_point(),
            registry: PluginRegistry::new(),
        }
    }

    /// Replace the plugin library opener.
    #[must_use]
    pub fn with_opener(mut self, opener: impl LibraryOpener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    /// Replace the plugin initialization entry point.
    #[must_use]
    pub fn with_init_entry_point(mut self, init_entry_point: impl InitEntryPoint + 'static) -> Self {
        self.init_entry_point = Box::new(init_entry_point);
        self
    }

    /// The hosting runtime.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The build configuration.
    #[must_use]
    pub fn build_config(&self) -> &BuildConfig {
        &self.build_config
    }

    /// The plugin directory.
    #[must_use]
    pub fn plugin_path(&self) -> &Path {
        &self.plugin_path
    }

    /// The plugins registered by this loader.
    #[must_use]
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Returns the availability of filter `name` in the hosting runtime.
    ///
    /// The availability is [`Availability::Unknown`] if the runtime version cannot probe reliably or the probe fails.
    ///
    /// # Errors
    /// Returns [`RegisterError::UnknownFilter`] if `name` is not a known filter.
    pub fn is_available(&self, name: &str) -> Result<Availability, RegisterError> {
        let (name, filter_id) = lookup(name)?;
        Ok(self.availability(name, filter_id))
    }

    fn availability(&self, name: &str, filter_id: u32) -> Availability {
        let version = self.host.version();
        if !probe_is_reliable(version) {
            log::debug!("HDF5 {version} cannot tell if filter {name} is available");
            return Availability::Unknown;
        }
        match self.host.filter_avail(filter_id) {
            Ok(true) => Availability::Available,
            Ok(false) => Availability::Unavailable,
            Err(err) => {
                log::warn!("failed to probe filter {name}: {err}");
                Availability::Unknown
            }
        }
    }

    /// Returns the registration state of filter `name`.
    ///
    /// An [`Availability::Unknown`] filter is assumed to be available.
    ///
    /// # Errors
    /// Returns [`RegisterError::UnknownFilter`] if `name` is not a known filter.
    pub fn filter_state(&self, name: &str) -> Result<FilterState, RegisterError> {
        let (name, filter_id) = lookup(name)?;
        let availability = self.availability(name, filter_id);
        Ok(if !availability.maybe_available() {
            FilterState::Unavailable
        } else if self.registry.contains(name) {
            FilterState::AvailableOurs
        } else {
            FilterState::AvailableExternal
        })
    }

    /// Register the plugin of filter `name`, replacing any filter with the same identifier.
    ///
    /// # Errors
    /// Returns a [`RegisterError`] if
    ///  - `name` is not a known filter,
    ///  - the filter is not embedded in the build,
    ///  - its plugin library cannot be found or opened,
    ///  - the plugin initialization fails, or
    ///  - the runtime rejects the existing or new filter.
    pub fn try_register_filter(&mut self, name: &str) -> Result<(), RegisterError> {
        let (name, filter_id) = lookup(name)?;
        if !self.build_config.is_embedded(name) {
            return Err(RegisterError::Unavailable(name.to_string()));
        }

        match self.availability(name, filter_id) {
            Availability::Available => self.host.unregister(filter_id).map_err(|err| {
                RegisterError::registration_failure(
                    name,
                    format!("failed to unregister the current filter: {err}"),
                )
            })?,
            Availability::Unknown => {
                if let Err(err) = self.host.unregister(filter_id) {
                    log::debug!("ignoring failure to unregister filter {name}: {err}");
                }
            }
            Availability::Unavailable => {}
        }
        self.registry.remove(name);

        let known_names: Vec<&str> = filter_names().collect();
        let path = resolve_plugin_file(
            &self.plugin_path,
            name,
            &self.build_config.filter_file_extension,
            &known_names,
        )?;
        let library = self.opener.open(&path)?;

        let symbol = self.init_entry_point.symbol();
        match self
            .init_entry_point
            .run(library.as_ref(), self.host.module_path())
        {
            Ok(Some(status)) if status < 0 => {
                return Err(RegisterError::registration_failure(
                    name,
                    format!("{symbol} returned {status}"),
                ));
            }
            Ok(Some(_)) => {}
            Ok(None) => log::debug!("{} does not export {symbol}", path.display()),
            Err(err) => return Err(RegisterError::registration_failure(name, err)),
        }

        let info = library.plugin_info().ok_or_else(|| {
            RegisterError::registration_failure(name, "H5PLget_plugin_info is not exported")
        })?;
        let info = PluginInfo::new(info).ok_or_else(|| {
            RegisterError::registration_failure(name, "H5PLget_plugin_info returned null")
        })?;
        self.host
            .register_plugin(info)
            .map_err(|err| RegisterError::registration_failure(name, err))?;

        log::debug!("registered filter {name} ({})", path.display());
        self.registry
            .insert(name, PluginRegistryEntry::new(path, library));
        Ok(())
    }

    /// Register the plugin of filter `name`, replacing any filter with the same identifier.
    ///
    /// Returns true on success. Failures are logged.
    pub fn register_filter(&mut self, name: &str) -> bool {
        match self.try_register_filter(name) {
            Ok(()) => true,
            Err(err @ RegisterError::Unavailable(_)) => {
                log::debug!("{err}");
                false
            }
            Err(err) => {
                log::error!("cannot register filter {name}: {err}");
                false
            }
        }
    }

    /// Register the plugins of `filters`, or of every known filter if [`None`].
    ///
    /// Filters that are already available are skipped unless `force` is true.
    /// Every filter is attempted. Returns true if all succeeded or were skipped.
    pub fn register(&mut self, filters: Option<&[FilterKey]>, force: bool) -> bool {
        let keys: Vec<FilterKey> = match filters {
            Some(filters) => filters.to_vec(),
            None => filter_names().map(FilterKey::from).collect(),
        };
        let mut status = true;
        for key in &keys {
            let (name, filter_id) = match key.resolve() {
                Ok(filter) => filter,
                Err(err) => {
                    log::error!("{err}");
                    status = false;
                    continue;
                }
            };
            if !force && self.availability(name, filter_id) == Availability::Available {
                log::info!("{name} filter already loaded, skip it");
                continue;
            }
            status &= self.register_filter(name);
        }
        status
    }
}
