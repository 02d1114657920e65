use std::{fmt::Display, path::Path};

use crate::{HostError, PluginInfo};

/// The version of the hosting HDF5 runtime.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct LibVersion {
    /// The major version.
    pub major: u32,
    /// The minor version.
    pub minor: u32,
    /// The release number.
    pub release: u32,
}

impl LibVersion {
    /// Create a new [`LibVersion`].
    #[must_use]
    pub const fn new(major: u32, minor: u32, release: u32) -> Self {
        Self {
            major,
            minor,
            release,
        }
    }
}

impl Display for LibVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)
    }
}

/// Returns true if `H5Zfilter_avail` gives a trustworthy answer in HDF5 `version`.
///
/// Versions before 1.8.20 and 1.10.0 to 1.10.1 report filters as available that are not.
#[must_use]
pub fn probe_is_reliable(version: LibVersion) -> bool {
    (LibVersion::new(1, 8, 20)..LibVersion::new(1, 10, 0)).contains(&version)
        || version >= LibVersion::new(1, 10, 2)
}

/// The availability of a filter in the hosting runtime.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Availability {
    /// The filter is registered.
    Available,
    /// The filter is not registered.
    Unavailable,
    /// The runtime cannot tell reliably.
    Unknown,
}

impl Availability {
    /// Returns true unless the filter is known to be unavailable.
    #[must_use]
    pub const fn maybe_available(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// The filter table of a hosting HDF5 runtime.
pub trait FilterHost: Send {
    /// The runtime version.
    fn version(&self) -> LibVersion;

    /// Probe whether a filter with `filter_id` is registered (`H5Zfilter_avail`).
    ///
    /// # Errors
    /// Returns a [`HostError`] if the probe fails.
    fn filter_avail(&self, filter_id: u32) -> Result<bool, HostError>;

    /// Register the filter class described by a plugin (`H5Zregister`).
    ///
    /// # Errors
    /// Returns a [`HostError`] if the runtime rejects the filter class.
    fn register_plugin(&self, info: PluginInfo) -> Result<(), HostError>;

    /// Unregister the filter with `filter_id` (`H5Zunregister`).
    ///
    /// # Errors
    /// Returns a [`HostError`] if the runtime fails to unregister the filter.
    fn unregister(&self, filter_id: u32) -> Result<(), HostError>;

    /// The path of the runtime's loadable module, passed to plugins that bind against it.
    fn module_path(&self) -> &Path;
}
