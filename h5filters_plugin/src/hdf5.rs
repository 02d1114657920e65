use std::{
    ffi::{c_int, c_uint, c_void},
    path::{Path, PathBuf},
};

use libloading::Library;

use crate::{FilterHost, HostError, LibVersion, PluginInfo};

type H5OpenFn = unsafe extern "C" fn() -> c_int;
type H5GetLibversionFn = unsafe extern "C" fn(*mut c_uint, *mut c_uint, *mut c_uint) -> c_int;
type H5ZFilterAvailFn = unsafe extern "C" fn(c_int) -> c_int;
type H5ZRegisterFn = unsafe extern "C" fn(*const c_void) -> c_int;
type H5ZUnregisterFn = unsafe extern "C" fn(c_int) -> c_int;

/// The HDF5 runtime of the process, accessed through its exported C functions.
///
/// Opening the library that the process already uses binds to the same runtime instance and filter table.
#[derive(Debug)]
pub struct Hdf5Library {
    path: PathBuf,
    version: LibVersion,
    filter_avail: H5ZFilterAvailFn,
    register: H5ZRegisterFn,
    unregister: H5ZUnregisterFn,
    _library: Library,
}

/// Look up the function `name` in `library`.
///
/// # Safety
/// `T` must be the function pointer type of `name`. The pointer is only valid while `library` is loaded.
unsafe fn symbol<T: Copy>(library: &Library, name: &'static str) -> Result<T, HostError> {
    // SAFETY: The caller guarantees `T` matches the symbol.
    unsafe { library.get::<T>(name.as_bytes()) }
        .map(|symbol| *symbol)
        .map_err(|source| HostError::MissingSymbol {
            symbol: name,
            source,
        })
}

fn check(function: &'static str, status: c_int) -> Result<c_int, HostError> {
    if status < 0 {
        Err(HostError::Status { function, status })
    } else {
        Ok(status)
    }
}

impl Hdf5Library {
    /// Open the HDF5 library at `path` and initialize it.
    ///
    /// # Errors
    /// Returns a [`HostError`] if the library cannot be opened, does not export the filter functions, or fails to initialize.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        // SAFETY: Loading HDF5 runs its initializers, which is the library the process uses anyway.
        let library = unsafe { Library::new(path) }.map_err(|source| HostError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        // SAFETY: The types match the HDF5 C API. `library` is kept in the returned value.
        let (h5open, get_libversion, filter_avail, register, unregister) = unsafe {
            (
                symbol::<H5OpenFn>(&library, "H5open")?,
                symbol::<H5GetLibversionFn>(&library, "H5get_libversion")?,
                symbol::<H5ZFilterAvailFn>(&library, "H5Zfilter_avail")?,
                symbol::<H5ZRegisterFn>(&library, "H5Zregister")?,
                symbol::<H5ZUnregisterFn>(&library, "H5Zunregister")?,
            )
        };

        // SAFETY: H5open may be called any number of times.
        check("H5open", unsafe { h5open() })?;
        let (mut major, mut minor, mut release): (c_uint, c_uint, c_uint) = (0, 0, 0);
        // SAFETY: The pointers are valid for writes.
        check("H5get_libversion", unsafe {
            get_libversion(&mut major, &mut minor, &mut release)
        })?;

        let version = LibVersion::new(major, minor, release);
        log::debug!("opened HDF5 {version} from {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            version,
            filter_avail,
            register,
            unregister,
            _library: library,
        })
    }

    /// Open the HDF5 library by its platform file name (e.g. `libhdf5.so`) using the system search path.
    ///
    /// # Errors
    /// Returns a [`HostError`] if the library cannot be opened or initialized.
    pub fn open_default() -> Result<Self, HostError> {
        Self::open(libloading::library_filename("hdf5"))
    }
}

impl FilterHost for Hdf5Library {
    fn version(&self) -> LibVersion {
        self.version
    }

    fn filter_avail(&self, filter_id: u32) -> Result<bool, HostError> {
        // SAFETY: `H5Zfilter_avail` accepts any filter identifier.
        let status = unsafe { (self.filter_avail)(filter_id.cast_signed()) };
        Ok(check("H5Zfilter_avail", status)? > 0)
    }

    fn register_plugin(&self, info: PluginInfo) -> Result<(), HostError> {
        // SAFETY: `info` is the `H5Z_class2_t` returned by the plugin's `H5PLget_plugin_info`.
        let status = unsafe { (self.register)(info.as_ptr()) };
        check("H5Zregister", status).map(|_| ())
    }

    fn unregister(&self, filter_id: u32) -> Result<(), HostError> {
        // SAFETY: `H5Zunregister` accepts any filter identifier.
        let status = unsafe { (self.unregister)(filter_id.cast_signed()) };
        check("H5Zunregister", status).map(|_| ())
    }

    fn module_path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hdf5_open_missing() {
        let directory = tempfile::tempdir().unwrap();
        let error = Hdf5Library::open(directory.path().join("libhdf5_missing.so")).unwrap_err();
        assert!(matches!(error, HostError::Open { .. }));
        assert!(error.to_string().contains("libhdf5_missing.so"));
    }
}
