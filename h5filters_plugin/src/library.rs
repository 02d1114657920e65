use std::{
    ffi::{c_char, c_int, c_void, CStr},
    fmt::Debug,
    mem::ManuallyDrop,
    path::Path,
    ptr::NonNull,
};

use libloading::{Library, Symbol};

use crate::LoadError;

/// A non-null pointer to the `H5Z_class2_t` filter class exported by a plugin.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct PluginInfo(NonNull<c_void>);

impl PluginInfo {
    /// Wrap a filter class pointer, or return [`None`] if it is null.
    #[must_use]
    pub fn new(ptr: *const c_void) -> Option<Self> {
        NonNull::new(ptr.cast_mut()).map(Self)
    }

    /// The filter class pointer.
    #[must_use]
    pub const fn as_ptr(self) -> *const c_void {
        self.0.as_ptr().cast_const()
    }
}

/// An opened native filter plugin library.
///
/// Each method returns [`None`] if the library does not export the corresponding symbol.
pub trait FilterLibrary: Send + Debug {
    /// Call `int init_filter(const char* hdf5_module_path)`.
    fn init_filter(&self, module_path: &CStr) -> Option<c_int>;

    /// Call `int register_filter(void)`.
    fn register_filter(&self) -> Option<c_int>;

    /// Call `const void* H5PLget_plugin_info(void)`.
    fn plugin_info(&self) -> Option<*const c_void>;
}

/// Opens plugin libraries.
pub trait LibraryOpener: Send {
    /// Open the plugin library at `path`.
    ///
    /// # Errors
    /// Returns a [`LoadError`] if the library cannot be opened.
    fn open(&self, path: &Path) -> Result<Box<dyn FilterLibrary>, LoadError>;
}

/// A plugin library opened with [`libloading`].
///
/// The library is never unloaded, since the HDF5 runtime may hold pointers into it after it is dropped.
#[derive(Debug)]
pub struct NativeFilterLibrary {
    library: ManuallyDrop<Library>,
}

type InitFilterFn = unsafe extern "C" fn(*const c_char) -> c_int;
type RegisterFilterFn = unsafe extern "C" fn() -> c_int;
type PluginInfoFn = unsafe extern "C" fn() -> *const c_void;

impl NativeFilterLibrary {
    /// Open the plugin library at `path`.
    ///
    /// # Errors
    /// Returns [`LoadError::Open`] if the library cannot be opened.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        // SAFETY: Loading a plugin runs its initializers. Plugins are the libraries built with this package.
        let library = unsafe { Library::new(path) }.map_err(|err| LoadError::Open {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            library: ManuallyDrop::new(library),
        })
    }
}

impl FilterLibrary for NativeFilterLibrary {
    fn init_filter(&self, module_path: &CStr) -> Option<c_int> {
        // SAFETY: The plugins export `init_filter` with this signature.
        let init_filter: Symbol<InitFilterFn> = unsafe { self.library.get(b"init_filter\0") }.ok()?;
        // SAFETY: `module_path` is nul-terminated and outlives the call.
        Some(unsafe { init_filter(module_path.as_ptr()) })
    }

    fn register_filter(&self) -> Option<c_int> {
        // SAFETY: The plugins export `register_filter` with this signature.
        let register_filter: Symbol<RegisterFilterFn> =
            unsafe { self.library.get(b"register_filter\0") }.ok()?;
        // SAFETY: The library is loaded.
        Some(unsafe { register_filter() })
    }

    fn plugin_info(&self) -> Option<*const c_void> {
        // SAFETY: `H5PLget_plugin_info` is the HDF5 plugin entry point with this signature.
        let plugin_info: Symbol<PluginInfoFn> =
            unsafe { self.library.get(b"H5PLget_plugin_info\0") }.ok()?;
        // SAFETY: The library is loaded. The returned class is static data of the library.
        Some(unsafe { plugin_info() })
    }
}

/// Opens plugin libraries as [`NativeFilterLibrary`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeLibraryOpener;

impl LibraryOpener for NativeLibraryOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn FilterLibrary>, LoadError> {
        Ok(Box::new(NativeFilterLibrary::open(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_info_null() {
        assert!(PluginInfo::new(std::ptr::null()).is_none());
        let class = 0u64;
        let ptr = std::ptr::from_ref(&class).cast::<c_void>();
        assert_eq!(PluginInfo::new(ptr).map(PluginInfo::as_ptr), Some(ptr));
    }

    #[test]
    fn native_open_missing() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("libh5missing.so");
        assert!(matches!(
            NativeLibraryOpener.open(&path),
            Err(LoadError::Open { .. })
        ));
    }
}
