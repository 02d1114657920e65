use std::{
    ffi::{c_int, CString},
    fmt::Debug,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::FilterLibrary;

/// A module path that cannot be passed to a plugin as a C string.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ModulePathError {
    /// The path contains a nul byte.
    #[error("module path {} contains a nul byte", path.display())]
    Nul {
        /// The module path.
        path: PathBuf,
    },
    /// The path is not valid UTF-8.
    #[error("module path {} is not valid UTF-8", path.display())]
    NotUtf8 {
        /// The module path.
        path: PathBuf,
    },
}

/// The plugin initialization entry point, selected once per platform.
pub trait InitEntryPoint: Send + Sync + Debug {
    /// The exported symbol name.
    fn symbol(&self) -> &'static str;

    /// Run the entry point of `library`.
    ///
    /// Returns the status returned by the plugin, or [`None`] if the library does not export the entry point.
    ///
    /// # Errors
    /// Returns a [`ModulePathError`] if `module_path` cannot be converted to a C string.
    fn run(
        &self,
        library: &dyn FilterLibrary,
        module_path: &Path,
    ) -> Result<Option<c_int>, ModulePathError>;
}

/// `int init_filter(const char*)`: the plugin binds to the HDF5 runtime at the given module path and registers itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct InitByPath;

/// `int register_filter(void)`: the plugin registers itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelfRegister;

#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn path_bytes(path: &Path) -> Result<&[u8], ModulePathError> {
    use std::os::unix::ffi::OsStrExt;
    Ok(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Result<&[u8], ModulePathError> {
    path.to_str()
        .map(str::as_bytes)
        .ok_or_else(|| ModulePathError::NotUtf8 {
            path: path.to_path_buf(),
        })
}

fn path_to_cstring(path: &Path) -> Result<CString, ModulePathError> {
    CString::new(path_bytes(path)?).map_err(|_| ModulePathError::Nul {
        path: path.to_path_buf(),
    })
}

impl InitEntryPoint for InitByPath {
    fn symbol(&self) -> &'static str {
        "init_filter"
    }

    fn run(
        &self,
        library: &dyn FilterLibrary,
        module_path: &Path,
    ) -> Result<Option<c_int>, ModulePathError> {
        let module_path = path_to_cstring(module_path)?;
        Ok(library.init_filter(&module_path))
    }
}

impl InitEntryPoint for SelfRegister {
    fn symbol(&self) -> &'static str {
        "register_filter"
    }

    fn run(
        &self,
        library: &dyn FilterLibrary,
        _module_path: &Path,
    ) -> Result<Option<c_int>, ModulePathError> {
        Ok(library.register_filter())
    }
}

/// The entry point used by the plugins of the target platform.
#[must_use]
pub fn default_init_entry_point() -> Box<dyn InitEntryPoint> {
    if cfg!(windows) {
        Box::new(SelfRegister)
    } else {
        Box::new(InitByPath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_path_nul() {
        let path = Path::new("/opt/hdf5/lib\0/libhdf5.so");
        assert_eq!(
            path_to_cstring(path),
            Err(ModulePathError::Nul {
                path: path.to_path_buf()
            })
        );
        assert_eq!(
            path_to_cstring(Path::new("/opt/hdf5/lib/libhdf5.so"))
                .unwrap()
                .to_bytes(),
            b"/opt/hdf5/lib/libhdf5.so"
        );
    }

    #[cfg(windows)]
    #[test]
    fn module_path_not_utf8() {
        use std::{ffi::OsString, os::windows::ffi::OsStringExt};
        let path = PathBuf::from(OsString::from_wide(&[0x0043, 0xD800]));
        assert!(matches!(
            path_to_cstring(&path),
            Err(ModulePathError::NotUtf8 { .. })
        ));
    }
}
