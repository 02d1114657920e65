#![allow(dead_code)]

use std::{
    collections::{BTreeSet, HashMap},
    ffi::{c_int, c_void, CStr},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use h5filters_plugin::{
    BuildConfig, FilterHost, FilterLibrary, HostError, LibVersion, LibraryOpener, LoadError,
    PluginInfo, PluginLoader,
};
use h5filters_registry::filter_id;

/// The leading fields of `H5Z_class2_t`.
#[repr(C)]
#[derive(Debug)]
pub struct MockClass {
    pub version: c_int,
    pub id: c_int,
}

#[derive(Default, Debug)]
pub struct HostState {
    pub table: BTreeSet<u32>,
    pub probe_error: bool,
    pub reject_register: bool,
    pub reject_unregister: bool,
    pub unregister_calls: Vec<u32>,
}

#[derive(Clone, Debug)]
pub struct MockHost {
    pub version: LibVersion,
    pub module_path: PathBuf,
    pub state: Arc<Mutex<HostState>>,
}

impl MockHost {
    pub fn new(version: LibVersion) -> Self {
        Self {
            version,
            module_path: PathBuf::from("/opt/hdf5/lib/libhdf5.so"),
            state: Arc::default(),
        }
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, HostState> {
        self.state.lock().unwrap()
    }
}

impl FilterHost for MockHost {
    fn version(&self) -> LibVersion {
        self.version
    }

    fn filter_avail(&self, filter_id: u32) -> Result<bool, HostError> {
        let state = self.state();
        if state.probe_error {
            return Err(HostError::Status {
                function: "H5Zfilter_avail",
                status: -1,
            });
        }
        Ok(state.table.contains(&filter_id))
    }

    fn register_plugin(&self, info: PluginInfo) -> Result<(), HostError> {
        let mut state = self.state();
        if state.reject_register {
            return Err(HostError::Status {
                function: "H5Zregister",
                status: -1,
            });
        }
        // SAFETY: The mock plugins return a `MockClass`.
        let class = unsafe { &*info.as_ptr().cast::<MockClass>() };
        state.table.insert(class.id.cast_unsigned());
        Ok(())
    }

    fn unregister(&self, filter_id: u32) -> Result<(), HostError> {
        let mut state = self.state();
        state.unregister_calls.push(filter_id);
        if state.reject_unregister || !state.table.remove(&filter_id) {
            return Err(HostError::Status {
                function: "H5Zunregister",
                status: -1,
            });
        }
        Ok(())
    }

    fn module_path(&self) -> &Path {
        &self.module_path
    }
}

/// How a mock plugin behaves.
#[derive(Clone, Debug)]
pub struct Behaviour {
    pub open_error: bool,
    pub init_status: Option<c_int>,
    pub register_status: Option<c_int>,
    pub export_plugin_info: bool,
    pub null_plugin_info: bool,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            open_error: false,
            init_status: Some(0),
            register_status: Some(0),
            export_plugin_info: true,
            null_plugin_info: false,
        }
    }
}

#[derive(Default, Debug)]
pub struct OpenerState {
    pub behaviours: HashMap<String, Behaviour>,
    pub opened: Vec<PathBuf>,
    pub init_paths: Vec<String>,
    pub self_registered: Vec<String>,
}

#[derive(Clone, Default, Debug)]
pub struct MockOpener {
    pub state: Arc<Mutex<OpenerState>>,
}

impl MockOpener {
    pub fn set(&self, name: &str, behaviour: Behaviour) {
        self.state
            .lock()
            .unwrap()
            .behaviours
            .insert(name.to_string(), behaviour);
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().opened.clone()
    }
}

#[derive(Debug)]
struct MockLibrary {
    name: String,
    class: Box<MockClass>,
    behaviour: Behaviour,
    state: Arc<Mutex<OpenerState>>,
}

impl FilterLibrary for MockLibrary {
    fn init_filter(&self, module_path: &CStr) -> Option<c_int> {
        let status = self.behaviour.init_status?;
        self.state
            .lock()
            .unwrap()
            .init_paths
            .push(module_path.to_string_lossy().into_owned());
        Some(status)
    }

    fn register_filter(&self) -> Option<c_int> {
        let status = self.behaviour.register_status?;
        self.state
            .lock()
            .unwrap()
            .self_registered
            .push(self.name.clone());
        Some(status)
    }

    fn plugin_info(&self) -> Option<*const c_void> {
        if !self.behaviour.export_plugin_info {
            None
        } else if self.behaviour.null_plugin_info {
            Some(std::ptr::null())
        } else {
            Some(std::ptr::from_ref(self.class.as_ref()).cast())
        }
    }
}

impl LibraryOpener for MockOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn FilterLibrary>, LoadError> {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.strip_prefix("libh5"))
            .unwrap()
            .to_string();
        let mut state = self.state.lock().unwrap();
        state.opened.push(path.to_path_buf());
        let behaviour = state.behaviours.get(&name).cloned().unwrap_or_default();
        if behaviour.open_error {
            return Err(LoadError::Open {
                path: path.to_path_buf(),
                reason: "mock open error".to_string(),
            });
        }
        let id = filter_id(&name).unwrap().cast_signed();
        Ok(Box::new(MockLibrary {
            name,
            class: Box::new(MockClass { version: 1, id }),
            behaviour,
            state: Arc::clone(&self.state),
        }))
    }
}

/// A plugin directory with an empty `libh5{name}.so` per name.
pub fn plugin_dir(names: &[&str]) -> tempfile::TempDir {
    let directory = tempfile::tempdir().unwrap();
    for name in names {
        std::fs::write(directory.path().join(format!("libh5{name}.so")), b"").unwrap();
    }
    directory
}

pub fn build_config(embedded: &[&str]) -> BuildConfig {
    BuildConfig {
        embedded_filters: embedded.iter().map(ToString::to_string).collect(),
        filter_file_extension: ".so".to_string(),
        ..Default::default()
    }
}

pub fn loader(
    version: LibVersion,
    embedded: &[&str],
    directory: &Path,
) -> (PluginLoader<MockHost>, MockHost, MockOpener) {
    let host = MockHost::new(version);
    let opener = MockOpener::default();
    let loader = PluginLoader::new(host.clone(), build_config(embedded), directory)
        .with_opener(opener.clone())
        .with_init_entry_point(h5filters_plugin::InitByPath);
    (loader, host, opener)
}
