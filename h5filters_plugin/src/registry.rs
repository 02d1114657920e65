use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::FilterLibrary;

/// A plugin library registered by a [`PluginLoader`](crate::PluginLoader).
#[derive(Debug)]
pub struct PluginRegistryEntry {
    path: PathBuf,
    library: Box<dyn FilterLibrary>,
}

impl PluginRegistryEntry {
    /// Create a new registry entry.
    #[must_use]
    pub fn new(path: PathBuf, library: Box<dyn FilterLibrary>) -> Self {
        Self { path, library }
    }

    /// The path of the plugin library.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The plugin library.
    #[must_use]
    pub fn library(&self) -> &dyn FilterLibrary {
        self.library.as_ref()
    }
}

/// The plugin libraries registered by a [`PluginLoader`](crate::PluginLoader), by filter name.
///
/// There is at most one entry per filter.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    entries: BTreeMap<String, PluginRegistryEntry>,
}

impl PluginRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the entry of filter `name`, returning the entry it replaces.
    pub fn insert(&mut self, name: &str, entry: PluginRegistryEntry) -> Option<PluginRegistryEntry> {
        self.entries.insert(name.to_string(), entry)
    }

    /// Remove the entry of filter `name`.
    pub fn remove(&mut self, name: &str) -> Option<PluginRegistryEntry> {
        self.entries.remove(name)
    }

    /// Return the entry of filter `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PluginRegistryEntry> {
        self.entries.get(name)
    }

    /// Returns true if filter `name` has an entry.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The plugin library path of every registered filter.
    #[must_use]
    pub fn registered_filters(&self) -> BTreeMap<String, PathBuf> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.path.clone()))
            .collect()
    }
}
