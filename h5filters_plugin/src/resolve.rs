use std::path::{Path, PathBuf};

use crate::LoadError;

/// Find the plugin library of filter `name` in `directory`.
///
/// The library is the file matching `libh5{name}*{extension}`.
/// Files matching the prefix of a longer filter name in `known_names` (e.g. `libh5blosc2` for `blosc`) are not candidates.
///
/// # Errors
/// Returns a [`LoadError`] if `directory` cannot be listed, or unless exactly one file remains.
pub fn resolve_plugin_file(
    directory: &Path,
    name: &str,
    extension: &str,
    known_names: &[&str],
) -> Result<PathBuf, LoadError> {
    let prefix = format!("libh5{name}");
    let competing_prefixes: Vec<String> = known_names
        .iter()
        .filter(|other| other.len() > name.len() && other.starts_with(name))
        .map(|other| format!("libh5{other}"))
        .collect();

    let entries = std::fs::read_dir(directory).map_err(|source| LoadError::Io {
        directory: directory.to_path_buf(),
        source,
    })?;
    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io {
            directory: directory.to_path_buf(),
            source,
        })?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let matches = file_name.len() >= prefix.len() + extension.len()
            && file_name.starts_with(&prefix)
            && file_name.ends_with(extension);
        if matches
            && !competing_prefixes
                .iter()
                .any(|competing| file_name.starts_with(competing.as_str()))
        {
            candidates.push(entry.path());
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(LoadError::NotFound {
            name: name.to_string(),
            directory: directory.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(LoadError::Ambiguous {
            name: name.to_string(),
            candidates,
        }),
    }
}
