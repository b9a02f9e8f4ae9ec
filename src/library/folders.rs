use std::io;
use std::path::{Path, PathBuf};

/// Resolve a user-picked folder to its canonical absolute path.
pub fn resolve(folder: &Path) -> io::Result<PathBuf> {
    std::fs::canonicalize(folder)
}

/// Deduplicate, drop folders nested inside another listed folder, and sort.
pub fn remove_useless_folders(mut folders: Vec<PathBuf>) -> Vec<PathBuf> {
    folders.sort();
    folders.dedup();

    // After sorting, a parent always precedes its children.
    let mut kept: Vec<PathBuf> = Vec::with_capacity(folders.len());
    for folder in folders {
        if !kept.iter().any(|parent| folder.starts_with(parent)) {
            kept.push(folder);
        }
    }
    kept
}

/// Merge newly added folders into the configured list.
pub fn merge(existing: &[PathBuf], added: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut folders = existing.to_vec();
    folders.extend(added);
    remove_useless_folders(folders)
}
