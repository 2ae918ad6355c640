//! File system walker for document repository scanning.
//! Uses `walkdir` for recursive traversal; selection filtering happens
//! here so the engine only ever sees names and folders.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file discovered during scanning.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// The containing folder.
    pub folder: PathBuf,
    /// File name as-is from the filesystem.
    pub name: String,
}

/// List first-level subfolders of the root, sorted case-insensitively.
/// Feeds the `--include` selection surface.
pub fn list_subfolders(root: &Path) -> Result<Vec<PathBuf>, String> {
    if !root.is_dir() {
        return Err(format!("Root is not a directory: {}", root.display()));
    }

    let entries =
        std::fs::read_dir(root).map_err(|e| format!("Failed to read root directory: {e}"))?;

    let mut subfolders: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();

    subfolders.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });

    Ok(subfolders)
}

/// Walk the root recursively and return every file, paired with its
/// containing folder.
///
/// When `selected` is non-empty, only files whose folder equals or
/// descends from one of the selected folders are returned. Unreadable
/// entries are logged and skipped.
pub fn collect_files(root: &Path, selected: &[PathBuf]) -> Result<Vec<FileEntry>, String> {
    if !root.exists() {
        return Err(format!("Root path does not exist: {}", root.display()));
    }
    if !root.is_dir() {
        return Err(format!("Root path is not a directory: {}", root.display()));
    }

    let walker = WalkDir::new(root).follow_links(false).into_iter();
    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path().to_path_buf();
        let Some(folder) = path.parent().map(Path::to_path_buf) else {
            continue;
        };

        if !selected.is_empty() && !selected.iter().any(|sd| folder.starts_with(sd)) {
            continue;
        }

        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };

        files.push(FileEntry { path, folder, name });
    }

    Ok(files)
}
