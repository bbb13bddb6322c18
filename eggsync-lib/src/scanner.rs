//! Repository scanner for egg definition files.
//!
//! Finds every `egg-*.json` under the repository root and derives the game
//! slug each file belongs to. Results come back in sorted path order so
//! repeated runs (and dry-run previews) are reproducible.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Directory under the repository root that is never scanned. It holds the
/// tool's own files and fixtures, which must not be imported as eggs.
pub const EXCLUDED_DIR: &str = "tools";

/// One discovered egg definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EggFile {
    /// Game slug: the first path component relative to the repository root.
    pub slug: String,
    /// Absolute or root-relative path to the `egg-*.json` file.
    pub path: PathBuf,
}

fn is_egg_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("egg-") && n.ends_with(".json"))
        .unwrap_or(false)
}

fn collect_eggs(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            // Unreadable subtrees are omitted, not fatal.
            log::warn!("Skipping unreadable directory {}: {e}", dir.display());
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_eggs(&path, out);
        } else if path.is_file() && is_egg_file(&path) {
            out.push(path);
        }
    }
}

/// Scan the repository for egg definition files.
///
/// Skips everything under `root/tools`. Only a failure to read `root` itself
/// is an error; unreadable subdirectories are logged and omitted.
pub fn scan_eggs(root: &Path) -> io::Result<Vec<EggFile>> {
    let mut paths = Vec::new();

    let entries: Vec<fs::DirEntry> = fs::read_dir(root)?.flatten().collect();
    for entry in &entries {
        let path = entry.path();
        if path.is_dir() {
            if entry.file_name() == EXCLUDED_DIR {
                continue;
            }
            collect_eggs(&path, &mut paths);
        } else if path.is_file() && is_egg_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| {
            let slug = path
                .strip_prefix(root)
                .ok()
                .and_then(|rel| rel.components().next())
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .unwrap_or_default();
            EggFile { slug, path }
        })
        .collect())
}

/// Load and parse an egg definition file.
///
/// Read or parse failures are logged as warnings and yield `None`; the caller
/// counts the file as failed and continues with the rest of the run.
pub fn load_egg(path: &Path) -> Option<Value> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Could not read {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Could not parse {}: {e}", path.display());
            None
        }
    }
}

/// Display name of an egg: the payload's `name` field, or the file stem when
/// the field is missing.
pub fn egg_name(egg: &Value, path: &Path) -> String {
    egg.get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "?".to_string())
        })
}
