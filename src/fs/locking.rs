//! Locked, atomic state-file access
//!
//! State files are written with write-temp-then-rename so a reader never sees
//! a half-written file. Writers additionally take an `fs2` advisory lock on a
//! sibling `.lock` file, so two hook processes racing on the same state file
//! serialize their renames (last writer wins).
//!
//! Advisory locks are cooperative - all participants must use these functions
//! for the locking to be effective.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Path of the advisory lock file guarding `path`.
pub fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

/// Read file contents with a shared (read) lock on the sibling lock file.
///
/// If the lock file cannot be created (read-only directory), the read still
/// proceeds: the rename-based writer guarantees the content is never torn.
pub fn locked_read(path: &Path) -> Result<String> {
    let guard = open_lock_file(path).ok();
    if let Some(lock) = &guard {
        lock.lock_shared()
            .with_context(|| format!("Failed to acquire shared lock: {}", path.display()))?;
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut content = String::new();
    BufReader::new(&file)
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(content)
}

/// Atomically replace `path` with `content`.
///
/// The sequence is: lock → write temp file in the same directory → fsync →
/// rename over the target. Parent directories are created as needed.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let lock = open_lock_file(path)?;
    lock.lock_exclusive()
        .with_context(|| format!("Failed to acquire exclusive lock: {}", path.display()))?;

    let mut staging = NamedTempFile::new_in(&parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;
    staging
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    staging
        .as_file()
        .sync_all()
        .with_context(|| format!("Failed to sync temp file for: {}", path.display()))?;
    staging
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}

fn open_lock_file(path: &Path) -> Result<File> {
    let lock = lock_path(path);
    #[allow(clippy::suspicious_open_options)]
    OpenOptions::new()
        .write(true)
        .create(true)
        .open(&lock)
        .with_context(|| format!("Failed to open lock file: {}", lock.display()))
}
