//! # Wiregen Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the filesystem input/output operations wiregen
//! needs: reading sources and manifests, making sure output directories exist,
//! and persisting generated files.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: Creates a directory (and parents) if missing and
//!   rejects paths that exist but are not directories.
//! - **`read_file_to_string`**: `fs::read_to_string` with the path in the error context.
//! - **`write_string_atomically`**: Writes content to a temporary file in the
//!   destination directory, then renames it over the target. A reader (or a
//!   following `cargo build`) sees either the old file or the new one, never a
//!   truncated mix.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! let manifest = io::read_file_to_string(&root.join("Cargo.toml"))?;
//! io::write_string_atomically(&root.join("generated_profiles.rs"), &source)?;
//! ```
//!
use crate::core::error::{Result, WiregenError};
use anyhow::{anyhow, Context};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function creates the directory, including
/// any necessary parent directories (similar to `mkdir -p`).
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        return Err(anyhow!(WiregenError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::Other,
                "path exists but is not a directory",
            ),
        }));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be opened or read, with context
/// indicating which file failed.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Replaces the file at `path` with `content` using write-then-rename.
///
/// The temporary file is created in the same directory as `path` so the final
/// rename never crosses a filesystem boundary. On failure the temporary file is
/// removed and any previous content of `path` is left untouched.
///
/// # Arguments
///
/// * `path` - Target file path. Its parent directory is created if needed.
/// * `content` - Full new content of the file.
///
/// # Errors
///
/// Returns `WiregenError::Write` if the parent directory cannot be prepared,
/// the temporary file cannot be written, or the rename fails.
pub fn write_string_atomically(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir_exists(parent)?;

    let write_err = |source: std::io::Error| {
        anyhow!(WiregenError::Write {
            path: path.to_path_buf(),
            source,
        })
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
    temp.write_all(content.as_bytes()).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;

    info!("Wrote content to file: {:?}", path);
    Ok(())
}
