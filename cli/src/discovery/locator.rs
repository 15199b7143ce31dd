//! # Repository Root Locator
//!
//! File: cli/src/discovery/locator.rs
//!
//! Finds the project root by walking upward from a start directory until a
//! directory containing `Cargo.toml` is found. The nearest manifest wins, so
//! running from a workspace member wires that member.
//!
use crate::core::config::MANIFEST_FILE;
use crate::core::error::{Result, WiregenError};
use anyhow::anyhow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Returns the nearest ancestor of `start` (inclusive) that contains a manifest.
///
/// # Errors
///
/// Returns `WiregenError::RootNotFound` when the filesystem root is reached
/// without finding one.
pub fn locate_repo_root(start: &Path) -> Result<PathBuf> {
    let mut dir: &Path = start;
    loop {
        let manifest = dir.join(MANIFEST_FILE);
        if manifest.is_file() {
            debug!("Found {} at {}", MANIFEST_FILE, dir.display());
            return Ok(dir.to_path_buf());
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }
    Err(anyhow!(WiregenError::RootNotFound {
        start: start.to_path_buf(),
    }))
}
