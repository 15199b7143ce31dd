//! # Generated Artifacts
//!
//! File: cli/src/emit/artifact.rs
//!
//! A `GeneratedArtifact` is a fully rendered file that has not been written
//! yet. Rendering and writing are separate so rendering stays a pure function
//! of the discovered inputs.
//!
use crate::common::fs::io;
use crate::core::error::Result;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub content: String,
}

impl GeneratedArtifact {
    /// Replaces whatever is at `self.path` with the rendered content.
    pub fn write(&self) -> Result<()> {
        io::write_string_atomically(&self.path, &self.content)
    }
}
