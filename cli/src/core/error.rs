//! # Wiregen Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout wiregen. Every fatal
//! condition of a generation run has a dedicated variant so that callers (and
//! tests) can tell them apart with `downcast_ref`.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `WiregenError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error kinds cover:
//! - Locating the repository root and reading its manifest
//! - Reading profile directories and parsing their sources
//! - Discovery outcomes that make the run unusable (no package, no commands)
//! - Rendering, formatting, and persisting generated code
//!
//! ## Examples
//!
//! ```rust
//! // Raise a specific error
//! anyhow::bail!(WiregenError::NoCommandsDiscovered { profile: name.to_string() });
//!
//! // Decide whether a failure is profile-scoped
//! match scan_result {
//!     Err(e) if matches!(e.downcast_ref::<WiregenError>(), Some(WiregenError::DirectoryRead { .. })) => {
//!         warn!("skipping unreadable profile");
//!     }
//!     Err(e) => return Err(e),
//!     Ok(pkg) => { /* ... */ }
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for wiregen.
#[derive(Error, Debug)]
pub enum WiregenError {
    #[error("cannot find Cargo.toml in '{}' or any parent directory (not inside a Cargo project)", start.display())]
    RootNotFound { start: PathBuf },

    #[error("invalid manifest '{}': {reason}", path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("cannot read directory '{}': {reason}", path.display())]
    DirectoryRead { path: PathBuf, reason: String },

    #[error("syntax error in {}:{line}:{column}: {message}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("no Rust sources found in profile '{profile}'")]
    NoPackage { profile: String },

    #[error("no commands found in profile '{profile}'")]
    NoCommandsDiscovered { profile: String },

    #[error("{kind} '{value}' is claimed by both '{first}' and '{second}'")]
    Collision {
        kind: &'static str,
        value: String,
        first: String,
        second: String,
    },

    #[error("generated code for {target} is not valid Rust: {message}\n{buffer}")]
    CodeGen {
        target: String,
        message: String,
        buffer: String,
    },

    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let parse_err = WiregenError::Parse {
            file: PathBuf::from("src/cmd/alpha/mod.rs"),
            line: 3,
            column: 7,
            message: "expected `;`".into(),
        };
        assert_eq!(
            parse_err.to_string(),
            "syntax error in src/cmd/alpha/mod.rs:3:7: expected `;`"
        );

        let no_cmds = WiregenError::NoCommandsDiscovered {
            profile: "wiregen".into(),
        };
        assert_eq!(no_cmds.to_string(), "no commands found in profile 'wiregen'");

        let collision = WiregenError::Collision {
            kind: "import alias",
            value: "p_my_tool".into(),
            first: "my-tool".into(),
            second: "my_tool".into(),
        };
        assert_eq!(
            collision.to_string(),
            "import alias 'p_my_tool' is claimed by both 'my-tool' and 'my_tool'"
        );
    }

    #[test]
    fn test_codegen_error_carries_buffer() {
        let err = WiregenError::CodeGen {
            target: "profile 'alpha'".into(),
            message: "unexpected token".into(),
            buffer: "pub fn execute( {".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("profile 'alpha'"));
        assert!(rendered.ends_with("pub fn execute( {"));
    }
}
