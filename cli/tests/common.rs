//! # Wiregen CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests: a handle on the compiled
//! `wiregen` binary and a builder for throwaway project trees.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Creates an `assert_cmd::Command` for the compiled `wiregen` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn wiregen_cmd() -> Command {
    let mut cmd = Command::cargo_bin("wiregen").expect("Failed to find wiregen binary for testing");
    cmd.env_remove("WIREGEN_DIR").env_remove("RUST_LOG");
    cmd
}

/// Creates a temporary project named `demo` with the given files.
///
/// `files` holds `(path relative to the root, content)` pairs; parent
/// directories are created as needed. `src/cmd` always exists.
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let root = tempfile::tempdir().expect("Failed to create temp project");
    write(
        root.path(),
        "Cargo.toml",
        "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n",
    );
    fs::create_dir_all(root.path().join("src/cmd")).expect("Failed to create src/cmd");
    for (path, content) in files {
        write(root.path(), path, content);
    }
    root
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let full = root.join(relative);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(full, content).expect("Failed to write project file");
}

pub fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).expect("Failed to read generated file")
}

/// A master profile with one command and the alias `m`.
pub const MASTER_PROFILE: (&str, &str) = (
    "src/framework/cli/wiregen/mod.rs",
    r#"
pub const METADATA: ProfileMetadata = ProfileMetadata {
    name: "wiregen",
    version: "0.1.0",
    aliases: &["m"],
};

pub fn new_baz_cmd() -> Command {
    Command::new("baz")
}
"#,
);
