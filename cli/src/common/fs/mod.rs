//! # Wiregen Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by discovery and emission. Functionality lives in
//! the `io` submodule; callers import it as `crate::common::fs::io`.
//!

/// Reading files, preparing directories and atomic replace-on-write.
pub mod io;
