//! # Wiregen Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared, cross-cutting helpers that are neither discovery logic
//! (`discovery::`), code emission (`emit::`) nor core infrastructure (`core::`).
//!
//! - **`fs`**: Filesystem operations (reading, directory creation, atomic writes).
//!

/// Utilities for filesystem operations.
pub mod fs;
