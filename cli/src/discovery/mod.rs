//! # Wiregen Discovery (`discovery`)
//!
//! File: cli/src/discovery/mod.rs
//!
//! ## Overview
//!
//! Everything that reads the project being wired, leaves first:
//!
//! - **`locator`**: Finds the repository root (nearest `Cargo.toml`).
//! - **`paths`**: Derives the import paths generated code refers to.
//! - **`scanner`**: Parses a profile directory into parser-independent `ParsedFile`s.
//! - **`factories`**: Finds `new_*_cmd` command factories.
//! - **`aliases`**: Collects alias strings from metadata literals.
//! - **`naming`**: Derives registry import aliases from profile names.
//!
//! Nothing in here writes to disk; see `emit` for that.
//!
pub mod aliases;
pub mod factories;
pub mod locator;
pub mod naming;
pub mod paths;
pub mod scanner;
