//! # Wiregen Commands
//!
//! File: cli/src/commands/mod.rs
//!
//! The binary has one operation, `generate`, run with every invocation.
//!
pub mod generate;
