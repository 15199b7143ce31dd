//! # Wiregen Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by discovery, emission and the generate command.
//!
//! - `config`: Fixed names, compiled-in defaults and `.wiregen.toml` loading
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: Tera rendering plus canonical formatting of generated Rust
//!
pub mod config;
pub mod error;
pub mod templating;
