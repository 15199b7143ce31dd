//! # Wiregen Code Emission (`emit`)
//!
//! File: cli/src/emit/mod.rs
//!
//! ## Overview
//!
//! Turns discovered profiles into generated Rust files.
//!
//! - **`descriptor`**: `ProfileDescriptor`, the emitters' input.
//! - **`artifact`**: `GeneratedArtifact`, a rendered file and its atomic write.
//! - **`wiring`**: The per-profile `generated.rs` entry module.
//! - **`registry`**: The repository-level dispatch registry.
//!
//! Every emitter has a pure `render_*` function and an `emit_*` function that
//! also writes the result. Output is canonically formatted, so rendering the
//! same inputs twice yields byte-identical files.
//!
pub mod artifact;
pub mod descriptor;
pub mod registry;
pub mod wiring;
