//! # Profile Alias Extraction
//!
//! File: cli/src/discovery/aliases.rs
//!
//! A profile can be invoked under extra names declared in its metadata
//! literal, e.g.
//!
//! ```rust
//! pub const METADATA: ProfileMetadata = ProfileMetadata {
//!     name: "deploy",
//!     aliases: &["dep", "d"],
//!     // ...
//! };
//! ```
//!
//! Every struct literal with an `aliases` field holding string literals
//! contributes, in file-name order and then source order.
//!
use crate::discovery::scanner::{FieldValue, ParsedFile};

/// Field name whose string list declares profile aliases.
pub const ALIAS_FIELD: &str = "aliases";

pub fn extract_aliases(files: &[ParsedFile]) -> Vec<String> {
    files
        .iter()
        .flat_map(|file| file.record_literals.iter())
        .flat_map(|record| record.fields.iter())
        .filter(|field| field.key == ALIAS_FIELD)
        .filter_map(|field| match &field.value {
            FieldValue::StringList(values) => Some(values.iter().cloned()),
            FieldValue::Other => None,
        })
        .flatten()
        .collect()
}
