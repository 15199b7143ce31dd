//! # Import Alias Generation
//!
//! File: cli/src/discovery/naming.rs
//!
//! The registry imports each profile module under an alias derived from the
//! profile name. The alias is always a plain ASCII identifier (lowercase
//! letters, digits, underscores) starting with `p_`, which also keeps it clear
//! of Rust keywords.
//!
//! Two names can sanitize to the same alias (`my-tool` and `my_tool`). This
//! function does not resolve that; `emit::registry` rejects the collision.
//!
//! `module_segment` does the equivalent for path segments: a directory or file
//! name becomes the identifier under which Rust code reaches that module, so
//! `src/cmd/my-profile/` is imported as `cmd::my_profile`.
//!

/// Prefix of every generated import alias.
pub const IMPORT_ALIAS_PREFIX: &str = "p_";
/// Alias used when nothing of the profile name survives sanitization.
pub const FALLBACK_IMPORT_ALIAS: &str = "p_profile";

/// Derives the import alias for `profile_name`.
pub fn import_alias(profile_name: &str) -> String {
    let sanitized: String = profile_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let body = sanitized.trim_matches('_');
    if body.is_empty() {
        FALLBACK_IMPORT_ALIAS.to_string()
    } else {
        format!("{}{}", IMPORT_ALIAS_PREFIX, body)
    }
}

/// Segment used when nothing of a module name survives sanitization.
const FALLBACK_MODULE_SEGMENT: &str = "profile";

/// Derives the Rust path segment of a directory or file module named `name`.
///
/// Characters other than ASCII alphanumerics and `_` become `_`, a leading
/// digit gets a `_` prefix, and keywords are emitted as raw identifiers
/// (`r#type`). Path keywords that cannot be raw (`self`, `crate`, ...) get a
/// trailing `_`. Case is kept.
pub fn module_segment(name: &str) -> String {
    let mut segment: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if segment.chars().all(|c| c == '_') {
        return FALLBACK_MODULE_SEGMENT.to_string();
    }
    if segment.starts_with(|c: char| c.is_ascii_digit()) {
        segment.insert(0, '_');
    }
    if syn::parse_str::<syn::Ident>(&segment).is_ok() {
        return segment;
    }
    let raw = format!("r#{}", segment);
    if syn::parse_str::<syn::Ident>(&raw).is_ok() {
        raw
    } else {
        segment.push('_');
        segment
    }
}
