//! # Profile Registry Emitter
//!
//! File: cli/src/emit/registry.rs
//!
//! ## Overview
//!
//! Writes the single registry file at the repository root. It imports every
//! profile module and exposes one function that fills a dispatch map:
//!
//! ```rust
//! use my_tool::cmd::alpha as p_alpha;
//! use my_tool::framework::cli::wiregen as p_wiregen;
//!
//! pub fn register_profiles(
//!     registry: &mut ::std::collections::BTreeMap<&'static str, fn() -> ::std::process::ExitCode>,
//! ) {
//!     registry.insert("alpha", p_alpha::generated::execute);
//!     registry.insert("wiregen", p_wiregen::generated::execute);
//!     registry.insert("wg", p_wiregen::generated::execute);
//! }
//! ```
//!
//! The binary's entry point calls `register_profiles` explicitly, so the
//! registration order is visible and testable instead of depending on static
//! initialisation.
//!
//! ## Ordering and uniqueness
//!
//! Profiles are sorted by name; each profile's canonical name comes first,
//! followed by its aliases in extraction order. A dispatch key (name or alias)
//! or an import alias claimed by two different profiles is a fatal
//! `WiregenError::Collision`; silently letting one overwrite the other would
//! make dispatch depend on emission order.
//!
use crate::core::error::{Result, WiregenError};
use crate::core::templating::{self, SourceTemplate};
use crate::emit::artifact::GeneratedArtifact;
use crate::emit::descriptor::ProfileDescriptor;
use crate::emit::wiring::ENTRY_FUNCTION;
use anyhow::anyhow;
use serde::Serialize;
use std::collections::btree_map::{BTreeMap, Entry};
use std::path::Path;
use tracing::debug;

const REGISTRY_TEMPLATE: SourceTemplate = SourceTemplate {
    name: "registry.rs",
    body: r#"
{% for profile in profiles %}
use {{ profile.import_path }} as {{ profile.import_alias }};
{% endfor %}

/// Registers every generated profile entry point under its name and aliases.
pub fn register_profiles(
    registry: &mut ::std::collections::BTreeMap<&'static str, fn() -> ::std::process::ExitCode>,
) {
{% for profile in profiles %}{% for key in profile.keys %}
    registry.insert({{ key }}, {{ profile.entry }});
{% endfor %}{% endfor %}
}
"#,
};

#[derive(Serialize)]
struct RegistryEntry<'a> {
    import_path: &'a str,
    import_alias: &'a str,
    /// Fully qualified entry function, e.g. `p_alpha::generated::execute`.
    entry: String,
    /// Dispatch keys as Rust string literals, canonical name first.
    keys: Vec<String>,
}

#[derive(Serialize)]
struct RegistryContext<'a> {
    profiles: Vec<RegistryEntry<'a>>,
}

/// Renders the registry for `profiles` without touching the disk.
///
/// # Arguments
///
/// * `profiles` - Every usable profile, in any order.
/// * `output_path` - Where the artifact will be written.
/// * `wiring_module` - Module name of the per-profile wiring file (`generated`).
///
/// # Errors
///
/// - `WiregenError::Collision` for a shared import alias or dispatch key.
/// - `WiregenError::CodeGen` if the rendered text is not valid Rust.
pub fn render_registry(
    profiles: &[ProfileDescriptor],
    output_path: &Path,
    wiring_module: &str,
) -> Result<GeneratedArtifact> {
    let mut sorted: Vec<&ProfileDescriptor> = profiles.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut import_aliases: BTreeMap<&str, usize> = BTreeMap::new();
    let mut dispatch_keys: BTreeMap<&str, usize> = BTreeMap::new();
    let mut entries = Vec::with_capacity(sorted.len());

    // Profiles are told apart by position: two of them may share a name or an import path.
    for (owner, profile) in sorted.iter().enumerate() {
        claim(&mut import_aliases, &sorted, "import alias", &profile.import_alias, owner)?;

        let mut keys = Vec::with_capacity(1 + profile.aliases.len());
        for key in std::iter::once(&profile.name).chain(profile.aliases.iter()) {
            if claim(&mut dispatch_keys, &sorted, "profile name", key, owner)? {
                keys.push(string_literal(key));
            }
        }

        entries.push(RegistryEntry {
            import_path: &profile.import_path,
            import_alias: &profile.import_alias,
            entry: format!(
                "{}::{}::{}",
                profile.import_alias, wiring_module, ENTRY_FUNCTION
            ),
            keys,
        });
    }

    debug!(
        "Registry covers {} profiles, {} dispatch keys",
        entries.len(),
        dispatch_keys.len()
    );

    let context = tera::Context::from_serialize(RegistryContext { profiles: entries })?;
    let content =
        templating::render_generated_source("registry", &REGISTRY_TEMPLATE, &context, &[])?;
    Ok(GeneratedArtifact {
        path: output_path.to_path_buf(),
        content,
    })
}

/// Renders and writes the registry.
pub fn emit_registry(
    profiles: &[ProfileDescriptor],
    output_path: &Path,
    wiring_module: &str,
) -> Result<GeneratedArtifact> {
    let artifact = render_registry(profiles, output_path, wiring_module)?;
    artifact.write()?;
    Ok(artifact)
}

/// Records `value` as owned by `profiles[owner]`.
///
/// Returns `Ok(false)` when `owner` already holds it (a repeated alias) and a
/// `Collision` error when another profile does.
fn claim<'a>(
    claimed: &mut BTreeMap<&'a str, usize>,
    profiles: &[&ProfileDescriptor],
    kind: &'static str,
    value: &'a str,
    owner: usize,
) -> Result<bool> {
    match claimed.entry(value) {
        Entry::Vacant(slot) => {
            slot.insert(owner);
            Ok(true)
        }
        Entry::Occupied(existing) if *existing.get() == owner => Ok(false),
        Entry::Occupied(existing) => Err(anyhow!(WiregenError::Collision {
            kind,
            value: value.to_string(),
            first: describe_owner(profiles[*existing.get()]),
            second: describe_owner(profiles[owner]),
        })),
    }
}

fn describe_owner(profile: &ProfileDescriptor) -> String {
    format!("{} ({})", profile.name, profile.import_path)
}

fn string_literal(value: &str) -> String {
    proc_macro2::Literal::string(value).to_string()
}
