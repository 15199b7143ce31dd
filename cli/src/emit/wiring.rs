//! # Profile Wiring Emitter
//!
//! File: cli/src/emit/wiring.rs
//!
//! ## Overview
//!
//! Writes `generated.rs` into a profile directory. The generated module is a
//! child of the profile module (declared there with `mod generated;`), so it
//! reaches the profile's factories and `METADATA` through `super::`.
//!
//! ## Generated shape
//!
//! ```rust
//! use my_tool::framework::profile as profile;
//! use my_tool::framework::cli::shared as shared;
//!
//! pub fn execute() -> ::std::process::ExitCode {
//!     let mut root = profile::new_root_command(&super::METADATA);
//!     root.add_command(super::new_bar_cmd());
//!     root.add_command(super::new_foo_cmd());
//!     root.add_command(shared::new_version_cmd(super::METADATA.version));
//!     root.add_command(shared::new_doctor_cmd());
//!     profile::execute_profile(root)
//! }
//! ```
//!
//! Commands are added in the sorted order produced by discovery, so help
//! output lists them the same way on every regeneration. A factory declared in
//! a sibling file is called through its module (`super::deploy::new_deploy_cmd()`).
//! The profile name only appears in the comment banner, never in the code. The two shared
//! commands are always appended after the discovered ones.
//!
use crate::core::error::Result;
use crate::core::templating::{self, SourceTemplate};
use crate::discovery::paths::PathConfig;
use crate::emit::artifact::GeneratedArtifact;
use crate::emit::descriptor::ProfileDescriptor;
use serde::Serialize;
use std::path::Path;

/// Item in the profile module that holds its metadata.
pub const METADATA_ITEM: &str = "METADATA";
/// Name of the generated entry function.
pub const ENTRY_FUNCTION: &str = "execute";

const WIRING_TEMPLATE: SourceTemplate = SourceTemplate {
    name: "wiring.rs",
    body: r#"
use {{ paths.profile_import_path }} as profile;
use {{ paths.shared_import_path }} as shared;

/// Builds and runs this profile's root command.
pub fn {{ entry }}() -> ::std::process::ExitCode {
    let mut root = profile::new_root_command(&super::{{ metadata }});
{% for command in profile.commands %}
    root.add_command(super::{{ command }}());
{% endfor %}
    root.add_command(shared::new_version_cmd(super::{{ metadata }}.version));
    root.add_command(shared::new_doctor_cmd());
    profile::execute_profile(root)
}
"#,
};

#[derive(Serialize)]
struct WiringContext<'a> {
    profile: &'a ProfileDescriptor,
    paths: &'a PathConfig,
    metadata: &'static str,
    entry: &'static str,
}

/// Renders the wiring module for `profile` without touching the disk.
///
/// # Arguments
///
/// * `profile` - The discovered profile.
/// * `paths` - Import paths of the collaborators the wiring calls into.
/// * `profile_dir` - Directory the artifact belongs to.
/// * `file_name` - Name of the wiring file inside `profile_dir`.
///
/// # Errors
///
/// Returns `WiregenError::CodeGen` if the rendered text is not valid Rust.
pub fn render_wiring(
    profile: &ProfileDescriptor,
    paths: &PathConfig,
    profile_dir: &Path,
    file_name: &str,
) -> Result<GeneratedArtifact> {
    let context = tera::Context::from_serialize(WiringContext {
        profile,
        paths,
        metadata: METADATA_ITEM,
        entry: ENTRY_FUNCTION,
    })?;
    let content = templating::render_generated_source(
        &format!("profile '{}'", profile.name),
        &WIRING_TEMPLATE,
        &context,
        &[
            format!("Profile: {}", profile.name),
            format!("Module: {}", profile.package_name),
        ],
    )?;
    Ok(GeneratedArtifact {
        path: profile_dir.join(file_name),
        content,
    })
}

/// Renders and writes the wiring module for `profile`.
pub fn emit_wiring(
    profile: &ProfileDescriptor,
    paths: &PathConfig,
    profile_dir: &Path,
    file_name: &str,
) -> Result<GeneratedArtifact> {
    let artifact = render_wiring(profile, paths, profile_dir, file_name)?;
    artifact.write()?;
    Ok(artifact)
}
