//! # Module Path Resolution
//!
//! File: cli/src/discovery/paths.rs
//!
//! ## Overview
//!
//! Generated sources refer to the project's own modules by import path. This
//! module derives those paths once per run from the crate identity declared in
//! `Cargo.toml`, unless the configuration overrides them.
//!
//! | Path | Default |
//! |---|---|
//! | module | `[lib] name`, else `[package] name`, with `-` mapped to `_` |
//! | shared commands | `<module>::framework::cli::shared` |
//! | profile helpers | `<module>::framework::profile` |
//! | user profile base | `<module>::<profiles dir below src/>`, i.e. `<module>::cmd` |
//!
//! Trailing separators are stripped from every value, so `crate::` and
//! `crate` are equivalent overrides. A profile directory name is turned into a
//! module segment (`my-profile` → `my_profile`) before it is appended to the
//! user profile base; the directory name itself stays the dispatch name.
//!
use crate::common::fs::io;
use crate::core::config::MANIFEST_FILE;
use crate::core::error::{Result, WiregenError};
use crate::discovery::naming::module_segment;
use anyhow::anyhow;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Separator between import path segments.
pub const PATH_SEPARATOR: &str = "::";
const SHARED_SUBPATH: &str = "framework::cli::shared";
const PROFILE_SUBPATH: &str = "framework::profile";
const CMD_SUBPATH: &str = "cmd";

/// Optional replacements for derived paths. Blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOverrides {
    pub module_path: String,
    pub profile_import_path: String,
    pub cmd_import_base: String,
    /// Module path of the profiles directory below the crate root, used for
    /// the user profile base when `cmd_import_base` is blank.
    pub cmd_subpath: String,
}

/// Import paths shared by every emitter call of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathConfig {
    pub module_path: String,
    pub profile_import_path: String,
    pub shared_import_path: String,
    pub cmd_import_base: String,
}

impl PathConfig {
    /// Import path of the user profile directory `name`.
    pub fn profile_module(&self, name: &str) -> String {
        join_path(&self.cmd_import_base, &module_segment(name))
    }

    /// Import path of a module below the crate root, e.g. the master profile.
    pub fn crate_module(&self, subpath: &str) -> String {
        join_path(&self.module_path, subpath)
    }
}

/// Resolves the import paths for the project at `repo_root`.
///
/// The manifest is only read when `overrides.module_path` is blank.
///
/// # Errors
///
/// Returns `WiregenError::InvalidManifest` if the manifest has to be consulted
/// and does not declare a usable crate name.
pub fn resolve_paths(repo_root: &Path, overrides: &PathOverrides) -> Result<PathConfig> {
    let module_path = match non_blank(&overrides.module_path) {
        Some(module) => module.to_string(),
        None => read_module_path(&repo_root.join(MANIFEST_FILE))?,
    };
    let module_path = trim_separators(&module_path).to_string();

    let profile_import_path = match non_blank(&overrides.profile_import_path) {
        Some(path) => path.to_string(),
        None => join_path(&module_path, PROFILE_SUBPATH),
    };
    let cmd_import_base = match non_blank(&overrides.cmd_import_base) {
        Some(path) => path.to_string(),
        None => join_path(
            &module_path,
            non_blank(&overrides.cmd_subpath).unwrap_or(CMD_SUBPATH),
        ),
    };

    let paths = PathConfig {
        shared_import_path: join_path(&module_path, SHARED_SUBPATH),
        profile_import_path: trim_separators(&profile_import_path).to_string(),
        cmd_import_base: trim_separators(&cmd_import_base).to_string(),
        module_path,
    };
    debug!("Resolved import paths: {:?}", paths);
    Ok(paths)
}

/// Reads the crate identity from a `Cargo.toml`.
pub fn read_module_path(manifest_path: &Path) -> Result<String> {
    let invalid = |reason: String| {
        anyhow!(WiregenError::InvalidManifest {
            path: manifest_path.to_path_buf(),
            reason,
        })
    };

    let content = io::read_file_to_string(manifest_path)?;
    let manifest: toml::Table = content
        .parse()
        .map_err(|e: toml::de::Error| invalid(format!("not valid TOML: {}", e.message())))?;

    let declared = |section: &str| {
        manifest
            .get(section)
            .and_then(|table| table.get("name"))
            .and_then(|name| name.as_str())
    };

    let name = match declared("lib").or_else(|| declared("package")) {
        Some(name) => name.trim(),
        None => return Err(invalid("no [package] name declared".to_string())),
    };
    if name.is_empty() {
        return Err(invalid("package name is empty".to_string()));
    }
    Ok(name.replace('-', "_"))
}

fn join_path(base: &str, segment: &str) -> String {
    format!("{}{}{}", trim_separators(base), PATH_SEPARATOR, segment)
}

fn trim_separators(path: &str) -> &str {
    path.trim().trim_end_matches([':', '/'])
}

fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn repo_with_manifest(content: &str) -> tempfile::TempDir {
        let root = tempdir().unwrap();
        fs::write(root.path().join(MANIFEST_FILE), content).unwrap();
        root
    }

    #[test]
    fn test_default_derivation() -> Result<()> {
        let root = repo_with_manifest("[package]\nname = \"example_proj\"\nversion = \"0.1.0\"\n");
        let paths = resolve_paths(root.path(), &PathOverrides::default())?;

        assert_eq!(paths.module_path, "example_proj");
        assert_eq!(paths.shared_import_path, "example_proj::framework::cli::shared");
        assert_eq!(paths.profile_import_path, "example_proj::framework::profile");
        assert_eq!(paths.cmd_import_base, "example_proj::cmd");
        assert_eq!(paths.profile_module("alpha"), "example_proj::cmd::alpha");
        assert_eq!(paths.profile_module("my-profile"), "example_proj::cmd::my_profile");
        Ok(())
    }

    #[test]
    fn test_cmd_subpath_feeds_default_base() -> Result<()> {
        let root = repo_with_manifest("[package]\nname = \"demo\"\n");
        let overrides = PathOverrides {
            cmd_subpath: "profiles::user".to_string(),
            ..Default::default()
        };
        let paths = resolve_paths(root.path(), &overrides)?;
        assert_eq!(paths.cmd_import_base, "demo::profiles::user");

        // An explicit base wins over the derived one.
        let overrides = PathOverrides {
            cmd_import_base: "demo::elsewhere".to_string(),
            cmd_subpath: "profiles".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_paths(root.path(), &overrides)?.cmd_import_base, "demo::elsewhere");
        Ok(())
    }

    #[test]
    fn test_hyphenated_name_and_lib_override() -> Result<()> {
        let root = repo_with_manifest("[package]\nname = \"my-tool\"\n");
        assert_eq!(read_module_path(&root.path().join(MANIFEST_FILE))?, "my_tool");

        let root = repo_with_manifest("[package]\nname = \"my-tool\"\n\n[lib]\nname = \"tool_core\"\n");
        assert_eq!(read_module_path(&root.path().join(MANIFEST_FILE))?, "tool_core");
        Ok(())
    }

    #[test]
    fn test_overrides_win_and_are_normalized() -> Result<()> {
        // No manifest at all: the module override means it is never read.
        let root = tempdir()?;
        let overrides = PathOverrides {
            module_path: " crate:: ".to_string(),
            profile_import_path: "other::profile::".to_string(),
            cmd_import_base: "crate::profiles/".to_string(),
            cmd_subpath: String::new(),
        };
        let paths = resolve_paths(root.path(), &overrides)?;

        assert_eq!(paths.module_path, "crate");
        assert_eq!(paths.shared_import_path, "crate::framework::cli::shared");
        assert_eq!(paths.profile_import_path, "other::profile");
        assert_eq!(paths.cmd_import_base, "crate::profiles");
        assert_eq!(paths.crate_module("framework::cli::wiregen"), "crate::framework::cli::wiregen");
        Ok(())
    }

    #[test]
    fn test_blank_overrides_are_ignored() -> Result<()> {
        let root = repo_with_manifest("[package]\nname = \"demo\"\n");
        let overrides = PathOverrides {
            module_path: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_paths(root.path(), &overrides)?.module_path, "demo");
        Ok(())
    }

    #[test]
    fn test_invalid_manifests() {
        for content in ["[workspace]\nmembers = []\n", "[package]\nname = \"  \"\n", "not = [toml"] {
            let root = repo_with_manifest(content);
            let err = resolve_paths(root.path(), &PathOverrides::default()).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<WiregenError>(),
                    Some(WiregenError::InvalidManifest { .. })
                ),
                "expected InvalidManifest for {:?}, got {}",
                content,
                err
            );
        }
    }
}
