//! # Wiregen Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module holds every fixed name the generator relies on (manifest file,
//! profile directories, generated file names) and lets a project adjust them.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.wiregen.toml` at the repository root
//! 2. Values compiled into the binary, each overridable at build time through
//!    an environment variable read with `option_env!`
//!    (`WIREGEN_MODULE_PATH`, `WIREGEN_PROFILE_IMPORT_PATH`,
//!    `WIREGEN_CMD_IMPORT_BASE`, `WIREGEN_PROFILES_DIR`)
//!
//! Fields missing from the project file fall back to the compiled-in value,
//! so deserializing the file yields the merged configuration directly.
//!
//! ## Examples
//!
//! ```toml
//! # .wiregen.toml
//! [paths]
//! module_path = "crate"
//!
//! [layout]
//! profiles_dir = "src/profiles"
//! ```
//!
//! ```rust
//! let cfg = config::load_config(&repo_root)?;
//! let overrides = cfg.path_overrides();
//! let profiles_root = cfg.layout.profiles_root(&repo_root);
//! ```
//!
use crate::core::error::{Result, WiregenError};
use crate::discovery::naming::module_segment;
use crate::discovery::paths::PathOverrides;
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Manifest file that marks the repository root and declares the crate identity.
pub const MANIFEST_FILE: &str = "Cargo.toml";
/// Optional per-project configuration file, looked up at the repository root.
pub const PROJECT_CONFIG_FILENAME: &str = ".wiregen.toml";
/// Engine identity stamped into every generated banner.
pub const ENGINE_NAME: &str = "Wiregen Engine";

/// Engine version stamped into generated banners.
pub fn engine_version() -> &'static str {
    option_env!("WIREGEN_ENGINE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Represents the generator configuration, loaded from `.wiregen.toml`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Import path overrides. Empty strings mean "derive from the manifest".
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Crate identity used as the root of every derived import path.
    #[serde(default = "default_module_path")]
    pub module_path: String,
    /// Import path of the module providing `new_root_command` / `execute_profile`.
    #[serde(default = "default_profile_import_path")]
    pub profile_import_path: String,
    /// Import path under which user profiles live.
    #[serde(default = "default_cmd_import_base")]
    pub cmd_import_base: String,
}

/// On-disk layout of the project being wired.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Directory (relative to the repository root) whose subdirectories are user profiles.
    #[serde(default = "default_profiles_dir")]
    pub profiles_dir: String,
    /// Directory (relative to the repository root) of the master profile.
    #[serde(default = "default_master_dir")]
    pub master_dir: String,
    /// Dispatch name of the master profile.
    #[serde(default = "default_master_name")]
    pub master_name: String,
    /// Import path of the master profile, relative to the crate identity.
    #[serde(default = "default_master_import_subpath")]
    pub master_import_subpath: String,
    /// Marker file that disables a profile directory.
    #[serde(default = "default_disabled_marker")]
    pub disabled_marker: String,
    /// File name of the per-profile wiring module.
    #[serde(default = "default_wiring_file")]
    pub wiring_file: String,
    /// File name (relative to the repository root) of the registry.
    #[serde(default = "default_registry_file")]
    pub registry_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            module_path: default_module_path(),
            profile_import_path: default_profile_import_path(),
            cmd_import_base: default_cmd_import_base(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            profiles_dir: default_profiles_dir(),
            master_dir: default_master_dir(),
            master_name: default_master_name(),
            master_import_subpath: default_master_import_subpath(),
            disabled_marker: default_disabled_marker(),
            wiring_file: default_wiring_file(),
            registry_file: default_registry_file(),
        }
    }
}

impl Config {
    /// Converts the configured values into resolver overrides.
    ///
    /// The profiles directory supplies the default user profile base, so a
    /// project that moves its profiles to `src/profiles` imports them from
    /// `<module>::profiles` without also setting `paths.cmd_import_base`.
    pub fn path_overrides(&self) -> PathOverrides {
        PathOverrides {
            module_path: self.paths.module_path.clone(),
            profile_import_path: self.paths.profile_import_path.clone(),
            cmd_import_base: self.paths.cmd_import_base.clone(),
            cmd_subpath: self.layout.profiles_module_subpath(),
        }
    }
}

impl LayoutConfig {
    pub fn profiles_root(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(&self.profiles_dir)
    }

    pub fn master_root(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(&self.master_dir)
    }

    /// Module path of the profiles directory relative to `src/`
    /// (`src/cmd` → `cmd`, `src/app/profiles` → `app::profiles`).
    pub fn profiles_module_subpath(&self) -> String {
        let dir = self.profiles_dir.trim().trim_matches('/');
        let below_src = match dir.strip_prefix("src") {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => dir,
        };
        below_src
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .map(module_segment)
            .collect::<Vec<_>>()
            .join("::")
    }

    /// Module name under which the wiring file is reachable (`generated` for `generated.rs`).
    pub fn wiring_module(&self) -> &str {
        self.wiring_file
            .strip_suffix(".rs")
            .unwrap_or(&self.wiring_file)
    }
}

fn default_module_path() -> String {
    option_env!("WIREGEN_MODULE_PATH").unwrap_or("").to_string()
}
fn default_profile_import_path() -> String {
    option_env!("WIREGEN_PROFILE_IMPORT_PATH")
        .unwrap_or("")
        .to_string()
}
fn default_cmd_import_base() -> String {
    option_env!("WIREGEN_CMD_IMPORT_BASE").unwrap_or("").to_string()
}
fn default_profiles_dir() -> String {
    option_env!("WIREGEN_PROFILES_DIR")
        .unwrap_or("src/cmd")
        .to_string()
}
fn default_master_dir() -> String {
    "src/framework/cli/wiregen".to_string()
}
fn default_master_name() -> String {
    "wiregen".to_string()
}
fn default_master_import_subpath() -> String {
    "framework::cli::wiregen".to_string()
}
fn default_disabled_marker() -> String {
    ".disabled".to_string()
}
fn default_wiring_file() -> String {
    "generated.rs".to_string()
}
fn default_registry_file() -> String {
    "generated_profiles.rs".to_string()
}

/// Loads the configuration for the project rooted at `repo_root`.
///
/// # Arguments
///
/// * `repo_root` - Directory containing the project's `Cargo.toml`.
///
/// # Returns
///
/// * `Result<Config>` - The compiled-in defaults, overlaid with `.wiregen.toml` when present.
///
/// # Errors
///
/// Returns an `Err` if the project file exists but cannot be read or parsed,
/// or if the resulting configuration fails validation.
pub fn load_config(repo_root: &Path) -> Result<Config> {
    let config_path = repo_root.join(PROJECT_CONFIG_FILENAME);
    let config = if config_path.is_file() {
        info!(
            "Loading project configuration from: {}",
            config_path.display()
        );
        load_config_from_path(&config_path)?
    } else {
        debug!(
            "No {} found at {}, using built-in defaults.",
            PROJECT_CONFIG_FILENAME,
            repo_root.display()
        );
        Config::default()
    };
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn validate_config(config: &Config) -> Result<()> {
    let layout = &config.layout;
    for (field, value) in [
        ("profiles_dir", &layout.profiles_dir),
        ("master_dir", &layout.master_dir),
        ("registry_file", &layout.registry_file),
    ] {
        if value.trim().is_empty() {
            return Err(anyhow!(WiregenError::Config(format!(
                "layout.{} cannot be empty",
                field
            ))));
        }
        if Path::new(value).is_absolute() {
            return Err(anyhow!(WiregenError::Config(format!(
                "layout.{} must be relative to the repository root, got '{}'",
                field, value
            ))));
        }
    }
    if layout.master_name.trim().is_empty() {
        return Err(anyhow!(WiregenError::Config(
            "layout.master_name cannot be empty".to_string()
        )));
    }
    if layout.master_import_subpath.trim().is_empty() {
        return Err(anyhow!(WiregenError::Config(
            "layout.master_import_subpath cannot be empty".to_string()
        )));
    }
    if layout.disabled_marker.trim().is_empty() {
        return Err(anyhow!(WiregenError::Config(
            "layout.disabled_marker cannot be empty".to_string()
        )));
    }
    if !layout.wiring_file.ends_with(".rs")
        || layout.wiring_file.contains(['/', '\\'])
        || layout.wiring_module().is_empty()
    {
        return Err(anyhow!(WiregenError::Config(format!(
            "layout.wiring_file must be a plain '.rs' file name, got '{}'",
            layout.wiring_file
        ))));
    }
    if !layout.registry_file.ends_with(".rs") {
        return Err(anyhow!(WiregenError::Config(format!(
            "layout.registry_file must end in '.rs', got '{}'",
            layout.registry_file
        ))));
    }
    Ok(())
}
