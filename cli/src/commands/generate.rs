//! # Wiregen Generate Command
//!
//! File: cli/src/commands/generate.rs
//!
//! ## Overview
//!
//! The single batch run behind the `wiregen` binary. It regenerates every
//! wiring file and the registry from the sources currently on disk; there is
//! no incremental mode and no state carried between runs.
//!
//! ## Workflow
//!
//! 1. Locate the repository root and load `.wiregen.toml`.
//! 2. Resolve the import paths generated code refers to.
//! 3. For each directory under the profiles root, in name order:
//!    - skip it if it holds the disabled marker,
//!    - scan and parse its sources (a syntax error aborts the run),
//!    - skip it with a warning if it declares no command factory,
//!    - otherwise emit its wiring file and keep its descriptor.
//! 4. Do the same for the master profile. Its directory may be missing
//!    (the step is skipped), but if it exists it must yield commands.
//! 5. Emit the registry over all kept profiles.
//!
//! Any error other than a per-profile skip condition aborts the run; nothing
//! is retried. Re-running after fixing the cause regenerates everything.
//!
use crate::core::config::{self, LayoutConfig};
use crate::core::error::{Result, WiregenError};
use crate::discovery::paths::{self, PathConfig};
use crate::discovery::scanner::{self, ScannedPackage, SourceParser, SynParser};
use crate::discovery::{aliases, factories, locator, naming};
use crate::emit::descriptor::ProfileDescriptor;
use crate::emit::{registry, wiring};
use anyhow::{anyhow, Context};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// # Generate Arguments (`GenerateArgs`)
///
/// Arguments accepted by `wiregen`. Running with none regenerates the project
/// that contains the current directory.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Start the repository search from this directory instead of the current one.
    #[arg(short = 'C', long = "directory", env = "WIREGEN_DIR", value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub repo_root: PathBuf,
    /// Names of the wired user profiles, in name order.
    pub user_profiles: Vec<String>,
    /// Name of the master profile, if its directory exists.
    pub master_profile: Option<String>,
    /// Every file written, wiring files first and the registry last.
    pub artifacts: Vec<PathBuf>,
}

impl RunSummary {
    pub fn profile_count(&self) -> usize {
        self.user_profiles.len() + usize::from(self.master_profile.is_some())
    }
}

/// # Handle Generate (`handle_generate`)
///
/// Entry point used by `main`: resolves the start directory, runs the
/// generator with the `syn` parser and prints the summary lines.
pub fn handle_generate(args: GenerateArgs) -> Result<()> {
    let start_dir = match args.directory {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let summary = run(&start_dir, &SynParser)?;

    println!(
        "✓ Generated code for {} profiles ({} user + {} master)",
        summary.profile_count(),
        summary.user_profiles.len(),
        usize::from(summary.master_profile.is_some())
    );
    println!("✓ Shared commands injected into every profile");
    Ok(())
}

/// Runs one full generation pass for the project containing `start_dir`.
pub fn run(start_dir: &Path, parser: &dyn SourceParser) -> Result<RunSummary> {
    let repo_root = locator::locate_repo_root(start_dir)?;
    info!("Repository root: {}", repo_root.display());

    let cfg = config::load_config(&repo_root)?;
    let paths = paths::resolve_paths(&repo_root, &cfg.path_overrides())?;
    let layout = &cfg.layout;

    let mut artifacts = Vec::new();
    let mut profiles = generate_user_profiles(&repo_root, layout, &paths, parser, &mut artifacts)?;
    let user_profiles: Vec<String> = profiles.iter().map(|p| p.name.clone()).collect();

    let master = generate_master_profile(&repo_root, layout, &paths, parser, &mut artifacts)?;
    let master_profile = master.as_ref().map(|p| p.name.clone());
    profiles.extend(master);

    let registry_path = repo_root.join(&layout.registry_file);
    let artifact = registry::emit_registry(&profiles, &registry_path, layout.wiring_module())
        .context("generating profile registry")?;
    info!("Wrote registry {}", relative_display(&artifact.path, &repo_root));
    artifacts.push(artifact.path);

    Ok(RunSummary {
        repo_root,
        user_profiles,
        master_profile,
        artifacts,
    })
}

fn generate_user_profiles(
    repo_root: &Path,
    layout: &LayoutConfig,
    paths: &PathConfig,
    parser: &dyn SourceParser,
    artifacts: &mut Vec<PathBuf>,
) -> Result<Vec<ProfileDescriptor>> {
    let profiles_root = layout.profiles_root(repo_root);
    let mut profiles = Vec::new();

    for entry in WalkDir::new(&profiles_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            anyhow!(WiregenError::DirectoryRead {
                path: profiles_root.clone(),
                reason: e.to_string(),
            })
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let profile_dir = entry.path();

        if profile_dir.join(&layout.disabled_marker).exists() {
            println!("⊘ Skipping disabled profile: {}", name);
            continue;
        }

        let package = match scanner::scan_directory(profile_dir, parser, &layout.wiring_file) {
            Ok(Some(package)) => package,
            Ok(None) => {
                println!("⚠ No Rust sources found in profile: {}", name);
                continue;
            }
            Err(e) if is_directory_read(&e) => {
                warn!("Skipping unreadable profile '{}': {:#}", name, e);
                println!("⚠ Cannot read profile: {}", name);
                continue;
            }
            Err(e) => return Err(e.context(format!("parsing profile '{}'", name))),
        };

        let Some(profile) = describe(name.clone(), paths.profile_module(&name), package) else {
            println!("⚠ No commands found in profile: {}", name);
            continue;
        };

        let artifact = wiring::emit_wiring(&profile, paths, profile_dir, &layout.wiring_file)
            .with_context(|| format!("generating wiring for profile '{}'", name))?;
        debug!("Wrote {}", relative_display(&artifact.path, repo_root));
        artifacts.push(artifact.path);

        println!(
            "✓ Profile '{}' registered with {} commands",
            profile.name,
            profile.commands.len()
        );
        profiles.push(profile);
    }

    Ok(profiles)
}

fn generate_master_profile(
    repo_root: &Path,
    layout: &LayoutConfig,
    paths: &PathConfig,
    parser: &dyn SourceParser,
    artifacts: &mut Vec<PathBuf>,
) -> Result<Option<ProfileDescriptor>> {
    let name = layout.master_name.clone();
    let master_dir = layout.master_root(repo_root);
    if !master_dir.is_dir() {
        println!("⚠ Master profile '{}' not found, skipping", name);
        return Ok(None);
    }

    let package = scanner::scan_directory(&master_dir, parser, &layout.wiring_file)
        .with_context(|| format!("parsing master profile '{}'", name))?
        .ok_or_else(|| anyhow!(WiregenError::NoPackage { profile: name.clone() }))?;

    let import_path = paths.crate_module(&layout.master_import_subpath);
    let profile = describe(name.clone(), import_path, package)
        .ok_or_else(|| anyhow!(WiregenError::NoCommandsDiscovered { profile: name.clone() }))?;

    let artifact = wiring::emit_wiring(&profile, paths, &master_dir, &layout.wiring_file)
        .with_context(|| format!("generating wiring for master profile '{}'", name))?;
    debug!("Wrote {}", relative_display(&artifact.path, repo_root));
    artifacts.push(artifact.path);

    println!(
        "✓ Master profile '{}' registered with {} commands",
        profile.name,
        profile.commands.len()
    );
    Ok(Some(profile))
}

/// Builds the descriptor of a scanned profile; `None` when it has no commands.
fn describe(name: String, import_path: String, package: ScannedPackage) -> Option<ProfileDescriptor> {
    let commands = factories::discover_commands(&package.files);
    if commands.is_empty() {
        return None;
    }
    Some(ProfileDescriptor {
        import_alias: naming::import_alias(&name),
        aliases: aliases::extract_aliases(&package.files),
        package_name: package.name,
        commands,
        import_path,
        name,
    })
}

fn is_directory_read(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<WiregenError>(),
        Some(WiregenError::DirectoryRead { .. })
    )
}

fn relative_display(path: &Path, base: &Path) -> String {
    pathdiff::diff_paths(path, base)
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Builds a project tree from `(relative path, content)` pairs.
    fn project(files: &[(&str, &str)]) -> TempDir {
        let root = tempdir().unwrap();
        fs::write(
            root.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        fs::create_dir_all(root.path().join("src/cmd")).unwrap();
        for (path, content) in files {
            let full = root.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        root
    }

    const MASTER: (&str, &str) = (
        "src/framework/cli/wiregen/mod.rs",
        r#"
        pub const METADATA: ProfileMetadata = ProfileMetadata { name: "wiregen", aliases: &["m"] };
        pub fn new_baz_cmd() -> Command { todo!() }
        "#,
    );

    fn registry_of(root: &TempDir) -> String {
        fs::read_to_string(root.path().join("generated_profiles.rs")).unwrap()
    }

    #[test]
    fn test_end_to_end() -> Result<()> {
        let root = project(&[
            (
                "src/cmd/alpha/mod.rs",
                "pub fn new_foo_cmd() -> Command { todo!() }\npub fn new_bar_cmd() -> Command { todo!() }",
            ),
            ("src/cmd/beta/mod.rs", "pub fn new_qux_cmd() -> Command { todo!() }"),
            ("src/cmd/beta/.disabled", ""),
            MASTER,
        ]);

        let summary = run(root.path(), &SynParser)?;

        assert_eq!(summary.user_profiles, vec!["alpha"]);
        assert_eq!(summary.master_profile.as_deref(), Some("wiregen"));
        assert_eq!(summary.profile_count(), 2);
        assert_eq!(summary.artifacts.len(), 3);

        let registry = registry_of(&root);
        assert!(registry.contains("use demo::cmd::alpha as p_alpha;"));
        assert!(registry.contains("use demo::framework::cli::wiregen as p_wiregen;"));
        assert!(registry.contains("registry.insert(\"alpha\", p_alpha::generated::execute);"));
        assert!(registry.contains("registry.insert(\"wiregen\", p_wiregen::generated::execute);"));
        assert!(registry.contains("registry.insert(\"m\", p_wiregen::generated::execute);"));
        assert!(!registry.contains("beta"));
        assert_eq!(registry.matches("registry.insert(").count(), 3);

        let wiring = fs::read_to_string(root.path().join("src/cmd/alpha/generated.rs"))?;
        let bar = wiring.find("super::new_bar_cmd()").unwrap();
        let foo = wiring.find("super::new_foo_cmd()").unwrap();
        assert!(bar < foo);
        assert!(!root.path().join("src/cmd/beta/generated.rs").exists());
        Ok(())
    }

    #[test]
    fn test_second_run_is_byte_identical() -> Result<()> {
        let root = project(&[("src/cmd/alpha/mod.rs", "pub fn new_a_cmd() {}"), MASTER]);

        run(root.path(), &SynParser)?;
        let wiring_first = fs::read(root.path().join("src/cmd/alpha/generated.rs"))?;
        let registry_first = registry_of(&root);

        // The generated file now sits in the profile directory; it must not be re-ingested.
        run(root.path(), &SynParser)?;
        assert_eq!(fs::read(root.path().join("src/cmd/alpha/generated.rs"))?, wiring_first);
        assert_eq!(registry_of(&root), registry_first);
        Ok(())
    }

    #[test]
    fn test_profile_without_commands_is_skipped() -> Result<()> {
        let root = project(&[
            ("src/cmd/empty/mod.rs", "pub fn helper() {}"),
            ("src/cmd/nosrc/README.md", "docs only"),
            ("src/cmd/ok/mod.rs", "pub fn new_ok_cmd() {}"),
            MASTER,
        ]);

        let summary = run(root.path(), &SynParser)?;
        assert_eq!(summary.user_profiles, vec!["ok"]);
        assert!(!registry_of(&root).contains("\"empty\""));
        Ok(())
    }

    #[test]
    fn test_master_without_commands_is_fatal() {
        let root = project(&[
            ("src/cmd/ok/mod.rs", "pub fn new_ok_cmd() {}"),
            ("src/framework/cli/wiregen/mod.rs", "pub fn helper() {}"),
        ]);

        let err = run(root.path(), &SynParser).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WiregenError>(),
            Some(WiregenError::NoCommandsDiscovered { profile }) if profile == "wiregen"
        ));
        assert!(!root.path().join("generated_profiles.rs").exists());
    }

    #[test]
    fn test_master_without_sources_is_fatal() {
        let root = project(&[("src/framework/cli/wiregen/README.md", "")]);
        let err = run(root.path(), &SynParser).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WiregenError>(),
            Some(WiregenError::NoPackage { .. })
        ));
    }

    #[test]
    fn test_missing_master_is_skipped() -> Result<()> {
        let root = project(&[("src/cmd/ok/mod.rs", "pub fn new_ok_cmd() {}")]);
        let summary = run(root.path(), &SynParser)?;
        assert_eq!(summary.master_profile, None);
        assert_eq!(summary.profile_count(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_profiles_root_is_fatal() {
        let root = project(&[MASTER]);
        fs::remove_dir(root.path().join("src/cmd")).unwrap();

        let err = run(root.path(), &SynParser).unwrap_err();
        assert!(is_directory_read(&err));
    }

    #[test]
    fn test_parse_error_aborts_run() {
        let root = project(&[
            ("src/cmd/alpha/mod.rs", "pub fn new_a_cmd() {}"),
            ("src/cmd/broken/mod.rs", "pub fn new_b_cmd( -> {}"),
            MASTER,
        ]);

        let err = run(root.path(), &SynParser).unwrap_err();
        assert!(format!("{:#}", err).contains("parsing profile 'broken'"));
        assert!(matches!(
            err.downcast_ref::<WiregenError>(),
            Some(WiregenError::Parse { .. })
        ));
        assert!(!root.path().join("generated_profiles.rs").exists());
    }

    #[test]
    fn test_run_from_nested_directory_with_config() -> Result<()> {
        let root = project(&[
            (".wiregen.toml", "[paths]\nmodule_path = \"crate\"\n\n[layout]\nprofiles_dir = \"src/profiles\"\n"),
            ("src/profiles/ops/mod.rs", "pub fn new_deploy_cmd() {}"),
        ]);

        let summary = run(&root.path().join("src/profiles/ops"), &SynParser)?;
        assert_eq!(summary.user_profiles, vec!["ops"]);
        // The profile base follows the configured directory: src/profiles -> crate::profiles.
        assert!(registry_of(&root).contains("use crate::profiles::ops as p_ops;"));
        let wiring = fs::read_to_string(root.path().join("src/profiles/ops/generated.rs"))?;
        assert!(wiring.contains("use crate::framework::profile as profile;"));
        Ok(())
    }

    #[test]
    fn test_hyphenated_profile_directory() -> Result<()> {
        let root = project(&[("src/cmd/my-profile/mod.rs", "pub fn new_a_cmd() {}"), MASTER]);

        let summary = run(root.path(), &SynParser)?;

        assert_eq!(summary.user_profiles, vec!["my-profile"]);
        let registry = registry_of(&root);
        assert!(registry.contains("use demo::cmd::my_profile as p_my_profile;"));
        assert!(registry.contains("registry.insert(\"my-profile\", p_my_profile::generated::execute);"));
        assert!(root.path().join("src/cmd/my-profile/generated.rs").exists());
        Ok(())
    }

    #[test]
    fn test_factory_in_sibling_file_is_qualified() -> Result<()> {
        let root = project(&[
            (
                "src/cmd/alpha/mod.rs",
                "mod deploy;\npub const METADATA: ProfileMetadata = ProfileMetadata { name: \"alpha\", aliases: &[] };\n",
            ),
            ("src/cmd/alpha/deploy.rs", "pub fn new_deploy_cmd() -> Command { todo!() }"),
            MASTER,
        ]);

        run(root.path(), &SynParser)?;

        let wiring = fs::read_to_string(root.path().join("src/cmd/alpha/generated.rs"))?;
        assert!(wiring.contains("root.add_command(super::deploy::new_deploy_cmd());"));
        assert!(!wiring.contains("super::new_deploy_cmd()"));
        Ok(())
    }
}
