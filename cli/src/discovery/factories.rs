//! # Command Factory Discovery
//!
//! File: cli/src/discovery/factories.rs
//!
//! A command factory is a top-level free function named `new_<something>_cmd`.
//! Matching is purely by name: a function that builds a command but is named
//! differently is invisible to discovery, and associated functions inside
//! `impl` blocks never qualify.
//!
//! Discovery yields each factory's path relative to the profile module:
//! `new_deploy_cmd` when declared in `mod.rs`, `deploy::new_deploy_cmd` when
//! declared in `deploy.rs`.
//!
use crate::discovery::scanner::{FunctionScope, ParsedFile};
use std::collections::BTreeSet;
use tracing::debug;

/// Required start of a factory function name.
pub const FACTORY_PREFIX: &str = "new_";
/// Required end of a factory function name.
pub const FACTORY_SUFFIX: &str = "_cmd";

pub fn is_factory_name(name: &str) -> bool {
    name.starts_with(FACTORY_PREFIX) && name.ends_with(FACTORY_SUFFIX)
}

/// Returns the unique factory paths declared across `files`.
///
/// Paths are ordered by factory name, then by declaring module, which fixes
/// the order commands are registered in and therefore the order they appear
/// in help output. An empty result is not an error here; the caller decides
/// what a profile without commands means.
pub fn discover_commands(files: &[ParsedFile]) -> Vec<String> {
    let commands: BTreeSet<(&str, Option<&str>)> = files
        .iter()
        .flat_map(|file| {
            file.functions
                .iter()
                .filter(|func| func.scope == FunctionScope::Free && is_factory_name(&func.name))
                .map(|func| (func.name.as_str(), file.module.as_deref()))
        })
        .collect();
    debug!("Discovered {} command factories", commands.len());
    commands
        .into_iter()
        .map(|(name, module)| match module {
            Some(module) => format!("{}::{}", module, name),
            None => name.to_string(),
        })
        .collect()
}
