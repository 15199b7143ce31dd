//! # Profile Descriptors
//!
//! File: cli/src/emit/descriptor.rs
//!
//! Everything the emitters need to know about one discovered profile. A
//! descriptor is rebuilt from the sources on every run and never stored.
//!
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileDescriptor {
    /// Dispatch name; the directory name for user profiles.
    pub name: String,
    /// Module name of the profile directory.
    pub package_name: String,
    /// Discovered factory paths relative to the profile module
    /// (`new_a_cmd`, `deploy::new_deploy_cmd`), sorted by factory name and unique.
    pub commands: Vec<String>,
    /// Import path of the profile module.
    pub import_path: String,
    /// Identifier the registry imports the module under.
    pub import_alias: String,
    /// Extra dispatch names, in extraction order.
    pub aliases: Vec<String>,
}
