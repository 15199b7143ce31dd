//! # Wiregen Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the `wiregen` binary. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Running the generator and reporting its failure
//!
//! ## Architecture
//!
//! - `discovery`: finds the repository root, scans profile directories and
//!   extracts factories, aliases and import paths.
//! - `emit`: renders and writes the per-profile wiring files and the registry.
//! - `commands::generate`: runs the whole pipeline once.
//! - `core` / `common`: configuration, errors, templating and file I/O.
//!
//! ## Examples
//!
//! ```bash
//! # Regenerate the project containing the current directory
//! wiregen
//!
//! # Regenerate another project, logging every step
//! wiregen -vv -C path/to/project
//! ```
//!
//! Progress lines go to stdout; logs and errors go to stderr. Any error exits
//! with status 1.
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // The generate run
mod common; // Shared filesystem helpers
mod core; // Errors, config, templating
mod discovery; // Source scanning and path resolution
mod emit; // Generated file rendering

/// Defines the command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "wiregen",
    about = "Wires CLI profiles into generated Rust entry points",
    long_about = "Scans profile directories for `new_*_cmd` factories and regenerates\n\
                  each profile's wiring module plus the repository profile registry.",
    version
)]
struct Cli {
    #[command(flatten)]
    generate: commands::generate::GenerateArgs,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = commands::generate::handle_generate(cli.generate) {
        tracing::error!("Generation failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
