//! Core library entry for the `partcart` CLI.
//!
//! The interesting parts are the [`cart::CartStore`], a persistent ordered
//! collection of cart lines, and the [`hotspot::HotspotMapper`], which turns
//! diagram-space hotspot rectangles into display-space overlays. The
//! [`view::DiagramView`] wires both to the assemblies API.

pub mod adapters;
pub mod cart;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod hotspot;
pub mod model;
pub mod ports;
pub mod view;

use clap::Parser;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version are parse "errors" that belong on stdout.
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    init_tracing(cli.verbose);
    commands::dispatch(&cli.command)
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v` flags.
///
/// Later calls are no-ops, so embedding callers and tests can call `run`
/// repeatedly.
fn init_tracing(verbose: u8) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("warn,partcart={level}"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
