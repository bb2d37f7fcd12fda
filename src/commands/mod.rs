//! Command dispatch and handlers.

pub mod cart;
pub mod diagram;

use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// Configuration is resolved once and the live service context is built
/// from it before any handler runs.
///
/// # Errors
///
/// Returns an error string if configuration fails or the selected command
/// handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::load().map_err(|e| e.to_string())?;
    let ctx = ServiceContext::live(&config);
    dispatch_with_context(command, &config, &ctx)
}

/// Dispatch a command with the given configuration and service context.
///
/// # Errors
///
/// Returns an error string if the command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    config: &Config,
    ctx: &ServiceContext,
) -> Result<(), String> {
    match command {
        Command::Cart(cart_command) => cart::run(ctx, cart_command),
        Command::Diagram(diagram_command) => diagram::run(ctx, config, diagram_command),
    }
}
