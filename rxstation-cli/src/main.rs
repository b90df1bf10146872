//! RxStation - station agent CLI
//!
//! Binds this workstation to a station in the Device Registry by
//! fingerprint, and exposes the administrative device operations.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]
#![allow(clippy::print_stderr, reason = "CLI tool reports failures on stderr")]

use anyhow::Result;
use clap::Parser;

mod binding_commands;
mod cli;
mod commands;
mod config_commands;
mod context;
mod device_commands;

use cli::{Cli, Commands};
use context::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::init(&cli)?;

    match cli.command {
        Commands::Resolve => commands::handle_resolve(&ctx).await,
        Commands::Fingerprint { json } => commands::handle_fingerprint(&ctx, json).await,
        Commands::Devices(cmd) => commands::handle_device_command(&ctx, cmd).await,
        Commands::UpdateHash { id, yes } => commands::handle_update_hash(&ctx, id, yes).await,
        Commands::Binding(cmd) => commands::handle_binding_command(&ctx, cmd).await,
        Commands::Config(cmd) => commands::handle_config_command(&ctx, cmd),
    }
}
