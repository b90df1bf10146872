use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use tokio_util::sync::CancellationToken;

use rxstation_core::{ResolutionOutcome, StationState};

use crate::cli::{BindingCommands, ConfigCommands, DeviceCommands};
use crate::context::AppContext;
use crate::{binding_commands, config_commands, device_commands};

pub async fn handle_resolve(ctx: &AppContext) -> Result<()> {
    let token = ctx.token()?;
    let binder = ctx.binder().await?;

    // Ctrl-C abandons the resolution without touching the binding.
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let state = binder.resolve_or_degrade(token, &cancel).await;
    interrupt.abort();

    match state {
        StationState::Bound(resolution) => {
            let outcome = match resolution.outcome {
                ResolutionOutcome::Cached => "cached binding".cyan(),
                ResolutionOutcome::Reconnected => "reconnected".green(),
                ResolutionOutcome::Registered => "newly registered".yellow(),
            };
            println!(
                "{} Station {} ({})",
                "✓".green(),
                resolution.station_id().as_str().bold(),
                outcome
            );
            println!("  Name:   {}", resolution.binding.station_name);
            println!("  Device: {}", resolution.device.id);
            Ok(())
        },
        StationState::Unbound { reason, retryable } => {
            eprintln!("{} cannot register station", "✗".red());
            if retryable {
                eprintln!("  {}", "The registry may be temporarily unavailable; retry later.".yellow());
            }
            anyhow::bail!(reason)
        },
    }
}

pub async fn handle_fingerprint(ctx: &AppContext, json: bool) -> Result<()> {
    let binder = ctx.binder().await?;
    let fingerprint = binder.fingerprint().await?;

    if json {
        let output = serde_json::json!({
            "hash": fingerprint.hash,
            "scope": fingerprint.scope,
            "record": fingerprint.record,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Signal", "Value"]);
    if let serde_json::Value::Object(signals) = serde_json::to_value(&fingerprint.record)? {
        for (name, value) in signals {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            table.add_row(vec![Cell::new(name), Cell::new(value)]);
        }
    }

    println!("{table}");
    println!("\n{} {}", "Hash:".cyan().bold(), fingerprint.hash);
    Ok(())
}

pub async fn handle_device_command(ctx: &AppContext, cmd: DeviceCommands) -> Result<()> {
    match cmd {
        DeviceCommands::List { json } => device_commands::list_devices(ctx, json).await,
        DeviceCommands::Delete { id } => device_commands::delete_device(ctx, id).await,
    }
}

pub async fn handle_update_hash(ctx: &AppContext, id: i64, yes: bool) -> Result<()> {
    device_commands::update_hash(ctx, id, yes).await
}

pub async fn handle_binding_command(ctx: &AppContext, cmd: BindingCommands) -> Result<()> {
    match cmd {
        BindingCommands::Show { json } => binding_commands::show_binding(ctx, json).await,
        BindingCommands::Clear => binding_commands::clear_binding(ctx).await,
    }
}

pub fn handle_config_command(ctx: &AppContext, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { json } => config_commands::show_config(ctx, json),
        ConfigCommands::Init { force } => config_commands::init_config(ctx, force),
    }
}
