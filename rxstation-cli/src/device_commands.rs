use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use std::io::{BufRead, Write};

use rxstation_types::models::Device;

use crate::context::AppContext;

const HASH_PREVIEW_LEN: usize = 16;

pub async fn list_devices(ctx: &AppContext, json: bool) -> Result<()> {
    let binder = ctx.binder().await?;
    let devices = binder.list_devices(ctx.token()?).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("{}", "No devices registered.".yellow());
        return Ok(());
    }

    let prefix = binder.settings().prefix.as_str();
    let bound = binder.current_binding().await.ok().flatten();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Station", "Department", "Location", "Hash", "Seen", "Status"]);

    for device in &devices {
        let is_this_station =
            bound.as_ref().is_some_and(|b| device.answers_to(&b.station_id, prefix));
        let station = device.resolved_station_id(prefix).to_string();
        let station = if is_this_station {
            Cell::new(format!("{} *", station)).fg(Color::Cyan)
        } else {
            Cell::new(station)
        };
        let status = if device.is_active.unwrap_or(true) {
            Cell::new("Active").fg(Color::Green)
        } else {
            Cell::new("Inactive").fg(Color::Red)
        };

        table.add_row(vec![
            Cell::new(device.id),
            station,
            Cell::new(device.department.as_deref().unwrap_or("-")),
            Cell::new(device.location.as_deref().unwrap_or("-")),
            Cell::new(hash_preview(device)),
            Cell::new(device.last_seen.as_deref().unwrap_or("-")),
            status,
        ]);
    }

    println!("{table}");
    println!("\n{} devices total", devices.len());
    if bound.is_some() {
        println!("{} marks this station", "*".cyan());
    }
    Ok(())
}

fn hash_preview(device: &Device) -> String {
    if device.fingerprint_hash.is_empty() {
        return "-".to_string();
    }
    device.fingerprint_hash.chars().take(HASH_PREVIEW_LEN).collect()
}

pub async fn delete_device(ctx: &AppContext, id: i64) -> Result<()> {
    let binder = ctx.binder().await?;
    binder.delete_device(ctx.token()?, id).await?;
    println!("{} Device removed: {}", "✓".green(), id.to_string().green());
    Ok(())
}

pub async fn update_hash(ctx: &AppContext, id: i64, yes: bool) -> Result<()> {
    let binder = ctx.binder().await?;
    let token = ctx.token()?;
    let proposal = binder.prepare_hash_update(token, id).await?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["", "Fingerprint hash"]);
    table.add_row(vec![Cell::new("Registered"), Cell::new(proposal.current_hash())]);
    table.add_row(vec![
        Cell::new("Current"),
        Cell::new(proposal.proposed_hash()).fg(Color::Yellow),
    ]);
    println!("Device {}", proposal.device().id.to_string().bold());
    println!("{table}");

    if !proposal.is_changed() {
        println!("{} Registered hash already matches this device", "✓".green());
        return Ok(());
    }

    if !yes && !confirm("Replace the registered hash?")? {
        println!("{}", "Aborted, nothing submitted.".yellow());
        return Ok(());
    }

    let updated = binder.apply_hash_update(token, proposal.confirm()).await?;
    println!("{} Hash updated for device {}", "✓".green(), updated.id);
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer).context("Failed to read answer")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
