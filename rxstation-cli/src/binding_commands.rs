use anyhow::Result;
use colored::Colorize;

use crate::context::AppContext;

pub async fn show_binding(ctx: &AppContext, json: bool) -> Result<()> {
    let binder = ctx.binder().await?;
    let binding = binder.current_binding().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&binding)?);
        return Ok(());
    }

    match binding {
        Some(binding) => {
            println!("{}", "Station Binding:".cyan().bold());
            println!("  Station: {}", binding.station_id.as_str().bold());
            println!("  Name:    {}", binding.station_name);
            println!("  Hash:    {}", binding.fingerprint_hash);
            println!("  Bound:   {}", binding.bound_at.to_rfc3339());
        },
        None => println!("{}", "No station bound.".yellow()),
    }
    Ok(())
}

pub async fn clear_binding(ctx: &AppContext) -> Result<()> {
    let binder = ctx.binder().await?;
    binder.unbind().await?;
    println!("{} Station binding cleared", "✓".green());
    Ok(())
}
