use anyhow::Result;
use colored::Colorize;

use rxstation_core::modules::config as core_config;
use rxstation_types::models::StationConfig;

use crate::context::AppContext;

pub fn show_config(ctx: &AppContext, json: bool) -> Result<()> {
    let mut config = ctx.config.clone();
    config.registry.token = config.registry.token.as_deref().map(mask_token);

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Registry:".cyan().bold());
    println!("  URL: {}", config.registry.base_url);
    println!("  Token: {}", config.registry.token.as_deref().unwrap_or("(not set)"));
    println!("  Timeout: {}s", config.registry.timeout_secs);
    println!("  Page Size: {}", config.registry.page_size);
    println!("  Auto Register: {}", config.registry.auto_register);
    println!(
        "  Retry: {} attempts, {}ms base, {}ms cap",
        config.registry.retry.max_retries,
        config.registry.retry.base_delay_ms,
        config.registry.retry.max_delay_ms
    );
    println!("{}", "Station:".cyan().bold());
    println!("  Prefix: {}", config.station.prefix);
    println!("  Department: {}", config.station.default_department);
    println!(
        "  Location: {}",
        config.station.default_location.as_deref().unwrap_or("(host name)")
    );
    println!("{}", "Fingerprint:".cyan().bold());
    println!("  Hash Scope: {:?}", config.fingerprint.hash_scope);
    println!("  Candidate Fonts: {}", config.fingerprint.candidate_fonts.len());
    println!("{}", "Data:".cyan().bold());
    println!("  Directory: {}", ctx.data_dir.display());
    println!("  Log Level: {}", config.log_level);
    Ok(())
}

pub fn init_config(ctx: &AppContext, force: bool) -> Result<()> {
    let path = core_config::config_path(&ctx.data_dir);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    core_config::save_config_to(&ctx.data_dir, &StationConfig::new())?;
    println!("{} Config written: {}", "✓".green(), path.display());
    Ok(())
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload.sig"), "eyJh....sig");
    }
}
