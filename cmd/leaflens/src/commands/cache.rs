use anyhow::{Context, Result};
use colored::Colorize;
use leaflens_core::models::normalize_scientific_name;
use leaflens_core::{now_millis, LeafLens};

use crate::commands::CacheCommands;
use crate::utils::print_json;
use crate::OutputFormat;

pub async fn handle(app: &LeafLens, command: CacheCommands, output: &OutputFormat) -> Result<()> {
    match command {
        CacheCommands::Stats => stats(app, output).await,
        CacheCommands::Invalidate { name } => invalidate(app, name, output).await,
        CacheCommands::Clear => clear(app, output).await,
    }
}

async fn stats(app: &LeafLens, output: &OutputFormat) -> Result<()> {
    let stats = app
        .cache
        .stats(now_millis())
        .await
        .context("Failed to read plant cache")?;

    match output {
        OutputFormat::Pretty => {
            println!("{} Plant cache", "•".blue());
            println!("  Entries: {}", stats.total);
            println!("  Fresh:   {}", stats.fresh.to_string().green());
            println!("  Expired: {}", stats.expired.to_string().yellow());
            println!("  TTL:     {}h", app.cache.ttl().as_secs() / 3600);
        }
        _ => print_json(&stats, output)?,
    }

    Ok(())
}

async fn invalidate(app: &LeafLens, name: String, output: &OutputFormat) -> Result<()> {
    let key = normalize_scientific_name(&name);
    let removed = app
        .cache
        .remove(&key)
        .await
        .with_context(|| format!("Failed to invalidate cache entry: {}", key))?;

    match output {
        OutputFormat::Pretty if removed => {
            println!("{} Removed cached record for {}", "✓".green(), key.cyan())
        }
        OutputFormat::Pretty => println!("{} No cached record for {}", "•".blue(), key.cyan()),
        _ => print_json(&serde_json::json!({ "key": key, "removed": removed }), output)?,
    }

    Ok(())
}

async fn clear(app: &LeafLens, output: &OutputFormat) -> Result<()> {
    app.cache.clear().await.context("Failed to clear plant cache")?;

    match output {
        OutputFormat::Pretty => println!("{} Plant cache cleared", "✓".green()),
        _ => print_json(&serde_json::json!({ "cleared": true }), output)?,
    }

    Ok(())
}
