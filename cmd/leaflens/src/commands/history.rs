use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use leaflens_core::LeafLens;

use crate::commands::HistoryCommands;
use crate::utils::print_json;
use crate::OutputFormat;

pub async fn handle(app: &LeafLens, command: HistoryCommands, output: &OutputFormat) -> Result<()> {
    match command {
        HistoryCommands::List => list(app, output).await,
        HistoryCommands::Clear => clear(app, output).await,
    }
}

async fn list(app: &LeafLens, output: &OutputFormat) -> Result<()> {
    let entries = app
        .history
        .entries()
        .await
        .context("Failed to read search history")?;

    match output {
        OutputFormat::Pretty => {
            if entries.is_empty() {
                println!("{} No recent searches", "•".blue());
                return Ok(());
            }
            println!("{}", "Recent searches:".bold());
            for entry in &entries {
                println!("  {} {}", format_timestamp(entry.timestamp).bright_black(), entry.query.cyan());
            }
        }
        _ => print_json(&entries, output)?,
    }

    Ok(())
}

async fn clear(app: &LeafLens, output: &OutputFormat) -> Result<()> {
    app.history
        .clear()
        .await
        .context("Failed to clear search history")?;

    match output {
        OutputFormat::Pretty => println!("{} Search history cleared", "✓".green()),
        _ => print_json(&serde_json::json!({ "cleared": true }), output)?,
    }

    Ok(())
}

fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}
