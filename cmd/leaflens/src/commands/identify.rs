use anyhow::{Context, Result};
use colored::Colorize;
use leaflens_core::LeafLens;
use std::path::PathBuf;

use crate::utils::{print_json, print_plant, spinner};
use crate::OutputFormat;

pub async fn handle(app: &LeafLens, image: PathBuf, all: bool, output: &OutputFormat) -> Result<()> {
    let bytes = tokio::fs::read(&image)
        .await
        .with_context(|| format!("Failed to read image file: {}", image.display()))?;

    if all {
        return list_candidates(app, &bytes, output).await;
    }

    let spinner = spinner::new("Identifying plant...", output);
    let identified = app.identification.identify(&bytes).await;
    drop(spinner);

    let details = identified.context("Failed to identify plant")?;

    match (output, details) {
        (OutputFormat::Pretty, Some(details)) => print_plant(&details),
        (OutputFormat::Pretty, None) => {
            println!("{} Could not identify a plant in this photo", "✗".red());
        }
        (_, details) => print_json(&details, output)?,
    }

    Ok(())
}

async fn list_candidates(app: &LeafLens, bytes: &[u8], output: &OutputFormat) -> Result<()> {
    let spinner = spinner::new("Identifying plant...", output);
    let candidates = app.identification.candidates(bytes).await;
    drop(spinner);

    let candidates = candidates.context("Failed to identify plant")?;

    match output {
        OutputFormat::Pretty => {
            if candidates.is_empty() {
                println!("{} Could not identify a plant in this photo", "✗".red());
            }
            for (rank, candidate) in candidates.iter().enumerate() {
                println!(
                    "{}. {} ({}) {}",
                    rank + 1,
                    candidate.primary_common_name().cyan(),
                    candidate.name.italic(),
                    format!("{:.0}%", candidate.confidence * 100.0).yellow()
                );
                if let Some(family) = &candidate.taxonomy.family {
                    println!("   Family: {}", family);
                }
            }
        }
        _ => print_json(&candidates, output)?,
    }

    Ok(())
}
