use anyhow::Result;
use colored::Colorize;
use leaflens_core::discovery::{load_facts, CATEGORIES};
use leaflens_core::LeafLens;

use crate::utils::{print_json, spinner};
use crate::OutputFormat;

pub async fn handle(app: &LeafLens, category: String, output: &OutputFormat) -> Result<()> {
    if !CATEGORIES.iter().any(|c| c.eq_ignore_ascii_case(&category)) {
        anyhow::bail!(
            "Unknown category '{}'. Choose one of: {}",
            category,
            CATEGORIES.join(", ")
        );
    }

    let spinner = spinner::new("Loading plant facts...", output);
    let facts = load_facts(app.providers.images.as_ref(), app.config.image_timeout, &category).await;
    drop(spinner);

    match output {
        OutputFormat::Pretty => {
            for fact in &facts {
                println!(
                    "{} {} {}",
                    "🌱".green(),
                    fact.title.bold(),
                    format!("[{}] ♥ {}", fact.category, fact.likes).bright_black()
                );
                println!("  {}", fact.fact);
                if let Some(image) = &fact.image {
                    println!("  {} {}", "Photo:".bright_black(), image.url);
                }
                println!();
            }
        }
        _ => print_json(&facts, output)?,
    }

    Ok(())
}
