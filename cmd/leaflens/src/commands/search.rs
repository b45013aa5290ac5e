use anyhow::Result;
use colored::Colorize;
use leaflens_core::LeafLens;

use crate::utils::{print_json, print_plant, print_plant_line, spinner};
use crate::OutputFormat;

pub async fn handle(app: &LeafLens, query: String, output: &OutputFormat) -> Result<()> {
    let spinner = spinner::new(&format!("Searching for {}...", query), output);
    let results = app.search.search(&query).await;
    drop(spinner);

    match output {
        OutputFormat::Pretty => {
            let Some((best, others)) = results.split_first() else {
                println!("{} No plants found for: {}", "✗".red(), query.cyan());
                return Ok(());
            };

            print_plant(best);
            if !others.is_empty() {
                println!("\n{}", "Other matches:".bold());
                for plant in others {
                    print_plant_line(plant);
                }
            }
        }
        _ => print_json(&results, output)?,
    }

    Ok(())
}
