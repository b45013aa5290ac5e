use anyhow::Result;
use colored::Colorize;
use leaflens_core::featured::{load_featured, FEATURED_PLANTS};
use leaflens_core::LeafLens;

use crate::utils::{print_json, print_plant_line, spinner};
use crate::OutputFormat;

pub async fn handle(app: &LeafLens, output: &OutputFormat) -> Result<()> {
    let spinner = spinner::new("Loading featured plants...", output);
    let plants = load_featured(&app.search, &FEATURED_PLANTS).await;
    drop(spinner);

    match output {
        OutputFormat::Pretty => {
            if plants.is_empty() {
                println!("{} Featured plants are unavailable right now", "✗".red());
                return Ok(());
            }
            println!("{}", "Featured plants:".bold());
            for plant in &plants {
                print_plant_line(plant);
            }
        }
        _ => print_json(&plants, output)?,
    }

    Ok(())
}
