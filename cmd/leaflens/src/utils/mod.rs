pub mod spinner;

use anyhow::Result;
use colored::Colorize;
use leaflens_core::PlantDetails;
use serde::Serialize;

use crate::OutputFormat;

/// Print `value` as JSON; `Compact` puts it on one line
pub fn print_json<T: Serialize>(value: &T, output: &OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Compact => println!("{}", serde_json::to_string(value)?),
        _ => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Full care card for one plant
pub fn print_plant(plant: &PlantDetails) {
    println!(
        "{} {} ({})",
        "🌿".green(),
        plant.display_name().bold().cyan(),
        plant.scientific_name.italic()
    );

    let rows = [
        ("Family", plant.family.clone()),
        ("Genus", plant.genus.clone()),
        ("Care level", plant.care_level.clone()),
        ("Watering", plant.watering.clone()),
        ("Sunlight", plant.sunlight.as_ref().map(|tags| tags.join(", "))),
        ("Soil", plant.soil_type.clone()),
        ("Growth rate", plant.growth_rate.clone()),
        ("Flower color", plant.flower_color.clone()),
        ("Native to", plant.distribution.clone()),
        ("Native status", plant.native_status.clone()),
        ("Image", plant.image_url.clone()),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            println!("  {:<14} {}", format!("{}:", label).bright_black(), value);
        }
    }

    if let Some(description) = &plant.description {
        println!("\n{}", description);
    }
    if let Some(uses) = &plant.uses {
        println!("\n{} {}", "Uses:".yellow(), uses);
    }
    if let Some(guide) = &plant.care_guide {
        println!("\n{}\n{}", "Care guide:".yellow(), guide);
    }
    if !plant.gallery.is_empty() {
        println!("\n{} {} photos", "Gallery:".yellow(), plant.gallery.len());
        for url in &plant.gallery {
            println!("  - {}", url.bright_black());
        }
    }
}

/// One-line summary used in lists
pub fn print_plant_line(plant: &PlantDetails) {
    let family = plant
        .family
        .as_deref()
        .map(|f| format!(" [{}]", f))
        .unwrap_or_default();
    println!(
        "  - {} ({}){}",
        plant.display_name().cyan(),
        plant.scientific_name.italic(),
        family.bright_black()
    );
}
