use anyhow::Result;
use leaflens_core::LeafLens;

use crate::utils::{print_json, print_plant, spinner};
use crate::OutputFormat;

pub async fn handle(app: &LeafLens, name: String, output: &OutputFormat) -> Result<()> {
    let spinner = spinner::new(&format!("Gathering details for {}...", name), output);
    let details = app.aggregator.details(&name).await;
    drop(spinner);

    match output {
        OutputFormat::Pretty => print_plant(&details),
        _ => print_json(&details, output)?,
    }

    Ok(())
}
