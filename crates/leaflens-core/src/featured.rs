//! Curated featured plants shown on the home screen

use futures::future::join_all;
use tracing::debug;

use crate::models::PlantDetails;
use crate::search::SearchOrchestrator;

pub const FEATURED_PLANTS: [&str; 6] = [
    "Rose",
    "Monstera",
    "Aloe Vera",
    "Snake Plant",
    "Peace Lily",
    "Orchid",
];

/// Look up every name concurrently and keep the first hit of each.
///
/// Names with no hit are dropped; the rest keep the order of `names`.
/// Featured lookups are not recorded in search history.
pub async fn load_featured(search: &SearchOrchestrator, names: &[&str]) -> Vec<PlantDetails> {
    let lookups = names.iter().map(|name| search.lookup(name));

    join_all(lookups)
        .await
        .into_iter()
        .zip(names)
        .filter_map(|(results, name)| {
            let first = results.into_iter().next();
            if first.is_none() {
                debug!(name = %name, "Featured plant not found");
            }
            first
        })
        .collect()
}
