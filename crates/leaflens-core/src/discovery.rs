//! Discovery feed: curated plant facts illustrated with stock photos

use futures::future::join_all;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

use crate::models::PlantImage;
use crate::providers::{with_timeout, ImageSearchProvider};

pub const ALL_CATEGORIES: &str = "All";

pub const CATEGORIES: [&str; 7] = [
    ALL_CATEGORIES,
    "Growth",
    "Behavior",
    "History",
    "Carnivorous",
    "Environment",
    "Research",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantFact {
    pub id: &'static str,
    pub title: &'static str,
    pub fact: &'static str,
    pub category: &'static str,
    pub likes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PlantImage>,
}

const fn fact(
    id: &'static str,
    title: &'static str,
    fact: &'static str,
    category: &'static str,
    likes: u32,
) -> PlantFact {
    PlantFact {
        id,
        title,
        fact,
        category,
        likes,
        image: None,
    }
}

pub const PLANT_FACTS: [PlantFact; 6] = [
    fact(
        "1",
        "Bamboo Growth",
        "Some species of bamboo can grow up to 35 inches per day, making them the fastest-growing plants on Earth!",
        "Growth",
        1245,
    ),
    fact(
        "2",
        "Plant Communication",
        "Plants can communicate with each other through chemical signals and warn nearby plants of potential dangers.",
        "Behavior",
        892,
    ),
    fact(
        "3",
        "Oldest Living Tree",
        "The oldest known living tree is a Great Basin Bristlecone Pine named Methuselah, over 4,800 years old!",
        "History",
        2103,
    ),
    fact(
        "4",
        "Venus Flytrap Memory",
        "Venus flytraps can count! They only snap shut after two triggers to avoid wasting energy on false alarms.",
        "Carnivorous",
        1567,
    ),
    fact(
        "5",
        "Rainforest Oxygen",
        "The Amazon rainforest produces about 20% of the world's oxygen, earning it the nickname \"Lungs of the Earth\".",
        "Environment",
        3421,
    ),
    fact(
        "6",
        "Plant Music",
        "Studies show that plants grow better when exposed to classical music due to the vibration patterns!",
        "Research",
        756,
    ),
];

/// Facts in `category`; "All" (any case) matches everything
pub fn facts_in(category: &str) -> Vec<PlantFact> {
    PLANT_FACTS
        .iter()
        .filter(|f| category.eq_ignore_ascii_case(ALL_CATEGORIES) || f.category.eq_ignore_ascii_case(category))
        .cloned()
        .collect()
}

/// Facts in `category`, each with the first photo found for its title.
///
/// Photo lookups run concurrently; a failed lookup leaves that fact
/// without an image.
pub async fn load_facts(
    images: &dyn ImageSearchProvider,
    timeout: Duration,
    category: &str,
) -> Vec<PlantFact> {
    let facts = facts_in(category);

    let lookups = facts.iter().map(|f| async move {
        match with_timeout(images.name(), timeout, images.search(f.title)).await {
            Ok(found) => found.into_iter().next(),
            Err(e) => {
                warn!(title = %f.title, error = %e, "Fact image lookup failed");
                None
            }
        }
    });
    let found = join_all(lookups).await;

    facts
        .into_iter()
        .zip(found)
        .map(|(f, image)| PlantFact { image, ..f })
        .collect()
}
