//! Recent search queries, most recent first

use std::sync::Arc;
use tracing::warn;

use crate::error::LeafResult;
use crate::models::SearchHistoryItem;
use crate::now_millis;
use crate::storage::{KeyValueStore, SEARCH_HISTORY_KEY};

#[derive(Clone)]
pub struct SearchHistory {
    store: Arc<dyn KeyValueStore>,
    limit: usize,
}

impl SearchHistory {
    pub fn new(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Stored queries, most recent first.
    ///
    /// An unreadable blob counts as an empty history; the next `add`
    /// overwrites it.
    pub async fn entries(&self) -> LeafResult<Vec<SearchHistoryItem>> {
        let Some(blob) = self.store.get(SEARCH_HISTORY_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&blob) {
            Ok(history) => Ok(history),
            Err(e) => {
                warn!(error = %e, "Search history is corrupt, starting over");
                Ok(Vec::new())
            }
        }
    }

    /// Record `query` at the front of the list
    pub async fn add(&self, query: &str) -> LeafResult<()> {
        self.add_at(query, now_millis()).await
    }

    /// Record `query` with an explicit timestamp.
    ///
    /// An existing item with the same text is moved rather than duplicated,
    /// and anything past the limit is dropped from the tail.
    pub async fn add_at(&self, query: &str, timestamp: i64) -> LeafResult<()> {
        let mut history = match self.entries().await {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "Search history unreadable, starting over");
                Vec::new()
            }
        };
        history.retain(|item| item.query != query);
        history.insert(
            0,
            SearchHistoryItem {
                query: query.to_string(),
                timestamp,
            },
        );
        history.truncate(self.limit);

        let blob = serde_json::to_string(&history)?;
        self.store.set(SEARCH_HISTORY_KEY, &blob).await
    }

    pub async fn clear(&self) -> LeafResult<()> {
        self.store.remove(SEARCH_HISTORY_KEY).await
    }
}
