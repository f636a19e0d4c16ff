//! In-memory cache of saved calculation summaries.
//!
//! The cache backs name autocomplete and quick listings. It is never updated
//! incrementally: every mutating store operation is followed by a [`SavedCalculationCache::refresh`]
//! that replaces the whole list from the database.

use crate::{
    core::saved::{self, SavedSummary},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, trace};

/// Discord caps autocomplete responses at 25 entries.
pub const MAX_SUGGESTIONS: usize = 25;

/// Shared, clonable handle to the summary list.
#[derive(Debug, Clone, Default)]
pub struct SavedCalculationCache {
    summaries: Arc<RwLock<Vec<SavedSummary>>>,
}

impl SavedCalculationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached summaries with the current contents of the store.
    ///
    /// On failure the previous contents are kept.
    pub async fn refresh(&self, db: &DatabaseConnection) -> Result<()> {
        info!("Refreshing saved calculation cache...");
        let summaries = saved::list_saved_summaries(db)
            .await
            .inspect_err(|e| error!("DB error fetching saved calculations for cache: {}", e))?;

        let mut cache_writer = self.summaries.write().await;
        *cache_writer = summaries;
        info!(
            "Saved calculation cache refreshed with {} items.",
            cache_writer.len()
        );
        trace!("Saved calculation cache now contains: {:?}", cache_writer);
        Ok(())
    }

    /// Refreshes after a mutation that already succeeded. A failure is logged, not returned.
    pub async fn refresh_after(&self, db: &DatabaseConnection, action: &str) {
        if let Err(e) = self.refresh(db).await {
            error!(
                "Failed to refresh saved calculation cache after {}: {}",
                action, e
            );
        }
    }

    /// A copy of the cached summaries, newest first.
    pub async fn snapshot(&self) -> Vec<SavedSummary> {
        self.summaries.read().await.clone()
    }

    /// Number of cached summaries.
    pub async fn len(&self) -> usize {
        self.summaries.read().await.len()
    }

    /// Whether the cache holds no summaries.
    pub async fn is_empty(&self) -> bool {
        self.summaries.read().await.is_empty()
    }

    /// Names containing `partial`, ignoring case, newest first and capped at
    /// [`MAX_SUGGESTIONS`]. Duplicate names appear once.
    pub async fn matching(&self, partial: &str) -> Vec<String> {
        let partial_lower = partial.to_lowercase();
        let cache_reader = self.summaries.read().await;

        let mut names: Vec<String> = Vec::new();
        for summary in cache_reader.iter() {
            if names.len() == MAX_SUGGESTIONS {
                break;
            }
            if summary.name.to_lowercase().contains(&partial_lower)
                && !names.contains(&summary.name)
            {
                names.push(summary.name.clone());
            }
        }
        names
    }
}
