//! Downstream persistence seam for daily summaries.

use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::model::DailySummary;

/// Sink owning the storage lifecycle of aggregated summaries.
///
/// A batch always replaces the previous one wholesale; old and new days are
/// never merged. The store stamps `generated_at` on every record it accepts.
#[async_trait]
pub trait SummaryStore: Send + Sync + Debug {
    /// Drops every stored summary and inserts the given batch.
    async fn replace_all(&self, summaries: Vec<DailySummary>) -> Result<()>;

    /// Returns the stored batch, sorted by date ascending.
    async fn all(&self) -> Result<Vec<DailySummary>>;
}

/// In-memory [`SummaryStore`] for tests and embeddings without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<DailySummary>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SummaryStore for MemoryStore {
    async fn replace_all(&self, mut summaries: Vec<DailySummary>) -> Result<()> {
        let stamp = Utc::now();
        for summary in &mut summaries {
            summary.generated_at = Some(stamp);
        }

        let mut rows = self.rows.lock().await;
        debug!(dropped = rows.len(), inserted = summaries.len(), "replacing stored summaries");
        *rows = summaries;

        Ok(())
    }

    async fn all(&self) -> Result<Vec<DailySummary>> {
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by_key(|summary| summary.date);
        Ok(rows)
    }
}
