//! Orchestration of the fetch → aggregate → persist cycle.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    aggregate::aggregate, feed::ForecastFeed, model::DailySummary, store::SummaryStore,
};

/// Drives one refresh cycle over explicitly injected collaborators.
///
/// The feed and store are held per instance rather than in process-wide
/// state; two services over different feeds can run side by side without
/// coordination.
#[derive(Debug)]
pub struct ForecastService {
    feed: Box<dyn ForecastFeed>,
    store: Box<dyn SummaryStore>,
}

impl ForecastService {
    pub fn new(feed: Box<dyn ForecastFeed>, store: Box<dyn SummaryStore>) -> Self {
        Self { feed, store }
    }

    /// Fetches the raw forecast, reduces it to per-weekday summaries and
    /// replaces the stored batch. Returns the batch as stored, stamped and
    /// sorted by date.
    ///
    /// A forecast that leaves no weekday groups is not a failure: the store
    /// ends up holding an empty batch and an empty list is returned.
    pub async fn refresh(&self) -> Result<Vec<DailySummary>> {
        let entries =
            self.feed.fetch_forecast().await.context("Failed to fetch forecast from feed")?;
        debug!(entries = entries.len(), "fetched raw forecast entries");

        let summaries = aggregate(entries);
        info!(days = summaries.len(), "aggregated forecast into weekday summaries");

        self.store.replace_all(summaries).await.context("Failed to persist daily summaries")?;

        self.store.all().await.context("Failed to read back stored summaries")
    }

    /// Returns the currently stored summaries without touching the feed.
    pub async fn latest(&self) -> Result<Vec<DailySummary>> {
        self.store.all().await.context("Failed to read stored summaries")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        feed::decode_forecast,
        model::ForecastEntry,
        store::{MemoryStore, SummaryStore},
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;

    #[derive(Debug)]
    struct FakeFeed {
        entries: Vec<ForecastEntry>,
    }

    #[async_trait]
    impl ForecastFeed for FakeFeed {
        async fn fetch_forecast(&self) -> Result<Vec<ForecastEntry>> {
            Ok(self.entries.clone())
        }
    }

    #[derive(Debug)]
    struct FailingFeed;

    #[async_trait]
    impl ForecastFeed for FailingFeed {
        async fn fetch_forecast(&self) -> Result<Vec<ForecastEntry>> {
            Err(anyhow::anyhow!("connection reset"))
        }
    }

    #[derive(Debug)]
    struct PayloadFeed {
        body: &'static str,
    }

    #[async_trait]
    impl ForecastFeed for PayloadFeed {
        async fn fetch_forecast(&self) -> Result<Vec<ForecastEntry>> {
            Ok(decode_forecast(self.body)?)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn entry(date: NaiveDate, min: f64, max: f64, pop: f64, description: &str) -> ForecastEntry {
        ForecastEntry {
            date,
            min_temp_c: min,
            max_temp_c: max,
            precipitation_chance: pop,
            description: description.to_owned(),
            icon: "01d".to_owned(),
        }
    }

    #[tokio::test]
    async fn refresh_aggregates_and_persists() {
        // 2026-08-03 is a Monday.
        let monday = date(2026, 8, 3);
        let feed = FakeFeed {
            entries: vec![
                entry(monday, 10.0, 18.0, 0.1, "clear sky"),
                entry(monday, 9.0, 20.0, 0.3, "clear sky"),
            ],
        };
        let service = ForecastService::new(Box::new(feed), Box::new(MemoryStore::new()));

        let summaries = service.refresh().await.expect("refresh succeeds");

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].date, monday);
        assert_eq!(summaries[0].min_temp_c, 9.0);
        assert_eq!(summaries[0].max_temp_c, 20.0);
        assert!(summaries[0].generated_at.is_some());

        assert_eq!(service.latest().await.expect("read succeeds"), summaries);
    }

    #[tokio::test]
    async fn refresh_replaces_previously_stored_summaries() {
        // A weekend-only forecast clears out what an earlier refresh stored.
        let store = MemoryStore::new();
        let seeded = DailySummary::from(entry(date(2026, 8, 3), 9.0, 20.0, 0.1, "clear sky"));
        store.replace_all(vec![seeded]).await.expect("seed replace succeeds");

        let saturday = date(2026, 8, 1);
        let feed = FakeFeed { entries: vec![entry(saturday, 10.0, 18.0, 0.1, "clear sky")] };
        let service = ForecastService::new(Box::new(feed), Box::new(store));

        let summaries = service.refresh().await.expect("refresh succeeds");

        assert!(summaries.is_empty());
        assert!(service.latest().await.expect("read succeeds").is_empty());
    }

    #[tokio::test]
    async fn refresh_propagates_feed_failure() {
        let service = ForecastService::new(Box::new(FailingFeed), Box::new(MemoryStore::new()));

        let err = service.refresh().await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch forecast from feed"));
    }

    #[tokio::test]
    async fn refresh_over_a_decoded_payload() {
        // Both fixture timestamps fall on Tuesday 2022-08-30 at UTC+2.
        let feed = PayloadFeed {
            body: r#"{
                "city": { "timezone": 7200 },
                "list": [
                    {
                        "dt": 1661871600,
                        "main": { "temp_min": 16.5, "temp_max": 19.2 },
                        "weather": [ { "description": "light rain", "icon": "10d" } ],
                        "pop": 0.4
                    },
                    {
                        "dt": 1661882400,
                        "main": { "temp_min": 15.1, "temp_max": 21.0 },
                        "weather": [ { "description": "light rain", "icon": "10d" } ],
                        "pop": 0.2
                    }
                ]
            }"#,
        };
        let service = ForecastService::new(Box::new(feed), Box::new(MemoryStore::new()));

        let summaries = service.refresh().await.expect("refresh succeeds");

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].date, date(2022, 8, 30));
        assert_eq!(summaries[0].min_temp_c, 15.1);
        assert_eq!(summaries[0].max_temp_c, 21.0);
        assert!((summaries[0].precipitation_chance - 0.3).abs() < 1e-9);
        assert_eq!(summaries[0].description, "light rain");
        assert_eq!(summaries[0].icon, "10d");
    }
}
