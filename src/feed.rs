//! Upstream forecast feed: the collaborator seam and payload decoding.

use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use thiserror::Error;

use crate::model::ForecastEntry;

/// Source of raw forecast entries.
///
/// Implementations own transport, credentials and retry policy; the entries
/// they hand over are already resolved to local calendar dates, e.g. via
/// [`decode_forecast`].
#[async_trait]
pub trait ForecastFeed: Send + Sync + Debug {
    async fn fetch_forecast(&self) -> Result<Vec<ForecastEntry>>;
}

/// Structural problems in a forecast payload.
///
/// Malformed entries are never patched up with defaults: a fabricated
/// condition would leak into the per-day mode computation downstream.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to decode forecast payload")]
    Decode(#[from] serde_json::Error),

    #[error("forecast entry at timestamp {timestamp} has no weather condition")]
    MissingCondition { timestamp: i64 },

    #[error("forecast entry has out-of-range timestamp {timestamp}")]
    InvalidTimestamp { timestamp: i64 },
}

/// Decodes an OpenWeatherMap 5-day/3-hour forecast payload into raw entries.
///
/// Each entry's calendar date is its timestamp shifted by the payload's UTC
/// offset and truncated to day precision; nothing downstream does timezone
/// work after this point.
pub fn decode_forecast(body: &str) -> Result<Vec<ForecastEntry>, FeedError> {
    let parsed: OwForecastResponse = serde_json::from_str(body)?;
    let offset = parsed.city.timezone;

    parsed.list.into_iter().map(|entry| entry.into_entry(offset)).collect()
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    /// Shift from UTC in seconds.
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

impl OwForecastEntry {
    fn into_entry(self, utc_offset_secs: i64) -> Result<ForecastEntry, FeedError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or(FeedError::MissingCondition { timestamp: self.dt })?;

        let local = self
            .dt
            .checked_add(utc_offset_secs)
            .and_then(|shifted| DateTime::from_timestamp(shifted, 0))
            .ok_or(FeedError::InvalidTimestamp { timestamp: self.dt })?;

        Ok(ForecastEntry {
            date: local.date_naive(),
            min_temp_c: self.main.temp_min,
            max_temp_c: self.main.temp_max,
            precipitation_chance: self.pop,
            description: condition.description,
            icon: condition.icon,
        })
    }
}
