use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One 3-hour forecast data point, already resolved to its local calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    /// Probability of precipitation, 0.0..=1.0.
    pub precipitation_chance: f64,
    pub description: String,
    pub icon: String,
}

/// Aggregated forecast for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub precipitation_chance: f64,
    pub description: String,
    pub icon: String,
    /// Stamped by the store when the summary is accepted; `None` until then.
    pub generated_at: Option<DateTime<Utc>>,
}

impl From<ForecastEntry> for DailySummary {
    fn from(entry: ForecastEntry) -> Self {
        Self {
            date: entry.date,
            min_temp_c: entry.min_temp_c,
            max_temp_c: entry.max_temp_c,
            precipitation_chance: entry.precipitation_chance,
            description: entry.description,
            icon: entry.icon,
            generated_at: None,
        }
    }
}
