//! Core library for daily weather forecast aggregation.
//!
//! This crate defines:
//! - Shared domain models (raw forecast entries, daily summaries)
//! - The aggregation routine reducing a 3-hour forecast feed to one record per weekday
//! - Abstractions over the forecast feed and the summary store
//!
//! It is embedded by application shells (UI, services); transport and durable
//! storage live there, behind the [`ForecastFeed`] and [`SummaryStore`] seams.

pub mod aggregate;
pub mod feed;
pub mod model;
pub mod service;
pub mod store;

pub use aggregate::{aggregate, reduce};
pub use feed::{FeedError, ForecastFeed, decode_forecast};
pub use model::{DailySummary, ForecastEntry};
pub use service::ForecastService;
pub use store::{MemoryStore, SummaryStore};
