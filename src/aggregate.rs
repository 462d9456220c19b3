//! Reduction of a raw multi-day forecast into one summary per weekday.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::model::{DailySummary, ForecastEntry};

/// Groups `entries` by calendar date, drops Saturday/Sunday groups and reduces
/// every remaining group to a single [`DailySummary`].
///
/// The input needs no particular order and may be empty. Output order is
/// unspecified; callers that care (typically the store) sort by date.
pub fn aggregate(entries: Vec<ForecastEntry>) -> Vec<DailySummary> {
    let mut by_date: HashMap<NaiveDate, Vec<DailySummary>> = HashMap::new();

    for entry in entries {
        by_date.entry(entry.date).or_default().push(DailySummary::from(entry));
    }

    by_date
        .into_iter()
        .filter(|(date, _)| !is_weekend(date.weekday()))
        .map(|(_, group)| reduce(&group))
        .collect()
}

/// Reduces a group of same-date summaries into one.
///
/// `min_temp_c`/`max_temp_c` are the running minimum/maximum over the group,
/// `precipitation_chance` the arithmetic mean, and `description`/`icon` each
/// the most frequent value, counted independently of one another. A frequency
/// tie is broken towards the lexicographically smallest value.
///
/// Re-reducing already-reduced summaries keeps min/max exact but weighs every
/// summary as a single sample: the precipitation mean is not corrected for how
/// many raw entries a summary was built from.
///
/// # Panics
///
/// Panics if `group` is empty. Grouping in [`aggregate`] guarantees non-empty
/// groups; other callers must do the same.
pub fn reduce(group: &[DailySummary]) -> DailySummary {
    assert!(!group.is_empty(), "cannot reduce an empty forecast group");

    let mut min_temp_c = group[0].min_temp_c;
    let mut max_temp_c = group[0].max_temp_c;
    let mut precipitation_sum = 0.0;
    let mut descriptions: HashMap<&str, usize> = HashMap::new();
    let mut icons: HashMap<&str, usize> = HashMap::new();

    for summary in group {
        if summary.min_temp_c < min_temp_c {
            min_temp_c = summary.min_temp_c;
        }
        if summary.max_temp_c > max_temp_c {
            max_temp_c = summary.max_temp_c;
        }
        precipitation_sum += summary.precipitation_chance;
        *descriptions.entry(summary.description.as_str()).or_default() += 1;
        *icons.entry(summary.icon.as_str()).or_default() += 1;
    }

    DailySummary {
        // All group members share one date.
        date: group[0].date,
        min_temp_c,
        max_temp_c,
        precipitation_chance: precipitation_sum / group.len() as f64,
        description: mode(descriptions).to_owned(),
        icon: mode(icons).to_owned(),
        generated_at: None,
    }
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Highest-count value; equal counts resolve to the lexicographically smallest.
fn mode(counts: HashMap<&str, usize>) -> &str {
    let mut best = ("", 0);
    for (value, count) in counts {
        if count > best.1 || (count == best.1 && value < best.0) {
            best = (value, count);
        }
    }
    best.0
}
