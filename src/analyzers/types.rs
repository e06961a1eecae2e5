//! Result types produced by the statistics groups.

use serde::Serialize;
use std::collections::BTreeMap;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// 1-12
    pub most_common_month: u32,
    pub most_common_day: String,
    /// 0-23
    pub most_common_hour: u32,
}

/// A start/end station combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: String,
    pub most_common_end_station: String,
    pub most_common_trip: StationPair,
}

/// Total and average trip duration, in the source's units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total: f64,
    pub mean: f64,
}

/// Outcome for a statistic backed by an optional column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    /// The column exists but every cell in the view is blank.
    NoData,
    /// The data source does not publish this column.
    Unavailable,
}

impl<T> Availability<T> {
    pub fn as_available(&self) -> Option<&T> {
        match self {
            Availability::Available(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Availability::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    /// Trips per user type; blank types are counted as `"Unknown"`.
    pub user_types: BTreeMap<String, usize>,
    pub genders: Availability<BTreeMap<String, usize>>,
    pub birth_years: Availability<BirthYearStats>,
}

impl UserStats {
    pub fn user_type_count(&self, user_type: &str) -> usize {
        self.user_types.get(user_type).copied().unwrap_or(0)
    }
}
