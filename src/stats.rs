use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::analyzers::types::{DurationStats, StationStats, TimeStats, UserStats};
use crate::analyzers::{duration_stats, station_stats, time_stats, user_stats};
use crate::error::StatsError;
use crate::filter::{TripFilter, TripView};
use crate::model::TripTable;
use crate::source::City;

/// A statistic group together with how long it took to compute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timed<T> {
    pub value: T,
    #[serde(rename = "elapsed_secs", serialize_with = "as_secs")]
    pub elapsed: Duration,
}

fn as_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Runs `group` against the clock. A group that yields nothing means the
/// view had no rows.
fn timed<T>(
    name: &'static str,
    view: &TripView<'_>,
    group: impl FnOnce(&TripView<'_>) -> Option<T>,
) -> Result<Timed<T>, StatsError> {
    let start = Instant::now();
    let value = group(view).ok_or_else(|| StatsError::EmptyView {
        filter: view.filter().to_string(),
    })?;
    let elapsed = start.elapsed();
    debug!(group = name, elapsed_secs = elapsed.as_secs_f64(), "Statistic group computed");
    Ok(Timed { value, elapsed })
}

/// Every statistic group for one filtered view.
#[derive(Debug, Clone, Serialize)]
pub struct TripStats {
    pub generated_at: DateTime<Utc>,
    pub city: Option<City>,
    pub filter: TripFilter,
    pub trip_count: usize,

    pub time: Timed<TimeStats>,
    pub stations: Timed<StationStats>,
    pub duration: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

impl TripStats {
    /// Computes all four groups over `view`.
    ///
    /// # Errors
    ///
    /// Refuses an empty view with [`StatsError::EmptyView`].
    #[tracing::instrument(skip(view), fields(filter = %view.filter(), rows = view.len()))]
    pub fn from_view(view: &TripView<'_>) -> Result<Self, StatsError> {
        if view.is_empty() {
            info!("No trips match filter, skipping statistics");
            return Err(StatsError::EmptyView {
                filter: view.filter().to_string(),
            });
        }

        Ok(TripStats {
            generated_at: Utc::now(),
            city: None,
            filter: view.filter(),
            trip_count: view.len(),
            time: timed("time", view, time_stats)?,
            stations: timed("stations", view, station_stats)?,
            duration: timed("duration", view, duration_stats)?,
            users: timed("users", view, user_stats)?,
        })
    }

    /// Set the data source the view was loaded from.
    pub fn with_city(mut self, city: City) -> Self {
        self.city = Some(city);
        self
    }
}

/// Filters `table` and computes every statistic group for `city`.
pub fn summarize(table: &TripTable, city: City, filter: TripFilter) -> Result<TripStats, StatsError> {
    let view = filter.apply(table);
    Ok(TripStats::from_view(&view)?.with_city(city))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Day, Month};
    use crate::model::{Schema, TripRecord};
    use chrono::NaiveDate;

    fn table() -> TripTable {
        let at = |d: u32, h: u32| {
            NaiveDate::from_ymd_opt(2017, 1, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        TripTable::new(
            vec![
                TripRecord::new(at(2, 8), None, 10.0, "A", "B", Some("Subscriber".into()), None, None),
                TripRecord::new(at(3, 8), None, 20.0, "A", "C", Some("Subscriber".into()), None, None),
                TripRecord::new(at(9, 9), None, 30.0, "C", "B", Some("Customer".into()), None, None),
            ],
            Schema::default(),
        )
    }

    #[test]
    fn test_from_view_runs_every_group() {
        let table = table();
        let stats = TripStats::from_view(&TripFilter::default().apply(&table))
            .unwrap()
            .with_city(City::Washington);

        assert_eq!(stats.city, Some(City::Washington));
        assert_eq!(stats.trip_count, 3);
        assert_eq!(stats.time.value.most_common_month, 1);
        assert_eq!(stats.time.value.most_common_day, "Monday");
        assert_eq!(stats.time.value.most_common_hour, 8);
        assert_eq!(stats.stations.value.most_common_start_station, "A");
        assert_eq!(stats.duration.value.total, 60.0);
        assert_eq!(stats.duration.value.mean, 20.0);
        assert_eq!(stats.users.value.user_type_count("Subscriber"), 2);
        assert!(stats.users.value.genders.is_unavailable());
    }

    #[test]
    fn test_empty_view_is_refused() {
        let table = table();
        let filter = TripFilter::new(Some(Month::June), Some(Day::Sunday));
        let err = TripStats::from_view(&filter.apply(&table)).unwrap_err();

        assert_eq!(
            err,
            StatsError::EmptyView {
                filter: "month=june, day=sunday".into()
            }
        );
    }

    #[test]
    fn test_summarize_sets_city_and_filter() {
        let table = table();
        let filter = TripFilter::new(None, Some(Day::Monday));
        let stats = summarize(&table, City::Chicago, filter).unwrap();

        assert_eq!(stats.city, Some(City::Chicago));
        assert_eq!(stats.filter, filter);
        assert_eq!(stats.trip_count, 2);
    }

    #[test]
    fn test_serializes_elapsed_as_seconds() {
        let table = table();
        let stats = TripStats::from_view(&TripFilter::default().apply(&table)).unwrap();
        let json = serde_json::to_value(&stats).unwrap();

        assert!(json["time"]["elapsed_secs"].is_f64());
        assert_eq!(json["users"]["value"]["genders"]["status"], "unavailable");
        assert_eq!(json["filter"]["month"], serde_json::Value::Null);
    }
}
