//! Output formatting and persistence for trip statistics.
//!
//! Supports plain-text reports, JSON serialization, and CSV append.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::analyzers::types::{Availability, BirthYearStats, UserStats};
use crate::model::TripRecord;
use crate::stats::TripStats;

const RULE_WIDTH: usize = 40;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn took(out: &mut String, elapsed: Duration) {
    let _ = writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64());
    let _ = writeln!(out, "{}", rule());
}

/// Renders every statistic group as the human-readable report.
pub fn render_report(stats: &TripStats) -> String {
    let mut out = String::new();

    out.push_str("\nCalculating The Most Frequent Times of Travel...\n\n");
    let time = &stats.time.value;
    let _ = writeln!(out, "The most common month is: {}", time.most_common_month);
    let _ = writeln!(out, "The most common day of the week is: {}", time.most_common_day);
    let _ = writeln!(out, "The most common hour is: {}", time.most_common_hour);
    took(&mut out, stats.time.elapsed);

    out.push_str("\nCalculating The Most Popular Stations and Trip...\n\n");
    let stations = &stats.stations.value;
    let _ = writeln!(
        out,
        "The most commonly used start station is: {}",
        stations.most_common_start_station
    );
    let _ = writeln!(
        out,
        "The most commonly used end station is: {}",
        stations.most_common_end_station
    );
    let _ = writeln!(
        out,
        "The most commonly used start/end station combo is: start - {}, end - {}",
        stations.most_common_trip.start, stations.most_common_trip.end
    );
    took(&mut out, stats.stations.elapsed);

    out.push_str("\nCalculating Trip Duration...\n\n");
    let duration = &stats.duration.value;
    let _ = writeln!(out, "The total travel time is: {} minutes", duration.total);
    let _ = writeln!(out, "The average travel time is: {} minutes", duration.mean);
    took(&mut out, stats.duration.elapsed);

    out.push_str("\nCalculating User Stats...\n\n");
    render_users(&mut out, &stats.users.value);
    took(&mut out, stats.users.elapsed);

    out
}

fn render_users(out: &mut String, users: &UserStats) {
    for (user_type, count) in &users.user_types {
        let _ = writeln!(out, "The total number of {user_type} trips is: {count}.");
    }

    match &users.genders {
        Availability::Available(genders) => {
            for (gender, count) in genders {
                let _ = writeln!(out, "The total number of {gender} riders is: {count}.");
            }
        }
        Availability::NoData => {
            out.push_str("No gender data was recorded for the selected trips.\n");
        }
        Availability::Unavailable => {
            out.push_str("Gender statistics are not available for this city.\n");
        }
    }

    match &users.birth_years {
        Availability::Available(years) => {
            let _ = writeln!(out, "The earliest birth year is: {}", years.earliest);
            let _ = writeln!(out, "The most recent birth year is: {}", years.most_recent);
            let _ = writeln!(out, "The most common birth year is: {}", years.most_common);
        }
        Availability::NoData => {
            out.push_str("No birth year data was recorded for the selected trips.\n");
        }
        Availability::Unavailable => {
            out.push_str("Birth Year statistics are not available for this city.\n");
        }
    }
}

/// Renders a page of raw trips as an aligned table.
pub fn render_page(trips: &[TripRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<19}  {:>13}  {:<32}  {:<32}  {:<10}  {:<6}  {}",
        "Start Time", "Trip Duration", "Start Station", "End Station", "User Type", "Gender", "Birth Year"
    );
    for trip in trips {
        let _ = writeln!(
            out,
            "{:<19}  {:>13}  {:<32}  {:<32}  {:<10}  {:<6}  {}",
            trip.start_time.format("%Y-%m-%d %H:%M:%S"),
            trip.trip_duration,
            trip.start_station,
            trip.end_station,
            trip.user_type.as_deref().unwrap_or("-"),
            trip.gender.as_deref().unwrap_or("-"),
            trip.birth_year.map_or_else(|| "-".to_string(), |y| y.to_string()),
        );
    }
    out
}

/// Logs trip statistics using Rust's debug pretty-print format.
pub fn print_pretty(stats: &TripStats) {
    debug!("{:#?}", stats);
}

/// Serializes trip statistics as pretty-printed JSON.
pub fn to_json(stats: &TripStats) -> Result<String> {
    Ok(serde_json::to_string_pretty(stats)?)
}

/// One flat CSV row summarising a [`TripStats`] report.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub generated_at: String,
    pub city: String,
    pub month: String,
    pub day: String,
    pub trip_count: usize,
    pub most_common_month: u32,
    pub most_common_day: String,
    pub most_common_hour: u32,
    pub most_common_start_station: String,
    pub most_common_end_station: String,
    pub most_common_trip_start: String,
    pub most_common_trip_end: String,
    pub total_duration: f64,
    pub mean_duration: f64,
    /// `Customer=1;Subscriber=2`
    pub user_types: String,
    /// Same encoding as `user_types`, or `unavailable` / `no_data`.
    pub genders: String,
    pub earliest_birth_year: Option<i32>,
    pub most_recent_birth_year: Option<i32>,
    pub most_common_birth_year: Option<i32>,
}

fn join_counts<'a>(counts: impl IntoIterator<Item = (&'a String, &'a usize)>) -> String {
    counts
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(";")
}

impl From<&TripStats> for SummaryRow {
    fn from(stats: &TripStats) -> Self {
        let users = &stats.users.value;
        let genders = match &users.genders {
            Availability::Available(g) => join_counts(g),
            Availability::NoData => "no_data".to_string(),
            Availability::Unavailable => "unavailable".to_string(),
        };
        let years: Option<&BirthYearStats> = users.birth_years.as_available();

        SummaryRow {
            generated_at: stats.generated_at.to_rfc3339(),
            city: stats.city.map(|c| c.name().to_string()).unwrap_or_default(),
            month: stats
                .filter
                .month
                .map_or_else(|| "all".to_string(), |m| m.name().to_string()),
            day: stats
                .filter
                .day
                .map_or_else(|| "all".to_string(), |d| d.canonical_name().to_lowercase()),
            trip_count: stats.trip_count,
            most_common_month: stats.time.value.most_common_month,
            most_common_day: stats.time.value.most_common_day.clone(),
            most_common_hour: stats.time.value.most_common_hour,
            most_common_start_station: stats.stations.value.most_common_start_station.clone(),
            most_common_end_station: stats.stations.value.most_common_end_station.clone(),
            most_common_trip_start: stats.stations.value.most_common_trip.start.clone(),
            most_common_trip_end: stats.stations.value.most_common_trip.end.clone(),
            total_duration: stats.duration.value.total,
            mean_duration: stats.duration.value.mean,
            user_types: join_counts(&users.user_types),
            genders,
            earliest_birth_year: years.map(|y| y.earliest),
            most_recent_birth_year: years.map(|y| y.most_recent),
            most_common_birth_year: years.map(|y| y.most_common),
        }
    }
}

/// Appends a [`TripStats`] summary as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, stats: &TripStats) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(SummaryRow::from(stats))?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Month, TripFilter};
    use crate::model::{Schema, TripTable};
    use chrono::NaiveDate;
    use std::fs;

    fn stats_for(schema: Schema) -> TripStats {
        let start = NaiveDate::from_ymd_opt(2017, 3, 6)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let (gender, year) = if schema.gender {
            (Some("Female".to_string()), Some(1980))
        } else {
            (None, None)
        };
        let table = TripTable::new(
            vec![TripRecord::new(
                start,
                None,
                42.0,
                "Canal St",
                "Clark St",
                Some("Subscriber".into()),
                gender,
                year,
            )],
            schema,
        );
        TripStats::from_view(&TripFilter::new(Some(Month::March), None).apply(&table)).unwrap()
    }

    fn full_schema() -> Schema {
        Schema {
            end_time: true,
            gender: true,
            birth_year: true,
        }
    }

    #[test]
    fn test_render_report_with_demographics() {
        let text = render_report(&stats_for(full_schema()));

        assert!(text.contains("The most common month is: 3"));
        assert!(text.contains("The most common day of the week is: Monday"));
        assert!(text.contains("start - Canal St, end - Clark St"));
        assert!(text.contains("The total travel time is: 42 minutes"));
        assert!(text.contains("The total number of Subscriber trips is: 1."));
        assert!(text.contains("The total number of Female riders is: 1."));
        assert!(text.contains("The most common birth year is: 1980"));
        assert_eq!(text.matches("This took").count(), 4);
    }

    #[test]
    fn test_render_report_without_demographics() {
        let text = render_report(&stats_for(Schema::default()));

        assert!(text.contains("Gender statistics are not available for this city."));
        assert!(text.contains("Birth Year statistics are not available for this city."));
    }

    #[test]
    fn test_render_page() {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 7, 57)
            .unwrap();
        let trip = TripRecord::new(start, None, 776.0, "Wood St", "Damen Ave", None, None, Some(1989));
        let text = render_page(&[trip]);

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("2017-01-01 00:07:57"));
        assert!(lines[1].contains("1989"));
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&stats_for(Schema::default()));
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&stats_for(full_schema())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["filter"]["month"], "march");
        assert_eq!(value["duration"]["value"]["mean"], 42.0);
    }

    #[test]
    fn test_summary_row() {
        let row = SummaryRow::from(&stats_for(Schema::default()));
        assert_eq!(row.month, "march");
        assert_eq!(row.day, "all");
        assert_eq!(row.user_types, "Subscriber=1");
        assert_eq!(row.genders, "unavailable");
        assert_eq!(row.earliest_birth_year, None);
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");

        let stats = stats_for(full_schema());
        append_record(&path, &stats).unwrap();
        append_record(&path, &stats).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            content.lines().filter(|l| l.starts_with("generated_at")).count(),
            1
        );
    }
}
