//! CSV decoder for bike-share trip files.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{LoadError, ParseError};
use crate::model::{OptionalColumn, Schema, TripRecord, TripTable};

pub const START_TIME: &str = "Start Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";

const REQUIRED_COLUMNS: [&str; 5] = [START_TIME, TRIP_DURATION, START_STATION, END_STATION, USER_TYPE];

/// Accepted `Start Time` / `End Time` layouts, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// A CSV row as published. Cells that may be blank are `Option`s; columns
/// that may be absent also default to `None`.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Parses a date-time cell in any of the supported layouts. A bare date is
/// taken as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Decodes a whole trip file into a [`TripTable`].
///
/// `path` is only used to label errors.
///
/// # Errors
///
/// Fails on the first malformed row: a required column missing from the
/// header, an undecodable cell, a non-finite `Trip Duration`, or an
/// unparseable `Start Time`. No partial table is ever returned.
pub fn parse_trips<R: Read>(reader: R, path: &Path) -> Result<TripTable, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();
    let has = |name: &str| headers.iter().any(|h| h == name);

    if let Some(column) = REQUIRED_COLUMNS.into_iter().find(|c| !has(*c)) {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column,
        });
    }

    let schema = Schema {
        end_time: has(OptionalColumn::EndTime.header()),
        gender: has(OptionalColumn::Gender.header()),
        birth_year: has(OptionalColumn::BirthYear.header()),
    };
    debug!(?schema, "Trip file header inspected");

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let raw = result.map_err(csv_err)?;
        records.push(into_record(raw, idx + 1)?);
    }

    Ok(TripTable::new(records, schema))
}

fn into_record(raw: RawTrip, row: usize) -> Result<TripRecord, LoadError> {
    let start_time = parse_timestamp(&raw.start_time).ok_or_else(|| ParseError {
        row,
        column: START_TIME,
        value: raw.start_time.clone(),
    })?;

    // Nothing reads End Time, so an unreadable cell counts as blank.
    let end_time = match raw.end_time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => {
            let parsed = parse_timestamp(value);
            if parsed.is_none() {
                warn!(row, value, "Unreadable End Time treated as blank");
            }
            parsed
        }
    };

    if !raw.trip_duration.is_finite() {
        return Err(LoadError::NonFinite {
            row,
            column: TRIP_DURATION,
            value: raw.trip_duration.to_string(),
        });
    }

    Ok(TripRecord::new(
        start_time,
        end_time,
        raw.trip_duration,
        raw.start_station,
        raw.end_station,
        non_blank(raw.user_type),
        non_blank(raw.gender),
        raw.birth_year.filter(|y| y.is_finite()).map(|y| y as i32),
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
