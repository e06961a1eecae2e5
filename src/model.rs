//! In-memory trip records and the table that owns them.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

/// Columns that only some cities publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OptionalColumn {
    EndTime,
    Gender,
    BirthYear,
}

impl OptionalColumn {
    pub fn header(self) -> &'static str {
        match self {
            OptionalColumn::EndTime => "End Time",
            OptionalColumn::Gender => "Gender",
            OptionalColumn::BirthYear => "Birth Year",
        }
    }
}

/// Which optional columns a loaded table actually carries.
///
/// Determined once from the CSV header at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub end_time: bool,
    pub gender: bool,
    pub birth_year: bool,
}

impl Schema {
    pub fn has(&self, column: OptionalColumn) -> bool {
        match column {
            OptionalColumn::EndTime => self.end_time,
            OptionalColumn::Gender => self.gender,
            OptionalColumn::BirthYear => self.birth_year,
        }
    }
}

/// One trip, with month and weekday derived from `start_time` at load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// 1-12
    pub month: u32,
    pub weekday: Weekday,
}

impl TripRecord {
    /// Builds a record and fills in the derived calendar columns.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_time: NaiveDateTime,
        end_time: Option<NaiveDateTime>,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: Option<String>,
        gender: Option<String>,
        birth_year: Option<i32>,
    ) -> Self {
        Self {
            month: start_time.month(),
            weekday: start_time.weekday(),
            start_time,
            end_time,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type,
            gender,
            birth_year,
        }
    }

    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Canonical capitalised weekday name, e.g. `"Monday"`.
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// An ordered, immutable set of trips loaded from one data source.
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    records: Vec<TripRecord>,
    schema: Schema,
}

impl TripTable {
    pub fn new(records: Vec<TripRecord>, schema: Schema) -> Self {
        Self { records, schema }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
