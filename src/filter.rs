//! Month / weekday filtering of a trip table.
//!
//! Filters never copy or mutate trips: a [`TripView`] is the source table
//! plus the indices of the rows that passed. Active filters are AND-combined.

use chrono::Weekday;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::model::{TripRecord, TripTable, weekday_name};

/// The months covered by the published data sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based calendar month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Month::ALL
            .into_iter()
            .find(|m| m.name() == lower)
            .ok_or_else(|| format!("unsupported month '{}'", s.trim()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn weekday(self) -> Weekday {
        match self {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
            Day::Sunday => Weekday::Sun,
        }
    }

    /// Capitalised form, as stored in the derived weekday column.
    pub fn canonical_name(self) -> &'static str {
        weekday_name(self.weekday())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Day::ALL
            .into_iter()
            .find(|d| d.canonical_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown day '{trimmed}'"))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Month and weekday selectors. `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TripFilter {
    pub month: Option<Month>,
    pub day: Option<Day>,
}

impl TripFilter {
    pub fn new(month: Option<Month>, day: Option<Day>) -> Self {
        Self { month, day }
    }

    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        if let Some(month) = self.month {
            if trip.month != month.number() {
                return false;
            }
        }

        if let Some(day) = self.day {
            if !trip.weekday_name().eq_ignore_ascii_case(day.canonical_name()) {
                return false;
            }
        }

        true
    }

    /// Produces the subset of `table` matching every active selector.
    #[tracing::instrument(skip(table), fields(rows = table.len()))]
    pub fn apply<'a>(&self, table: &'a TripTable) -> TripView<'a> {
        let rows: Vec<usize> = if self.is_empty() {
            (0..table.len()).collect()
        } else {
            table
                .records()
                .iter()
                .enumerate()
                .filter(|(_, trip)| self.matches(trip))
                .map(|(idx, _)| idx)
                .collect()
        };
        debug!(matched = rows.len(), "Filter applied");

        TripView {
            table,
            filter: *self,
            rows,
        }
    }
}

impl fmt::Display for TripFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(m) => write!(f, "month={m}")?,
            None => f.write_str("month=all")?,
        }
        match self.day {
            Some(d) => write!(f, ", day={}", d.canonical_name().to_lowercase()),
            None => f.write_str(", day=all"),
        }
    }
}

/// Read-only selection of rows from a [`TripTable`], in table order.
#[derive(Debug, Clone)]
pub struct TripView<'a> {
    table: &'a TripTable,
    filter: TripFilter,
    rows: Vec<usize>,
}

impl<'a> TripView<'a> {
    /// A view over every row of `table`.
    pub fn all(table: &'a TripTable) -> Self {
        TripFilter::default().apply(table)
    }

    pub fn table(&self) -> &'a TripTable {
        self.table
    }

    /// The selectors this view was produced with.
    pub fn filter(&self) -> TripFilter {
        self.filter
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TripRecord> + '_ {
        let records = self.table.records();
        self.rows.iter().map(move |&idx| &records[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Schema;
    use chrono::NaiveDate;

    fn trip(month: u32, day: u32) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(2017, month, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        TripRecord::new(start, None, 10.0, "A", "B", None, None, None)
    }

    fn table() -> TripTable {
        // 2017-01-02 Mon, 2017-01-06 Fri, 2017-03-03 Fri, 2017-03-06 Mon, 2017-06-30 Fri
        TripTable::new(
            vec![trip(1, 2), trip(1, 6), trip(3, 3), trip(3, 6), trip(6, 30)],
            Schema::default(),
        )
    }

    #[test]
    fn test_no_filter_keeps_everything_in_order() {
        let table = table();
        let view = TripFilter::default().apply(&table);
        let trips: Vec<_> = view.iter().cloned().collect();
        assert_eq!(trips, table.records());
    }

    #[test]
    fn test_month_filter() {
        let table = table();
        let view = TripFilter::new(Some(Month::March), None).apply(&table);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|t| t.month == 3));
    }

    #[test]
    fn test_day_filter() {
        let table = table();
        let view = TripFilter::new(None, Some(Day::Friday)).apply(&table);
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|t| t.weekday_name() == "Friday"));
    }

    #[test]
    fn test_month_and_day_filters_combine() {
        let table = table();
        let both = TripFilter::new(Some(Month::January), Some(Day::Friday)).apply(&table);
        let month_only = TripFilter::new(Some(Month::January), None).apply(&table);

        assert_eq!(both.len(), 1);
        assert!(both.len() <= month_only.len());
        assert!(month_only.len() <= table.len());
    }

    #[test]
    fn test_filter_with_no_matches() {
        let table = table();
        let view = TripFilter::new(Some(Month::February), None).apply(&table);
        assert!(view.is_empty());
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_selectors_parse_case_insensitively() {
        assert_eq!("FRIDAY".parse::<Day>(), Ok(Day::Friday));
        assert_eq!(" june ".parse::<Month>(), Ok(Month::June));
        assert!("july".parse::<Month>().is_err());
        assert!("funday".parse::<Day>().is_err());
    }

    #[test]
    fn test_month_numbers() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::June.number(), 6);
    }

    #[test]
    fn test_display() {
        let filter = TripFilter::new(Some(Month::May), Some(Day::Sunday));
        assert_eq!(filter.to_string(), "month=may, day=sunday");
        assert_eq!(TripFilter::default().to_string(), "month=all, day=all");
    }
}
