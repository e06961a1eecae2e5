//! Forward-only paging through a trip table, a few rows at a time.

use tracing::debug;

use crate::model::{TripRecord, TripTable};

/// Rows per page.
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserState {
    /// The next page starts at this row.
    Positioned(usize),
    /// The last row has been shown.
    Exhausted,
}

/// One browsing session over a table.
///
/// Starts at row 0. Each [`advance`](RawBrowser::advance) emits the next page;
/// the page that reaches the end of the table moves the session to
/// [`BrowserState::Exhausted`], after which nothing more is emitted. An empty
/// table therefore yields one empty page.
#[derive(Debug, Clone)]
pub struct RawBrowser<'a> {
    table: &'a TripTable,
    state: BrowserState,
}

impl<'a> RawBrowser<'a> {
    pub fn new(table: &'a TripTable) -> Self {
        Self {
            table,
            state: BrowserState::Positioned(0),
        }
    }

    pub fn state(&self) -> BrowserState {
        self.state
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == BrowserState::Exhausted
    }

    /// Emits the next page, or `None` once exhausted.
    pub fn advance(&mut self) -> Option<&'a [TripRecord]> {
        let BrowserState::Positioned(cursor) = self.state else {
            return None;
        };
        let records = self.table.records();
        let total = records.len();

        let page = if cursor + PAGE_SIZE < total {
            self.state = BrowserState::Positioned(cursor + PAGE_SIZE);
            &records[cursor..cursor + PAGE_SIZE]
        } else {
            self.state = BrowserState::Exhausted;
            &records[cursor.min(total)..]
        };
        debug!(cursor, rows = page.len(), state = ?self.state, "Page emitted");
        Some(page)
    }

    /// Starts the session over from row 0.
    pub fn restart(&mut self) {
        self.state = BrowserState::Positioned(0);
    }
}

impl<'a> Iterator for RawBrowser<'a> {
    type Item = &'a [TripRecord];

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Schema;
    use chrono::NaiveDate;

    fn table(rows: usize) -> TripTable {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let trips = (0..rows)
            .map(|i| TripRecord::new(start, None, i as f64, format!("S{i}"), "E", None, None, None))
            .collect();
        TripTable::new(trips, Schema::default())
    }

    #[test]
    fn test_exact_single_page() {
        let table = table(5);
        let mut browser = RawBrowser::new(&table);

        let page = browser.advance().unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].trip_duration, 0.0);
        assert_eq!(browser.state(), BrowserState::Exhausted);
        assert!(browser.advance().is_none());
    }

    #[test]
    fn test_partial_last_page() {
        let table = table(7);
        let mut browser = RawBrowser::new(&table);

        assert_eq!(browser.advance().unwrap().len(), 5);
        assert_eq!(browser.state(), BrowserState::Positioned(5));

        let last = browser.advance().unwrap();
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].trip_duration, 5.0);
        assert_eq!(last[1].trip_duration, 6.0);
        assert!(browser.is_exhausted());
    }

    #[test]
    fn test_multiple_of_page_size_has_no_empty_trailing_page() {
        let table = table(10);
        let pages: Vec<_> = RawBrowser::new(&table).collect();

        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.len() == 5));
    }

    #[test]
    fn test_pages_cover_table_in_order() {
        for rows in [1, 4, 6, 12, 23] {
            let table = table(rows);
            let pages: Vec<_> = RawBrowser::new(&table).collect();
            assert_eq!(pages.len(), rows.div_ceil(PAGE_SIZE));

            let flattened: Vec<TripRecord> = pages.concat();
            assert_eq!(flattened, table.records());
        }
    }

    #[test]
    fn test_empty_table() {
        let table = table(0);
        let mut browser = RawBrowser::new(&table);

        assert_eq!(browser.advance().map(<[TripRecord]>::len), Some(0));
        assert!(browser.is_exhausted());
        assert!(browser.advance().is_none());
    }

    #[test]
    fn test_restart() {
        let table = table(3);
        let mut browser = RawBrowser::new(&table);
        browser.advance();
        assert!(browser.is_exhausted());

        browser.restart();
        assert_eq!(browser.state(), BrowserState::Positioned(0));
        assert_eq!(browser.advance().unwrap().len(), 3);
    }
}
