//! Interactive flows: paging through raw trips and printing statistics.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::info;

use crate::browser::RawBrowser;
use crate::config::SourceConfig;
use crate::error::StatsError;
use crate::filter::TripFilter;
use crate::model::TripTable;
use crate::output::{render_page, render_report};
use crate::prompt::{Mode, PageAction, Prompter};
use crate::source::City;
use crate::stats::{TripStats, summarize};
use crate::store::load;

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const END_OF_DATA: &str =
    "You have reached the end of the available data. The following are the final available rows of data.";

fn rule() -> String {
    "-".repeat(40)
}

/// Shows `table` one page at a time, asking before each further page.
///
/// Returns the number of pages shown.
pub fn browse<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, table: &TripTable) -> Result<usize> {
    let mut browser = RawBrowser::new(table);
    let mut shown = 0;

    while let Some(page) = browser.advance() {
        shown += 1;
        if browser.is_exhausted() {
            prompter.say(END_OF_DATA)?;
            prompter.say(&render_page(page))?;
            break;
        }

        prompter.say(&render_page(page))?;
        if prompter.ask_page_action()? == PageAction::Exit {
            break;
        }
    }

    info!(pages = shown, exhausted = browser.is_exhausted(), "Browse session ended");
    Ok(shown)
}

/// Writes the report for `city` / `filter`, or the reason none exists.
pub fn report<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    table: &TripTable,
    city: City,
    filter: TripFilter,
) -> Result<Option<TripStats>> {
    match summarize(table, city, filter) {
        Ok(stats) => {
            prompter.say(&render_report(&stats))?;
            Ok(Some(stats))
        }
        Err(e @ StatsError::EmptyView { .. }) => {
            prompter.say(&e.to_string())?;
            Ok(None)
        }
    }
}

/// Runs the question-driven session until the user declines to restart.
pub fn run_interactive<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &SourceConfig,
) -> Result<()> {
    loop {
        prompter.say(GREETING)?;
        let mode = prompter.ask_mode()?;
        prompter.say(&rule())?;

        match mode {
            Mode::RawData => {
                let city = prompter.ask_city()?;
                let table = load(city, config)?;
                browse(prompter, &table)?;
            }
            Mode::StatisticalData => {
                let city = prompter.ask_city()?;
                let month = prompter.ask_month()?;
                let day = prompter.ask_day()?;
                prompter.say(&rule())?;

                let table = load(city, config)?;
                report(prompter, &table, city, TripFilter::new(month, day))?;
            }
        }

        if !prompter.ask_restart()? {
            return Ok(());
        }
    }
}
