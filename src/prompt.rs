//! Question/answer loops for the interactive session.
//!
//! Every question is repeated until one of its listed answers is typed.
//! Answers are matched case-insensitively with surrounding whitespace ignored.

use std::io::{BufRead, Write};
use tracing::debug;

use crate::error::PromptError;
use crate::filter::{Day, Month};
use crate::source::City;

pub const RETRY_MESSAGE: &str =
    "Sorry, please select an available option and be sure to type it exactly as it appears.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    RawData,
    StatisticalData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Continue,
    Exit,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn read_answer(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{question} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::InputClosed);
        }
        Ok(line.trim().to_lowercase())
    }

    /// Asks `question` until `parse` accepts the answer.
    pub fn ask<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, PromptError> {
        loop {
            let answer = self.read_answer(question)?;
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            debug!(answer = %answer, "Rejected prompt answer");
            self.say(RETRY_MESSAGE)?;
        }
    }

    pub fn ask_mode(&mut self) -> Result<Mode, PromptError> {
        self.ask(
            "Would you like to view individual trip data (5 rows at a time) or statistical data? Select: (raw data, statistical data)",
            |a| match a {
                "raw data" => Some(Mode::RawData),
                "statistical data" => Some(Mode::StatisticalData),
                _ => None,
            },
        )
    }

    pub fn ask_city(&mut self) -> Result<City, PromptError> {
        self.ask(
            "Please select a city and type exactly as it appears: (chicago, new york city, washington)",
            |a| City::ALL.into_iter().find(|c| c.name() == a),
        )
    }

    /// `None` means no month filter.
    pub fn ask_month(&mut self) -> Result<Option<Month>, PromptError> {
        self.ask(
            "Please select a month on which to filter (or select 'all' to apply no month filter): (january, february, ... , june)",
            |a| match a {
                "all" => Some(None),
                other => other.parse::<Month>().ok().map(Some),
            },
        )
    }

    /// `None` means no day filter.
    pub fn ask_day(&mut self) -> Result<Option<Day>, PromptError> {
        self.ask(
            "Please select a day on which to filter (or select 'all' to apply no day filter): (monday, tuesday, ... , sunday)",
            |a| match a {
                "all" => Some(None),
                other => other.parse::<Day>().ok().map(Some),
            },
        )
    }

    pub fn ask_page_action(&mut self) -> Result<PageAction, PromptError> {
        self.ask(
            "Do you want to see 5 more rows of data? Select: (continue, exit)",
            |a| match a {
                "continue" => Some(PageAction::Continue),
                "exit" => Some(PageAction::Exit),
                _ => None,
            },
        )
    }

    /// Only `yes` restarts; any other answer ends the session.
    pub fn ask_restart(&mut self) -> Result<bool, PromptError> {
        let answer = self.read_answer("\nWould you like to restart? Enter yes or no.\n")?;
        Ok(answer == "yes")
    }
}
