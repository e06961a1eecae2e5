//! Error types for loading, summarising and prompting.

use std::path::PathBuf;
use thiserror::Error;

/// A timestamp cell that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("row {row}: cannot parse '{column}' value '{value}' as a date-time")]
pub struct ParseError {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub column: &'static str,
    pub value: String,
}

/// Failures while turning a data source into a [`crate::model::TripTable`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read trip data from '{}'", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("'{}' has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("row {row}: '{column}' value '{value}' is not a finite number")]
    NonFinite {
        row: usize,
        column: &'static str,
        value: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("no trips match the selected filters ({filter}); no statistics available")]
    EmptyView { filter: String },
}

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("input closed before a valid answer was given")]
    InputClosed,

    #[error("prompt I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems with the data source configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read sources file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sources file '{}' is not a JSON object of city paths", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("sources file '{}' names unknown city '{city}'", path.display())]
    UnknownCity { path: PathBuf, city: String },
}
