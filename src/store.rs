//! Loads a city's trip file into memory.

use std::fs::File;
use std::path::Path;
use tracing::info;

use crate::config::SourceConfig;
use crate::error::LoadError;
use crate::model::TripTable;
use crate::parser::parse_trips;
use crate::source::City;

/// Reads and parses the CSV backing `city`.
///
/// Every call reads the file afresh and returns an independent table.
#[tracing::instrument(skip(config), fields(city = %city))]
pub fn load(city: City, config: &SourceConfig) -> Result<TripTable, LoadError> {
    let path = config.path_for(city);
    let table = load_path(&path)?;
    info!(
        rows = table.len(),
        gender = table.schema().gender,
        birth_year = table.schema().birth_year,
        "Trip data loaded"
    );
    Ok(table)
}

/// Loads a trip file from an explicit path.
pub fn load_path(path: &Path) -> Result<TripTable, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::Csv {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    parse_trips(file, path)
}
