//! Where each city's CSV file lives.

use crate::error::ConfigError;
use crate::source::City;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable naming the directory holding the city CSVs.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

/// Resolves a [`City`] to the path of its backing file.
///
/// By default every city lives at `<data_dir>/<city file name>`. A sources
/// file may override individual cities; it is a flat JSON object:
/// ```json
/// {
///   "chicago": "/srv/bikeshare/chicago-2017.csv",
///   "washington": "dc.csv"
/// }
/// ```
/// Relative override paths are resolved against the data directory.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    data_dir: PathBuf,
    overrides: HashMap<City, PathBuf>,
}

impl SourceConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Uses `explicit` when given, else `BIKESHARE_DATA_DIR`, else the
    /// current directory.
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        let data_dir = explicit
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(data_dir)
    }

    /// Merges per-city overrides from the JSON sources file at `path`.
    pub fn with_sources_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: HashMap<String, PathBuf> =
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        for (name, file) in entries {
            let city = name.parse::<City>().map_err(|_| ConfigError::UnknownCity {
                path: path.to_path_buf(),
                city: name.clone(),
            })?;
            self.overrides.insert(city, file);
        }
        Ok(self)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the CSV path for `city`.
    pub fn path_for(&self, city: City) -> PathBuf {
        match self.overrides.get(&city) {
            Some(file) => self.data_dir.join(file),
            None => self.data_dir.join(city.file_name()),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
