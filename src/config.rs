use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BikeshareError;

/// One city and the CSV file holding its trips, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySource {
    pub name: String,
    pub file: String,
}

/// Maps city names to their trip files.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "data_dir": "data",
///   "cities": [
///     { "name": "chicago", "file": "chicago.csv" },
///     { "name": "washington", "file": "washington.csv" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    pub cities: Vec<CitySource>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Names accepted in place of a configured city name.
static ALIASES: &[(&str, &str)] = &[("new york", "new york city"), ("nyc", "new york city")];

impl Default for CityConfig {
    fn default() -> Self {
        let city = |name: &str, file: &str| CitySource {
            name: name.to_string(),
            file: file.to_string(),
        };

        Self {
            data_dir: default_data_dir(),
            cities: vec![
                city("chicago", "chicago.csv"),
                city("new york city", "new_york_city.csv"),
                city("washington", "washington.csv"),
            ],
        }
    }
}

impl CityConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, BikeshareError> {
        let config_error = |reason: String| BikeshareError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config: CityConfig =
            serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))?;

        if config.cities.is_empty() {
            return Err(config_error("no cities configured".to_string()));
        }

        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Finds a city by name, ignoring case and surrounding whitespace.
    pub fn resolve(&self, name: &str) -> Result<&CitySource, BikeshareError> {
        let wanted = name.trim().to_lowercase();
        let wanted = ALIASES
            .iter()
            .find(|(alias, _)| *alias == wanted)
            .map(|(_, canonical)| canonical.to_string())
            .unwrap_or(wanted);

        self.cities
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
            .ok_or_else(|| BikeshareError::UnknownCity(name.trim().to_string()))
    }

    /// Full path of the trip file for `city`.
    pub fn path_for(&self, city: &CitySource) -> PathBuf {
        self.data_dir.join(&city.file)
    }

    /// Lowercase city names in configured order.
    pub fn city_names(&self) -> Vec<String> {
        self.cities.iter().map(|c| c.name.to_lowercase()).collect()
    }
}
