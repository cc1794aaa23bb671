//! Run configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `VAKIT_*` environment variables (a `.env` file is honoured by the binary),
//! then command-line flags. [`Config::validate`] runs once all layers are in.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cities::{self, City};
use crate::error::{Error, Result};
use crate::source::SourceKind;

pub const ENV_SOURCE: &str = "VAKIT_SOURCE";
pub const ENV_OUTPUT_DIR: &str = "VAKIT_OUTPUT_DIR";
pub const ENV_TIMEOUT_SECS: &str = "VAKIT_TIMEOUT_SECS";
pub const ENV_CITIES: &str = "VAKIT_CITIES";
pub const ENV_BASE_URL: &str = "VAKIT_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source: SourceKind,
    pub output_dir: PathBuf,
    /// Appended to the city slug, e.g. `.txt`; may be empty.
    pub extension: String,
    pub timeout_secs: u64,
    /// Slugs to generate; empty means every province.
    pub cities: Vec<String>,
    /// Replaces the public endpoint of the HTTP sources.
    pub base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            output_dir: PathBuf::from("."),
            extension: ".txt".to_string(),
            timeout_secs: 10,
            cities: Vec::new(),
            base_url: None,
        }
    }
}

impl Config {
    /// Defaults, overlaid with `path` when given, then with the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(ENV_SOURCE) {
            self.source = source.parse()?;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs.trim().parse().map_err(|_| {
                Error::Config(format!("{ENV_TIMEOUT_SECS} must be a number, got '{secs}'"))
            })?;
        }
        if let Some(list) = lookup(ENV_CITIES) {
            self.cities = list
                .split(',')
                .map(str::trim)
                .filter(|slug| !slug.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = Some(url);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than zero".into()));
        }
        if self.extension.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "extension '{}' must not contain a path separator",
                self.extension
            )));
        }
        self.selected_cities().map(|_| ())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn selected_cities(&self) -> Result<Vec<&'static City>> {
        if self.cities.is_empty() {
            Ok(cities::all().iter().collect())
        } else {
            cities::select(&self.cities)
        }
    }
}
