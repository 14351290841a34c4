use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::Level;

use crate::tonetranspose::pianokeys::{Direction, SortKeys, SummaryOptions};
use crate::tonetranspose::tone::NoteNameType;

/// Display and sorting defaults, read from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: NoteNameType,
    pub sort_by: SortKeys,
    pub direction: Direction,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            display: NoteNameType::default(),
            sort_by: SortKeys::default(),
            direction: Direction::default(),
            log_level: String::from("info"),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse JSON configuration")
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions::new(self.display, self.sort_by, self.direction)
    }

    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow!("Unknown log level: {}", self.log_level))
    }
}
