//! Dashboard settings

pub mod blank;

use std::fs;
use std::io;
use std::path::Path;

use inv_analytics::{AlertToggles, AnalyticsPolicy, PolicyError};
use inv_core::Store;
use inv_query::{QueryOptions, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub use blank::BlankValues;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] PolicyError),
}

/// User-editable settings, persisted as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub store: Store,
    pub policy: AnalyticsPolicy,
    /// Rows per page in list views; 0 shows everything
    pub page_size: usize,
    pub alerts: AlertToggles,
    pub blank_values: BlankValues,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: Store::default(),
            policy: AnalyticsPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            alerts: AlertToggles::default(),
            blank_values: BlankValues::default(),
        }
    }
}

impl Settings {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let settings: Settings = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;
        Ok(())
    }

    /// Starting options for a list view
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions::default().with_page_size(self.page_size)
    }
}
