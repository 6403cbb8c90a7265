//! User settings.
//!
//! Settings come from an optional TOML file and are overridden by command
//! line flags:
//!
//! ```toml
//! locale = "es-ES"
//! currency = "EUR"
//! log_level = "debug"
//! ```
//!
//! Missing keys keep their defaults (`en`, `USD`, `info`).

use std::path::Path;

use finance_core::{Formatter, Locale};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub locale: Locale,
    /// ISO 4217 code used when formatting amounts.
    pub currency: String,
    /// Bare level or full `EnvFilter` directive; `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Applies command line flags on top of file values.
    pub fn with_overrides(
        mut self,
        locale: Option<Locale>,
        currency: Option<String>,
    ) -> Self {
        if let Some(locale) = locale {
            self.locale = locale;
        }
        if let Some(currency) = currency {
            self.currency = currency;
        }
        self
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.locale, self.currency.as_str())
    }
}
