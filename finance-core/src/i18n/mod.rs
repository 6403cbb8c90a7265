//! Localization: supported locales, the compiled-in message catalog and
//! locale-aware number, currency and date formatting.

mod format;
mod messages;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use format::Formatter;
pub use messages::{MessageKey, Translator};

/// Error returned when a language tag does not name a supported locale.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported locale '{0}' (expected one of: en, es, ru)")]
pub struct LocaleParseError(pub String);

/// A locale the application ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Ru,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Es, Locale::Ru];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Ru => "ru",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    /// Accepts a bare language (`ru`) or a full tag (`en-US`, `es_ES`).
    /// Only the primary subtag is significant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            "ru" => Ok(Self::Ru),
            _ => Err(LocaleParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
