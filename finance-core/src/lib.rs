pub mod calculations;
pub mod i18n;
pub mod models;

pub use i18n::{Formatter, Locale, LocaleParseError, MessageKey, Translator};
pub use models::*;
