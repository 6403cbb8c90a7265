use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::{Locale, MessageKey, Translator};
use crate::calculations::common::round_half_up_dp;

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const RUSSIAN_MONTHS: [&str; 12] = [
    "январь",
    "февраль",
    "март",
    "апрель",
    "май",
    "июнь",
    "июль",
    "август",
    "сентябрь",
    "октябрь",
    "ноябрь",
    "декабрь",
];

/// Locale-aware presentation of amounts, percentages and dates.
///
/// A formatter carries the display currency alongside the locale, since the
/// two are always chosen together in settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    translator: Translator,
    currency: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Locale::En, "USD")
    }
}

impl Formatter {
    pub fn new(
        locale: Locale,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            translator: Translator::new(locale),
            currency: currency.into().trim().to_ascii_uppercase(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.translator.locale()
    }

    /// ISO 4217 code of the display currency, uppercased.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn translator(&self) -> Translator {
        self.translator
    }

    pub fn translate(
        &self,
        key: MessageKey,
    ) -> &'static str {
        self.translator.translate(key)
    }

    fn separators(&self) -> (&'static str, char) {
        match self.locale() {
            Locale::En => (",", '.'),
            Locale::Es => (".", ','),
            Locale::Ru => ("\u{202f}", ','),
        }
    }

    /// Formats `value` with exactly `dp` fractional digits (half-up) and
    /// locale-specific grouping and decimal separators.
    pub fn format_number(
        &self,
        value: Decimal,
        dp: u32,
    ) -> String {
        let mut rounded = round_half_up_dp(value, dp);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        rounded = rounded.abs();
        rounded.rescale(dp);

        let text = rounded.to_string();
        let (integer, fraction) = match text.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (text.as_str(), None),
        };

        let (group_separator, decimal_separator) = self.separators();
        let mut out = String::with_capacity(text.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(&group_digits(integer, group_separator));
        if let Some(fraction) = fraction {
            out.push(decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// Formats an amount in the configured currency with two decimals.
    pub fn format_currency(
        &self,
        value: Decimal,
    ) -> String {
        self.format_currency_in(value, &self.currency)
    }

    /// Formats an amount in an explicit currency.
    ///
    /// English puts the symbol first (`$1,234.50`); Spanish and Russian put
    /// it after the number (`1.234,50 €`). Unknown codes are shown verbatim.
    pub fn format_currency_in(
        &self,
        value: Decimal,
        currency_code: &str,
    ) -> String {
        let code = currency_code.trim().to_ascii_uppercase();
        let number = self.format_number(value.abs(), 2);
        let sign = if round_half_up_dp(value, 2) < Decimal::ZERO {
            "-"
        } else {
            ""
        };

        match (self.locale(), currency_symbol(&code)) {
            (Locale::En, Some(symbol)) => format!("{sign}{symbol}{number}"),
            (Locale::En, None) => format!("{sign}{code} {number}"),
            (_, Some(symbol)) => format!("{sign}{number} {symbol}"),
            (_, None) => format!("{sign}{number} {code}"),
        }
    }

    pub fn format_date(
        &self,
        date: NaiveDate,
    ) -> String {
        let pattern = match self.locale() {
            Locale::En => "%m/%d/%Y",
            Locale::Es => "%d/%m/%Y",
            Locale::Ru => "%d.%m.%Y",
        };
        date.format(pattern).to_string()
    }

    /// Month heading for period pickers, e.g. `March 2025` or `marzo de 2025`.
    pub fn format_month(
        &self,
        date: NaiveDate,
    ) -> String {
        let index = date.month0() as usize;
        match self.locale() {
            Locale::En => format!("{} {}", ENGLISH_MONTHS[index], date.year()),
            Locale::Es => format!("{} de {}", SPANISH_MONTHS[index], date.year()),
            Locale::Ru => format!("{} {}", RUSSIAN_MONTHS[index], date.year()),
        }
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "RUB" => Some("₽"),
        "GBP" => Some("£"),
        _ => None,
    }
}

/// Inserts `separator` between groups of three digits, counting from the right.
fn group_digits(
    digits: &str,
    separator: &str,
) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + (len / 3) * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // =========================================================================
    // format_number tests
    // =========================================================================

    #[test]
    fn format_number_groups_thousands_in_english() {
        let formatter = Formatter::new(Locale::En, "USD");

        assert_eq!(formatter.format_number(dec!(1234567.891), 2), "1,234,567.89");
    }

    #[test]
    fn format_number_swaps_separators_in_spanish() {
        let formatter = Formatter::new(Locale::Es, "EUR");

        assert_eq!(formatter.format_number(dec!(1234567.891), 2), "1.234.567,89");
    }

    #[test]
    fn format_number_uses_narrow_space_in_russian() {
        let formatter = Formatter::new(Locale::Ru, "RUB");

        assert_eq!(formatter.format_number(dec!(1234.5), 2), "1\u{202f}234,50");
    }

    #[test]
    fn format_number_pads_to_requested_places() {
        let formatter = Formatter::default();

        assert_eq!(formatter.format_number(dec!(7), 2), "7.00");
        assert_eq!(formatter.format_number(dec!(999.5), 0), "1,000");
    }

    #[test]
    fn format_number_keeps_sign_of_negative_values() {
        let formatter = Formatter::default();

        assert_eq!(formatter.format_number(dec!(-1500.25), 2), "-1,500.25");
    }

    #[test]
    fn format_number_does_not_print_negative_zero() {
        let formatter = Formatter::default();

        assert_eq!(formatter.format_number(dec!(-0.001), 2), "0.00");
    }

    #[test]
    fn format_number_leaves_short_integers_ungrouped() {
        let formatter = Formatter::default();

        assert_eq!(formatter.format_number(dec!(999), 0), "999");
        assert_eq!(formatter.format_number(dec!(0.5), 1), "0.5");
    }

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_prefixes_symbol_in_english() {
        let formatter = Formatter::new(Locale::En, "usd");

        assert_eq!(formatter.currency(), "USD");
        assert_eq!(formatter.format_currency(dec!(1234.5)), "$1,234.50");
    }

    #[test]
    fn format_currency_suffixes_symbol_in_spanish_and_russian() {
        let es = Formatter::new(Locale::Es, "EUR");
        let ru = Formatter::new(Locale::Ru, "RUB");

        assert_eq!(es.format_currency(dec!(1234.5)), "1.234,50 €");
        assert_eq!(ru.format_currency(dec!(1234.5)), "1\u{202f}234,50 ₽");
    }

    #[test]
    fn format_currency_puts_sign_before_symbol() {
        let formatter = Formatter::new(Locale::En, "GBP");

        assert_eq!(formatter.format_currency(dec!(-42)), "-£42.00");
    }

    #[test]
    fn format_currency_falls_back_to_code_for_unknown_currency() {
        let en = Formatter::new(Locale::En, "CHF");
        let es = Formatter::new(Locale::Es, "CHF");

        assert_eq!(en.format_currency(dec!(10)), "CHF 10.00");
        assert_eq!(es.format_currency(dec!(10)), "10,00 CHF");
    }

    #[test]
    fn format_currency_in_overrides_configured_currency() {
        let formatter = Formatter::new(Locale::En, "USD");

        assert_eq!(formatter.format_currency_in(dec!(3), "eur"), "€3.00");
    }

    // =========================================================================
    // date tests
    // =========================================================================

    #[test]
    fn format_date_per_locale() {
        let d = date(2025, 3, 7);

        assert_eq!(Formatter::new(Locale::En, "USD").format_date(d), "03/07/2025");
        assert_eq!(Formatter::new(Locale::Es, "EUR").format_date(d), "07/03/2025");
        assert_eq!(Formatter::new(Locale::Ru, "RUB").format_date(d), "07.03.2025");
    }

    #[test]
    fn format_month_per_locale() {
        let d = date(2025, 3, 7);

        assert_eq!(Formatter::new(Locale::En, "USD").format_month(d), "March 2025");
        assert_eq!(Formatter::new(Locale::Es, "EUR").format_month(d), "marzo de 2025");
        assert_eq!(Formatter::new(Locale::Ru, "RUB").format_month(d), "март 2025");
    }

    #[test]
    fn group_digits_handles_exact_multiples_of_three() {
        assert_eq!(group_digits("123456", ","), "123,456");
        assert_eq!(group_digits("12", ","), "12");
        assert_eq!(group_digits("", ","), "");
    }
}
