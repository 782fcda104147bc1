//! Scalar formatting: locale-aware numbers, percent/euro suffixes, label prettification.

use crate::models::Cell;
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// Display format of a value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// Locale-formatted plain number.
    #[default]
    #[serde(alias = "none", alias = "")]
    Number,
    Percent,
    Euro,
}

impl ValueFormat {
    /// Suffix appended after the formatted value.
    pub fn suffix(self) -> &'static str {
        match self {
            ValueFormat::Number => "",
            ValueFormat::Percent => "%",
            ValueFormat::Euro => "€",
        }
    }

    pub fn is_percent(self) -> bool {
        self == ValueFormat::Percent
    }
}

/// Default locale tag used when the caller does not pick one.
pub const DEFAULT_LOCALE: &str = "en";

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().replace('-', "_").as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Format a number with locale thousands separators and at most three
/// fraction digits, trailing zeros dropped (`1234.5` -> `1,234.5`).
pub fn format_number(value: f64, locale_tag: &str) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".into() } else { "-∞".into() };
    }
    // Beyond u64 range grouping is meaningless for dashboard figures.
    if value.abs() >= 1.0e19 {
        return value.to_string();
    }

    let (locale, decimal_sep) = map_locale(locale_tag);
    let abs = value.abs();
    let mut int_part = abs.trunc() as u64;
    let mut frac = ((abs - abs.trunc()) * 1000.0).round() as u32;
    if frac >= 1000 {
        int_part += 1;
        frac = 0;
    }

    let mut out = String::new();
    if value < 0.0 && (int_part > 0 || frac > 0) {
        out.push('-');
    }
    out.push_str(&int_part.to_formatted_string(locale));
    if frac > 0 {
        let digits = format!("{frac:03}");
        out.push(decimal_sep);
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Format a cell for display with the default locale.
///
/// `percent` appends `%`, `euro` appends `€`, `number` only applies locale
/// grouping. Text and the sentinel pass through before the suffix.
pub fn format_value(value: &Cell, format: ValueFormat) -> String {
    format_value_locale(value, format, DEFAULT_LOCALE)
}

/// Same as [`format_value`] with an explicit locale tag (e.g. `"de"`).
pub fn format_value_locale(value: &Cell, format: ValueFormat, locale_tag: &str) -> String {
    let body = match value {
        Cell::Number(n) => format_number(*n, locale_tag),
        Cell::NoValue | Cell::Text(_) => value.label(),
    };
    format!("{}{}", body, format.suffix())
}

/// Format a raw number, e.g. an axis tick.
pub fn format_f64(value: f64, format: ValueFormat, locale_tag: &str) -> String {
    format!("{}{}", format_number(value, locale_tag), format.suffix())
}

/// Tooltip line `"<series label>: <formatted value><suffix>"`.
pub fn format_labelled(series_label: &str, formatted_value: &str, format: ValueFormat) -> String {
    format!("{}: {}{}", series_label, formatted_value, format.suffix())
}

/// Turn a snake_case column name into a space separated label.
///
/// Labels whose first character is not lowercase are treated as proper names
/// and returned unchanged. No capitalization is applied.
pub fn convert_snake_to_low_case(label: &str) -> String {
    match label.chars().next() {
        Some(c) if !c.to_uppercase().eq(std::iter::once(c)) => label.split('_').collect::<Vec<_>>().join(" "),
        _ => label.to_string(),
    }
}
