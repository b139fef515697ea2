use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> String {
        symbol_for(self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Separators used when rendering numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

impl LocaleConfig {
    /// Resolves separators for the handful of language tags we know about.
    pub fn for_tag(tag: &str) -> Self {
        let (decimal_separator, grouping_separator) = match tag {
            "de-DE" | "es-ES" | "it-IT" | "pt-BR" => (',', '.'),
            "fr-FR" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            language_tag: tag.into(),
            decimal_separator,
            grouping_separator,
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "MYR" => "RM".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

/// Rounds half away from zero to the requested number of decimals.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (body.as_str(), None),
    };
    let mut rendered = group_digits(int_part, locale.grouping_separator);
    if let Some(frac) = frac_part {
        rendered.push(locale.decimal_separator);
        rendered.push_str(frac);
    }
    if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        rendered.insert(0, '-');
    }
    rendered
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders an amount with its currency symbol. Whole amounts drop the minor
/// units (`$12,500`), fractional ones keep two decimals (`$245.50`).
pub fn format_amount(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let rounded = round_to(amount, 2);
    let precision = if rounded.fract() == 0.0 { 0 } else { 2 };
    let body = format_number(locale, rounded.abs(), precision);
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, code.symbol(), body)
}

/// Renders a percentage; `signed` prefixes non-negative values with `+`.
pub fn format_percent(value: f64, decimals: usize, signed: bool) -> String {
    let body = format!("{:.*}%", decimals, value);
    if signed && value >= 0.0 {
        format!("+{}", body)
    } else {
        body
    }
}
