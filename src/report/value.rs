use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The literal placeholder used for absent data throughout the format.
pub const PLACEHOLDER: &str = "N/A";

/// A classified table cell. Classification is derived from the raw cell
/// text; tables always keep the raw text so rendering stays lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// The literal `N/A` marker. A valid, expected data state.
    Placeholder,
    /// A clean numeric value, sign already applied.
    Number(f64),
    /// Free-form narrative text.
    Text(String),
}

impl Cell {
    pub fn classify(raw: &str) -> Cell {
        let s = raw.trim();
        if s.is_empty() || s == PLACEHOLDER {
            return Cell::Placeholder;
        }
        match parse_number(s) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(s.to_string()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Cell::Placeholder)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Parse a formatted financial number: thousands separators, an optional
/// leading currency symbol, and parentheses for negatives. Returns None
/// for anything that is not purely numeric.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let negative = s.starts_with('(') && s.ends_with(')');
    let core = if negative { s[1..s.len() - 1].trim() } else { s };
    let core = core
        .trim_start_matches(['$', '£', '€', '¥', '₹', '₩'])
        .trim();
    let cleaned = core.replace(',', "");

    let num: f64 = cleaned.parse().ok()?;
    Some(if negative { -num } else { num })
}

/// Format a number the way the report corpus does: thousands separators,
/// at most two decimal places with trailing zeros trimmed, negatives in
/// parentheses.
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    let formatted = format!("{:.2}", magnitude);
    let mut parts = formatted.splitn(2, '.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let mut grouped = String::new();
    let chars: Vec<char> = int_part.chars().collect();
    for (i, c) in chars.iter().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, *c);
    }

    let dec_trimmed = dec_part.trim_end_matches('0');
    let body = if dec_trimmed.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, dec_trimmed)
    };

    if value < 0.0 {
        format!("({})", body)
    } else {
        body
    }
}

/// ISO-style currency codes seen in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Gbp,
    Eur,
    Jpy,
    Cny,
    Sgd,
    Hkd,
    Idr,
    Aud,
    Cad,
    Chf,
    Inr,
    Krw,
    Other(String),
}

impl Currency {
    pub fn code(&self) -> &str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
            Currency::Sgd => "SGD",
            Currency::Hkd => "HKD",
            Currency::Idr => "IDR",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Inr => "INR",
            Currency::Krw => "KRW",
            Currency::Other(s) => s,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Currency::Usd | Currency::Cad => "$",
            Currency::Gbp => "£",
            Currency::Eur => "€",
            Currency::Jpy | Currency::Cny => "¥",
            Currency::Sgd => "S$",
            Currency::Hkd => "HK$",
            Currency::Idr => "Rp",
            Currency::Aud => "A$",
            Currency::Chf => "CHF",
            Currency::Inr => "₹",
            Currency::Krw => "₩",
            Currency::Other(_) => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "USD" => Currency::Usd,
            "GBP" => Currency::Gbp,
            "EUR" => Currency::Eur,
            "JPY" => Currency::Jpy,
            "CNY" | "RMB" => Currency::Cny,
            "SGD" => Currency::Sgd,
            "HKD" => Currency::Hkd,
            "IDR" => Currency::Idr,
            "AUD" => Currency::Aud,
            "CAD" => Currency::Cad,
            "CHF" => Currency::Chf,
            "INR" => Currency::Inr,
            "KRW" => Currency::Krw,
            other => Currency::Other(other.to_string()),
        })
    }
}

/// The scale column attached to financial statement rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multiplier {
    Units,
    Thousands,
    Millions,
    Billions,
    Other(String),
}

impl Multiplier {
    pub fn factor(&self) -> Option<f64> {
        match self {
            Multiplier::Units => Some(1.0),
            Multiplier::Thousands => Some(1_000.0),
            Multiplier::Millions => Some(1_000_000.0),
            Multiplier::Billions => Some(1_000_000_000.0),
            Multiplier::Other(_) => None,
        }
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplier::Units => write!(f, "Units"),
            Multiplier::Thousands => write!(f, "Thousands"),
            Multiplier::Millions => write!(f, "Millions"),
            Multiplier::Billions => write!(f, "Billions"),
            Multiplier::Other(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for Multiplier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "units" => Multiplier::Units,
            "thousands" => Multiplier::Thousands,
            "millions" => Multiplier::Millions,
            "billions" => Multiplier::Billions,
            other => Multiplier::Other(other.to_string()),
        })
    }
}
