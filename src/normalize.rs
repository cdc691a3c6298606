//! Text-to-number normalization
//!
//! Scraped cells arrive as noisy text ("-12,5%", " 0.60 ", "45"). Conversion
//! is two-stage: [`normalize`] cleans the text, [`parse_decimal`] turns it into
//! a number. Failure at either stage is `None`, never an error.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Cleaned cell text ready for numeric parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Text with symbols stripped and decimal separator unified
    pub text: String,
    /// Whether a trailing percent sign was removed
    pub percent: bool,
}

/// Strip a trailing `%`, unify `,` to `.`, trim
pub fn normalize(raw: &str) -> Normalized {
    let trimmed = raw.trim();
    let (body, percent) = match trimmed.strip_suffix('%') {
        Some(body) => (body, true),
        None => (trimmed, false),
    };
    Normalized {
        text: body.replace(',', ".").trim().to_string(),
        percent,
    }
}

/// Parse plain or scientific decimal text
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let text = match text.strip_prefix('+') {
        Some(rest) if rest.starts_with(['+', '-']) => return None,
        Some(rest) => rest,
        None => text,
    };
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Normalize and parse a drop value as a fraction.
///
/// Percent-suffixed values are divided by 100 (`"60%"` is 0.60); bare values
/// are taken as fractions already.
pub fn parse_fraction(raw: &str) -> Option<Decimal> {
    let normalized = normalize(raw);
    let value = parse_decimal(&normalized.text)?;
    if normalized.percent {
        value.checked_div(Decimal::ONE_HUNDRED)
    } else {
        Some(value)
    }
}
