//! Number parsing and display formatting for the flow table.

use chrono::NaiveDate;

use crate::error::FlowError;
use crate::trade::OptionsFlow;

/// Premiums at or above this are highlighted and starred.
pub const LARGE_PREMIUM: f64 = 500_000.0;

const STAR: &str = "★";

const EXPIRATION_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y"];

/// Parse a user-typed number such as `"25k"`, `"10B"` or `"1,234.5"`.
///
/// Commas and whitespace are stripped; a trailing `K`/`M`/`B`
/// (case-insensitive) multiplies by 1e3/1e6/1e9. Empty input and
/// anything that is not a finite number is rejected.
pub fn parse_formatted_number(value: &str) -> Result<f64, FlowError> {
    let clean: String = value
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    let (digits, multiplier) = match clean.chars().last() {
        Some('K') => (&clean[..clean.len() - 1], 1e3),
        Some('M') => (&clean[..clean.len() - 1], 1e6),
        Some('B') => (&clean[..clean.len() - 1], 1e9),
        _ => (clean.as_str(), 1.0),
    };

    let parsed = digits
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FlowError::InvalidNumber(value.to_string()))?;

    Ok(parsed * multiplier)
}

pub fn is_large_premium(value: f64) -> bool {
    value >= LARGE_PREMIUM
}

/// `1_500_000.0` → `"1.50M ★"`, `600_000.0` → `"600.00k ★"`, `2_500.0` → `"2.50k"`.
pub fn format_premium(value: f64) -> String {
    if !value.is_finite() {
        "N/A".to_string()
    } else if value >= 1_000_000.0 {
        format!("{:.2}M {}", value / 1_000_000.0, STAR)
    } else if value >= LARGE_PREMIUM {
        format!("{:.2}k {}", value / 1_000.0, STAR)
    } else if value >= 1_000.0 {
        format!("{:.2}k", value / 1_000.0)
    } else {
        format!("{:.2}", value)
    }
}

/// Whole strikes print without decimals, others with two.
pub fn format_strike(strike: f64) -> String {
    if !strike.is_finite() {
        "N/A".to_string()
    } else if strike.fract() == 0.0 {
        format!("{:.0}", strike)
    } else {
        format!("{:.2}", strike)
    }
}

pub fn format_price(price: f64) -> String {
    if price.is_finite() {
        price.to_string()
    } else {
        "N/A".to_string()
    }
}

pub fn parse_expiration(expiration: &str) -> Result<NaiveDate, FlowError> {
    let trimmed = expiration.trim();
    // Timestamps like "2024-05-17T00:00:00Z" carry the date up front.
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    EXPIRATION_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .ok_or_else(|| FlowError::InvalidDate(expiration.to_string()))
}

/// Calendar days from `today` until expiration (negative once expired).
pub fn days_to_expiration(expiration: &str, today: NaiveDate) -> Option<i64> {
    parse_expiration(expiration)
        .ok()
        .map(|date| (date - today).num_days())
}

pub fn format_dte(expiration: &str, today: NaiveDate) -> String {
    match days_to_expiration(expiration, today) {
        Some(days) => format!("{}d", days),
        None => "N/A".to_string(),
    }
}

/// Compact-view contract label: `"2024-05-17 TSLA 180 C"`.
pub fn format_contract(record: &OptionsFlow) -> String {
    format!(
        "{} {} {} {}",
        record.expiration,
        record.ticker,
        format_strike(record.strike),
        record.callput.as_char()
    )
}

/// Render a stored filter bound back into an editable string.
pub fn format_bound(bound: Option<f64>) -> String {
    match bound {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
