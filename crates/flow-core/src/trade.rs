//! Options trade record as delivered by the query endpoint and the stream.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::callput::CallPut;

/// One observed options trade ("options flow" print).
///
/// Records are immutable once received; the dashboard only ever replaces
/// them in its buffer. `totalpremium` is computed upstream and, like
/// `strike` and `price`, is sometimes absent; those read as `NaN` and
/// display as `N/A`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsFlow {
    #[serde(default)]
    pub time: String,
    pub ticker: String,
    pub callput: CallPut,
    /// `NaN` when upstream sent `null` or nothing.
    #[serde(default = "missing", deserialize_with = "number_or_missing")]
    pub strike: f64,
    #[serde(default)]
    pub expiration: String,
    #[serde(default = "missing", deserialize_with = "number_or_missing")]
    pub price: f64,
    #[serde(deserialize_with = "contracts")]
    pub size: u64,
    #[serde(default = "missing", deserialize_with = "number_or_missing")]
    pub totalpremium: f64,
    /// Free-text execution tag: "SWEEP", "SPLIT", "UNUSUAL", ... or empty.
    #[serde(default, deserialize_with = "string_or_null")]
    pub is_sweep: String,
    /// Upstream DTE label. Display always recomputes it from `expiration`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dte: Option<String>,
}

impl OptionsFlow {
    pub fn kind(&self) -> TradeKind {
        TradeKind::classify(&self.is_sweep)
    }
}

/// Classification of the `is_sweep` tag, used for colouring.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TradeKind {
    Sweep,
    Split,
    Unusual,
    Other,
    None,
}

impl TradeKind {
    /// Substring match, checked in the order sweep, split, unusual.
    pub fn classify(tag: &str) -> Self {
        if tag.is_empty() {
            TradeKind::None
        } else if tag.contains("SWEEP") {
            TradeKind::Sweep
        } else if tag.contains("SPLIT") {
            TradeKind::Split
        } else if tag.contains("UNUSUAL") {
            TradeKind::Unusual
        } else {
            TradeKind::Other
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => parse_number(&s).map_err(de::Error::custom),
    }
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| format!("expected a number, got {:?}", s))
}

fn missing() -> f64 {
    f64::NAN
}

fn number_or_missing<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(f64::NAN),
        Some(NumberOrString::Number(n)) => Ok(n),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(f64::NAN),
        Some(NumberOrString::Text(s)) => parse_number(&s).map_err(de::Error::custom),
    }
}

fn contracts<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = number_or_string(deserializer)?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 {
        Ok(n as u64)
    } else {
        Err(de::Error::custom(format!("expected a whole contract count, got {}", n)))
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
