//! Admission predicate for records arriving on the live stream.

use crate::filter::{FieldFilter, FilterModel};
use crate::trade::OptionsFlow;

/// Decide whether a streamed record belongs in the live window.
///
/// Checks, in order: ticker text (exact match against the upper-cased
/// text), premium, price and size ranges (boundary values pass), then
/// call/put. Pure: the same inputs always give the same answer.
pub fn admits(record: &OptionsFlow, filters: &FilterModel, ticker_text: &str) -> bool {
    if !ticker_text.is_empty() && record.ticker != ticker_text.to_uppercase() {
        return false;
    }

    if !filters.totalpremium.matches(record.totalpremium) {
        return false;
    }
    if !filters.price.matches(record.price) {
        return false;
    }
    if !filters.size.matches(record.size as f64) {
        return false;
    }

    match &filters.callput {
        FieldFilter::Exact(cp) => record.callput == *cp,
        _ => true,
    }
}
