//! Filter form (what the user typed) and its translation into a
//! [`FilterModel`].

use tracing::warn;

use crate::callput::CallPutSelection;
use crate::error::FlowError;
use crate::filter::{FieldFilter, FilterModel};
use crate::format::parse_formatted_number;

/// One of the six numeric bounds of the filter form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Bound {
    PremiumMin,
    PremiumMax,
    PriceMin,
    PriceMax,
    SizeMin,
    SizeMax,
}

impl Bound {
    pub const ALL: [Bound; 6] = [
        Bound::PremiumMin,
        Bound::PremiumMax,
        Bound::PriceMin,
        Bound::PriceMax,
        Bound::SizeMin,
        Bound::SizeMax,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Bound::PremiumMin => "Premium min",
            Bound::PremiumMax => "Premium max",
            Bound::PriceMin => "Price min",
            Bound::PriceMax => "Price max",
            Bound::SizeMin => "Size min",
            Bound::SizeMax => "Size max",
        }
    }

    /// Example input shown in an empty field.
    pub fn placeholder(self) -> &'static str {
        match self {
            Bound::PremiumMin => "25k",
            Bound::PremiumMax => "10B",
            Bound::PriceMin => "0.01",
            Bound::PriceMax => "1000",
            Bound::SizeMin => "1",
            Bound::SizeMax => "100000",
        }
    }

    fn index(self) -> usize {
        match self {
            Bound::PremiumMin => 0,
            Bound::PremiumMax => 1,
            Bound::PriceMin => 2,
            Bound::PriceMax => 3,
            Bound::SizeMin => 4,
            Bound::SizeMax => 5,
        }
    }
}

/// State of the advanced filter dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterForm {
    pub ticker: String,
    pub call_put: CallPutSelection,
    bounds: [Option<f64>; 6],
}

impl FilterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form produced by typing in the ticker box: every other field is reset.
    pub fn ticker_only(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            ..Self::default()
        }
    }

    pub fn bound(&self, bound: Bound) -> Option<f64> {
        self.bounds[bound.index()]
    }

    pub fn with_bound(mut self, bound: Bound, value: Option<f64>) -> Self {
        self.bounds[bound.index()] = value;
        self
    }

    /// Update one bound from user text.
    ///
    /// Blank text clears the bound. Text that does not parse leaves the
    /// previous value in place and returns the error.
    pub fn set_bound(&mut self, bound: Bound, text: &str) -> Result<(), FlowError> {
        if text.trim().is_empty() {
            self.bounds[bound.index()] = None;
            return Ok(());
        }

        match parse_formatted_number(text) {
            Ok(value) => {
                self.bounds[bound.index()] = Some(value);
                Ok(())
            }
            Err(err) => {
                warn!(field = bound.label(), input = text, "rejected filter bound: {}", err);
                Err(err)
            }
        }
    }
}

/// Build the normalized filter model for a form.
///
/// - a non-empty ticker becomes an exact match on the upper-cased ticker;
/// - `All` call/put emits nothing, `Call`/`Put` an exact match;
/// - each numeric field gets a `greaterThan` for its min and a `lessThan`
///   for its max; a field with neither bound is left unset.
pub fn translate(form: &FilterForm) -> FilterModel {
    FilterModel {
        ticker: if form.ticker.is_empty() {
            FieldFilter::Unset
        } else {
            FieldFilter::Exact(form.ticker.to_uppercase())
        },
        totalpremium: FieldFilter::range(
            form.bound(Bound::PremiumMin),
            form.bound(Bound::PremiumMax),
        ),
        price: FieldFilter::range(form.bound(Bound::PriceMin), form.bound(Bound::PriceMax)),
        size: FieldFilter::range(form.bound(Bound::SizeMin), form.bound(Bound::SizeMax)),
        callput: match form.call_put.constraint() {
            Some(cp) => FieldFilter::Exact(cp),
            None => FieldFilter::Unset,
        },
    }
}
