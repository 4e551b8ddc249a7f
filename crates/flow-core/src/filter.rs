//! Normalized filter model shared by the paged query and live admission.
//!
//! A model is rebuilt wholesale from the filter form; it is never patched
//! field by field. An unset field means "no constraint".

/// Constraint on a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter<T> {
    Unset,
    Exact(T),
    Range { lower: Option<T>, upper: Option<T> },
}

impl<T> Default for FieldFilter<T> {
    fn default() -> Self {
        FieldFilter::Unset
    }
}

impl<T> FieldFilter<T> {
    pub fn is_set(&self) -> bool {
        !matches!(self, FieldFilter::Unset)
    }

    pub fn exact(&self) -> Option<&T> {
        match self {
            FieldFilter::Exact(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldFilter<f64> {
    /// Range from optional bounds; `Unset` when both are absent.
    pub fn range(lower: Option<f64>, upper: Option<f64>) -> Self {
        if lower.is_none() && upper.is_none() {
            FieldFilter::Unset
        } else {
            FieldFilter::Range { lower, upper }
        }
    }

    /// Threshold conditions in (lower, upper) order.
    pub fn conditions(&self) -> Vec<Condition> {
        match self {
            FieldFilter::Range { lower, upper } => lower
                .map(Condition::GreaterThan)
                .into_iter()
                .chain(upper.map(Condition::LessThan))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether `value` satisfies this field's constraint.
    ///
    /// Range thresholds are permissive at the boundary: a value equal to
    /// either threshold passes. A missing value (`NaN`) never satisfies a
    /// set constraint.
    pub fn matches(&self, value: f64) -> bool {
        match self {
            FieldFilter::Unset => true,
            FieldFilter::Exact(v) => value == *v,
            FieldFilter::Range { .. } => {
                !value.is_nan() && self.conditions().iter().all(|c| c.holds(value))
            }
        }
    }
}

/// A single threshold condition of a range filter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Condition {
    GreaterThan(f64),
    LessThan(f64),
}

impl Condition {
    /// Fails only when the value lies strictly on the wrong side.
    pub fn holds(self, value: f64) -> bool {
        match self {
            Condition::GreaterThan(threshold) => !(value < threshold),
            Condition::LessThan(threshold) => !(value > threshold),
        }
    }

    pub fn threshold(self) -> f64 {
        match self {
            Condition::GreaterThan(t) | Condition::LessThan(t) => t,
        }
    }

    /// Wire name of the condition kind.
    pub fn kind(self) -> &'static str {
        match self {
            Condition::GreaterThan(_) => "greaterThan",
            Condition::LessThan(_) => "lessThan",
        }
    }
}

/// Filterable fields, in wire key order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FilterField {
    Ticker,
    TotalPremium,
    Price,
    Size,
    CallPut,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Ticker,
        FilterField::TotalPremium,
        FilterField::Price,
        FilterField::Size,
        FilterField::CallPut,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FilterField::Ticker => "ticker",
            FilterField::TotalPremium => "totalpremium",
            FilterField::Price => "price",
            FilterField::Size => "size",
            FilterField::CallPut => "callput",
        }
    }
}

/// Normalized filter structure keyed by field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterModel {
    pub ticker: FieldFilter<String>,
    pub totalpremium: FieldFilter<f64>,
    pub price: FieldFilter<f64>,
    pub size: FieldFilter<f64>,
    pub callput: FieldFilter<crate::callput::CallPut>,
}

impl FilterModel {
    pub fn is_empty(&self) -> bool {
        self.active_fields().is_empty()
    }

    /// Keys present in the model, in wire order.
    pub fn active_fields(&self) -> Vec<FilterField> {
        FilterField::ALL
            .into_iter()
            .filter(|field| self.is_field_set(*field))
            .collect()
    }

    pub fn is_field_set(&self, field: FilterField) -> bool {
        match field {
            FilterField::Ticker => self.ticker.is_set(),
            FilterField::TotalPremium => self.totalpremium.is_set(),
            FilterField::Price => self.price.is_set(),
            FilterField::Size => self.size.is_set(),
            FilterField::CallPut => self.callput.is_set(),
        }
    }

    /// Range filter for one of the numeric fields.
    pub fn numeric(&self, field: FilterField) -> Option<&FieldFilter<f64>> {
        match field {
            FilterField::TotalPremium => Some(&self.totalpremium),
            FilterField::Price => Some(&self.price),
            FilterField::Size => Some(&self.size),
            FilterField::Ticker | FilterField::CallPut => None,
        }
    }
}
