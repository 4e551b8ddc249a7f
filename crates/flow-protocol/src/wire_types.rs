//! Serde shapes of the paged query request.
//!
//! ```text
//! {
//!   "startRow": 100,
//!   "endRow": 200,
//!   "sortModel": [{ "colId": "totalpremium", "sort": "desc" }],
//!   "filterModel": {
//!     "ticker":       { "filterType": "text", "filter": "TSLA" },
//!     "totalpremium": { "conditions": [{ "type": "greaterThan", "filter": "100000" }] },
//!     "callput":      { "filter": "CALL" }
//!   }
//! }
//! ```
//!
//! Thresholds travel as strings; the query endpoint expects that.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireQuery {
    pub start_row: usize,
    pub end_row: usize,
    pub sort_model: Vec<WireSort>,
    /// Keyed by record field name, insertion-ordered.
    pub filter_model: IndexMap<String, WireFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSort {
    pub col_id: String,
    /// `"asc"` or `"desc"`.
    pub sort: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireFilter {
    /// Range conditions on a numeric field.
    Conditions { conditions: Vec<WireCondition> },
    /// Text match (ticker).
    Text {
        #[serde(rename = "filterType")]
        filter_type: String,
        filter: String,
    },
    /// Plain exact match (call/put, or a single numeric value).
    Exact { filter: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireCondition {
    /// `"greaterThan"` or `"lessThan"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub filter: String,
}
