//! JSON encoding/decoding for the query and stream endpoints.
//!
//! - [`encode_query`] / [`to_wire_query`]: `QueryParams` → request body
//! - [`decode_page`]: query response body → records
//! - [`decode_stream_message`]: one stream text frame → record or nothing

use flow_core::{FieldFilter, FilterField, FilterModel, OptionsFlow, QueryParams};
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::wire_types::{WireCondition, WireFilter, WireQuery, WireSort};

/// Field whose presence marks a stream message as a trade.
pub const TRADE_DISCRIMINATOR: &str = "callput";

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("query response is not a JSON array")]
    NotAnArray,

    #[error("invalid trade record: {0}")]
    InvalidRecord(serde_json::Error),
}

/// A decoded stream frame.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    Trade(OptionsFlow),
    /// Valid JSON that is not a trade (heartbeat, status, ...).
    Ignored,
}

// ============================================================================
// OUTBOUND: query request
// ============================================================================

pub fn to_wire_query(params: &QueryParams) -> WireQuery {
    WireQuery {
        start_row: params.start_row(),
        end_row: params.end_row(),
        sort_model: params
            .sort
            .iter()
            .map(|spec| WireSort {
                col_id: spec.column.col_id().to_string(),
                sort: spec.direction.as_str().to_string(),
            })
            .collect(),
        filter_model: encode_filter_model(&params.filters),
    }
}

pub fn encode_query(params: &QueryParams) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&to_wire_query(params))?)
}

fn encode_filter_model(model: &FilterModel) -> IndexMap<String, WireFilter> {
    let mut out = IndexMap::new();

    for field in model.active_fields() {
        let wire = match field {
            FilterField::Ticker => model.ticker.exact().map(|ticker| WireFilter::Text {
                filter_type: "text".to_string(),
                filter: ticker.clone(),
            }),
            FilterField::CallPut => model.callput.exact().map(|cp| WireFilter::Exact {
                filter: cp.as_str().to_string(),
            }),
            FilterField::TotalPremium | FilterField::Price | FilterField::Size => {
                model.numeric(field).and_then(encode_range)
            }
        };

        if let Some(wire) = wire {
            out.insert(field.key().to_string(), wire);
        }
    }

    out
}

fn encode_range(filter: &FieldFilter<f64>) -> Option<WireFilter> {
    match filter {
        FieldFilter::Unset => None,
        FieldFilter::Exact(value) => Some(WireFilter::Exact {
            filter: value.to_string(),
        }),
        FieldFilter::Range { .. } => Some(WireFilter::Conditions {
            conditions: filter
                .conditions()
                .into_iter()
                .map(|c| WireCondition {
                    kind: c.kind().to_string(),
                    filter: c.threshold().to_string(),
                })
                .collect(),
        }),
    }
}

// ============================================================================
// INBOUND: page response and stream frames
// ============================================================================

/// Decode a query response body.
///
/// Anything but a JSON array is an error. Rows that are not valid trade
/// records are skipped with a warning; the rest of the page is kept.
pub fn decode_page(body: &str) -> Result<Vec<OptionsFlow>, ProtocolError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Array(rows) = value else {
        return Err(ProtocolError::NotAnArray);
    };

    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(index, error = %err, "skipping invalid page row");
                None
            }
        })
        .collect())
}

/// Decode one stream text frame.
///
/// Frames without a `callput` field are not trades and come back as
/// [`StreamFrame::Ignored`].
pub fn decode_stream_message(text: &str) -> Result<StreamFrame, ProtocolError> {
    let value: Value = serde_json::from_str(text)?;

    let is_trade = value
        .as_object()
        .is_some_and(|obj| obj.contains_key(TRADE_DISCRIMINATOR));
    if !is_trade {
        return Ok(StreamFrame::Ignored);
    }

    serde_json::from_value(value)
        .map(StreamFrame::Trade)
        .map_err(ProtocolError::InvalidRecord)
}
