//! flow-protocol
//!
//! Wire-level encoding/decoding for the options-flow endpoints.
//!
//! - [`wire_types`] : serde shapes of the query request body
//! - [`json_codec`] : query encoding, page and stream message decoding

pub mod json_codec;
pub mod wire_types;

pub use json_codec::{
    decode_page, decode_stream_message, encode_query, to_wire_query, ProtocolError, StreamFrame,
};
pub use wire_types::{WireCondition, WireFilter, WireQuery, WireSort};
