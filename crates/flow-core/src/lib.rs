//! flow-core
//!
//! Pure options-flow dashboard logic:
//! - trade records and call/put
//! - filter form, filter model and the translator between them
//! - live-record admission predicate
//! - number / premium / strike / DTE formatting
//! - display buffer and query parameters
//! - dashboard state and its reducer

pub mod admission;
pub mod buffer;
pub mod callput;
pub mod error;
pub mod filter;
pub mod format;
pub mod query;
pub mod state;
pub mod trade;
pub mod translate;

pub use admission::admits;
pub use buffer::{DisplayBuffer, PAGE_SIZE};
pub use callput::{CallPut, CallPutSelection};
pub use error::FlowError;
pub use filter::{Condition, FieldFilter, FilterField, FilterModel};
pub use format::{
    days_to_expiration, format_bound, format_contract, format_dte, format_premium,
    format_price, format_strike, is_large_premium, parse_formatted_number,
};
pub use query::{widen_total_rows, QueryParams, SortColumn, SortDirection, SortSpec};
pub use state::{Action, DashboardState, Effect, ViewMode};
pub use trade::{OptionsFlow, TradeKind};
pub use translate::{translate, Bound, FilterForm};
