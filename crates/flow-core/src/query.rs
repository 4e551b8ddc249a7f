//! Parameters of a paged query: which rows, in which order, under which
//! filters.

use crate::filter::FilterModel;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sortable columns, identified on the wire by their record field name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Time,
    Ticker,
    Strike,
    Expiration,
    Dte,
    CallPut,
    TotalPremium,
    Price,
    Size,
    Kind,
}

impl SortColumn {
    pub fn col_id(self) -> &'static str {
        match self {
            SortColumn::Time => "time",
            SortColumn::Ticker => "ticker",
            SortColumn::Strike => "strike",
            SortColumn::Expiration => "expiration",
            SortColumn::Dte => "dte",
            SortColumn::CallPut => "callput",
            SortColumn::TotalPremium => "totalpremium",
            SortColumn::Price => "price",
            SortColumn::Size => "size",
            SortColumn::Kind => "is_sweep",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Everything needed to request one page.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub page: usize,
    pub page_size: usize,
    pub sort: Vec<SortSpec>,
    pub filters: FilterModel,
}

impl QueryParams {
    pub fn start_row(&self) -> usize {
        self.page * self.page_size
    }

    pub fn end_row(&self) -> usize {
        (self.page + 1) * self.page_size
    }
}

/// Widen the lower-bound row-count estimate after a page arrived.
///
/// Never shrinks: the remote side does not report totals, so this is only
/// "at least this many rows exist".
pub fn widen_total_rows(previous: usize, page: usize, page_size: usize, returned: usize) -> usize {
    previous.max((page + 1) * page_size + returned)
}
