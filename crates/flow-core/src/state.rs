//! Dashboard state and its reducer.
//!
//! Every user action and every network event is an [`Action`]. Applying
//! it mutates [`DashboardState`] and returns the [`Effect`]s the caller
//! must carry out (schedule a fetch, open or close the stream). The
//! presentation layer only reads the state.

use tracing::{debug, warn};

use crate::admission::admits;
use crate::buffer::{DisplayBuffer, PAGE_SIZE};
use crate::filter::FilterModel;
use crate::query::{widen_total_rows, QueryParams, SortColumn, SortDirection, SortSpec};
use crate::trade::OptionsFlow;
use crate::translate::{translate, FilterForm};

/// Column set used by the table. Presentation only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Compact,
    Standard,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Compact => ViewMode::Standard,
            ViewMode::Standard => ViewMode::Compact,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Compact => "Compact",
            ViewMode::Standard => "Standard",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Ticker box edited; rebuilds the whole filter model from the text.
    TickerEdited(String),
    /// Filter dialog applied.
    FiltersApplied(FilterForm),
    NextPage,
    PreviousPage,
    SortToggled(SortColumn),
    ViewModeChanged(ViewMode),
    ViewModeToggled,
    /// Play/pause.
    LiveToggled,

    FetchStarted { seq: u64 },
    PageLoaded { seq: u64, page: usize, rows: Vec<OptionsFlow> },
    PageFailed { seq: u64, reason: String },

    StreamOpened,
    StreamClosed,
    StreamRecord(OptionsFlow),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// (Re)schedule a debounced fetch with these parameters.
    Fetch(QueryParams),
    StartStream,
    StopStream,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub records: DisplayBuffer,
    pub page: usize,
    pub page_size: usize,
    /// Lower-bound estimate of the total row count.
    pub total_rows: usize,
    pub loading: bool,
    pub live: bool,
    pub connected: bool,
    pub view_mode: ViewMode,
    pub sort: Vec<SortSpec>,
    pub filters: FilterModel,
    pub form: FilterForm,
    pub ticker_text: String,
    latest_seq: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            records: DisplayBuffer::with_capacity(PAGE_SIZE),
            page: 0,
            page_size: PAGE_SIZE,
            total_rows: 0,
            loading: false,
            live: true,
            connected: false,
            view_mode: ViewMode::Compact,
            sort: Vec::new(),
            filters: FilterModel::default(),
            form: FilterForm::default(),
            ticker_text: String::new(),
            latest_seq: 0,
        }
    }

    /// Effects to run once at startup.
    pub fn initial_effects(&self) -> Vec<Effect> {
        let mut effects = vec![Effect::Fetch(self.query_params())];
        if self.live {
            effects.push(Effect::StartStream);
        }
        effects
    }

    pub fn query_params(&self) -> QueryParams {
        QueryParams {
            page: self.page,
            page_size: self.page_size,
            sort: self.sort.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Sequence number of the latest issued request (0 before any).
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn page_count(&self) -> usize {
        self.total_rows.div_ceil(self.page_size)
    }

    pub fn can_next_page(&self) -> bool {
        !self.loading && self.page + 1 < self.page_count()
    }

    pub fn can_previous_page(&self) -> bool {
        !self.loading && self.page > 0
    }

    /// `(first, last, total)` for "Showing first to last of total entries",
    /// or `None` when nothing is displayed.
    pub fn showing_range(&self) -> Option<(usize, usize, usize)> {
        if self.records.is_empty() {
            return None;
        }
        let first = self.page * self.page_size + 1;
        let last = ((self.page + 1) * self.page_size).min(self.total_rows);
        Some((first, last, self.total_rows))
    }

    /// Current sort direction of a column, if it is sorted.
    pub fn sort_direction(&self, column: SortColumn) -> Option<SortDirection> {
        self.sort
            .iter()
            .find(|spec| spec.column == column)
            .map(|spec| spec.direction)
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::TickerEdited(text) => {
                self.apply_form(FilterForm::ticker_only(&text));
                vec![self.fetch()]
            }
            Action::FiltersApplied(form) => {
                self.apply_form(form);
                vec![self.fetch()]
            }
            Action::NextPage => {
                if !self.can_next_page() {
                    return Vec::new();
                }
                self.page += 1;
                vec![self.fetch()]
            }
            Action::PreviousPage => {
                if !self.can_previous_page() {
                    return Vec::new();
                }
                self.page -= 1;
                vec![self.fetch()]
            }
            Action::SortToggled(column) => {
                self.sort = match self.sort_direction(column) {
                    None => vec![SortSpec {
                        column,
                        direction: SortDirection::Asc,
                    }],
                    Some(SortDirection::Asc) => vec![SortSpec {
                        column,
                        direction: SortDirection::Desc,
                    }],
                    Some(SortDirection::Desc) => Vec::new(),
                };
                vec![self.fetch()]
            }
            Action::ViewModeChanged(mode) => {
                self.view_mode = mode;
                Vec::new()
            }
            Action::ViewModeToggled => {
                self.view_mode = self.view_mode.toggle();
                Vec::new()
            }
            Action::LiveToggled => {
                self.live = !self.live;
                if self.live {
                    vec![Effect::StartStream]
                } else {
                    self.connected = false;
                    vec![Effect::StopStream]
                }
            }

            Action::FetchStarted { seq } => {
                self.latest_seq = self.latest_seq.max(seq);
                self.loading = true;
                Vec::new()
            }
            Action::PageLoaded { seq, page, rows } => {
                if seq != self.latest_seq {
                    debug!(seq, latest = self.latest_seq, "dropping superseded page");
                    return Vec::new();
                }
                if !rows.is_empty() {
                    self.total_rows =
                        widen_total_rows(self.total_rows, page, self.page_size, rows.len());
                }
                self.records.replace(rows);
                self.loading = false;
                Vec::new()
            }
            Action::PageFailed { seq, reason } => {
                if seq != self.latest_seq {
                    debug!(seq, latest = self.latest_seq, "dropping superseded failure");
                    return Vec::new();
                }
                warn!(seq, %reason, "page fetch failed");
                self.records.clear();
                self.loading = false;
                Vec::new()
            }

            Action::StreamOpened => {
                self.connected = true;
                Vec::new()
            }
            Action::StreamClosed => {
                self.connected = false;
                Vec::new()
            }
            Action::StreamRecord(record) => {
                if !self.live || self.page != 0 {
                    return Vec::new();
                }
                if admits(&record, &self.filters, &self.ticker_text) {
                    self.records.push_live(record);
                }
                Vec::new()
            }
        }
    }

    fn apply_form(&mut self, form: FilterForm) {
        self.filters = translate(&form);
        self.ticker_text = form.ticker.clone();
        self.form = form;
        self.page = 0;
    }

    fn fetch(&self) -> Effect {
        Effect::Fetch(self.query_params())
    }
}
