// crates/flow-terminal/src/app.rs

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flow_core::{format_bound, Action, Bound, CallPutSelection, DashboardState, Effect, FilterForm};
use tracing::debug;

use crate::components::flow_table::columns;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingTicker,
    FilterDialog,
}

/// Rows of the filter dialog, top to bottom.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DialogField {
    Ticker,
    CallPut,
    Bound(Bound),
}

impl DialogField {
    pub const ALL: [DialogField; 8] = [
        DialogField::Ticker,
        DialogField::CallPut,
        DialogField::Bound(Bound::PremiumMin),
        DialogField::Bound(Bound::PremiumMax),
        DialogField::Bound(Bound::PriceMin),
        DialogField::Bound(Bound::PriceMax),
        DialogField::Bound(Bound::SizeMin),
        DialogField::Bound(Bound::SizeMax),
    ];

    pub fn label(self) -> &'static str {
        match self {
            DialogField::Ticker => "Ticker",
            DialogField::CallPut => "Call/Put",
            DialogField::Bound(bound) => bound.label(),
        }
    }
}

/// Text buffers of the filter dialog while it is open.
#[derive(Debug, Clone, Default)]
pub struct FilterDialog {
    pub focus: usize,
    pub ticker: String,
    pub call_put: CallPutSelection,
    pub bounds: Vec<(Bound, String)>,
    pub error: Option<String>,
}

impl FilterDialog {
    pub fn from_form(form: &FilterForm) -> Self {
        Self {
            focus: 0,
            ticker: form.ticker.clone(),
            call_put: form.call_put,
            bounds: Bound::ALL
                .into_iter()
                .map(|bound| (bound, format_bound(form.bound(bound))))
                .collect(),
            error: None,
        }
    }

    pub fn focused(&self) -> DialogField {
        DialogField::ALL[self.focus]
    }

    pub fn bound_text(&self, bound: Bound) -> &str {
        self.bounds
            .iter()
            .find(|(b, _)| *b == bound)
            .map(|(_, text)| text.as_str())
            .unwrap_or("")
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % DialogField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + DialogField::ALL.len() - 1) % DialogField::ALL.len();
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused() {
            DialogField::Ticker => Some(&mut self.ticker),
            DialogField::CallPut => None,
            DialogField::Bound(bound) => self
                .bounds
                .iter_mut()
                .find(|(b, _)| *b == bound)
                .map(|(_, text)| text),
        }
    }

    /// Form to apply, starting from the one currently in effect.
    ///
    /// A bound that does not parse keeps its current value; the other
    /// fields still go through. Rejected fields are named in the
    /// returned message.
    pub fn to_form(&self, current: &FilterForm) -> (FilterForm, Option<String>) {
        let mut form = current.clone();
        form.ticker = self.ticker.clone();
        form.call_put = self.call_put;

        let rejected: Vec<String> = self
            .bounds
            .iter()
            .filter_map(|(bound, text)| {
                form.set_bound(*bound, text)
                    .err()
                    .map(|err| format!("{}: {}", bound.label(), err))
            })
            .collect();

        let error = (!rejected.is_empty()).then(|| rejected.join("; "));
        (form, error)
    }
}

pub struct App {
    pub state: DashboardState,

    // UI state
    pub input_mode: InputMode,
    pub ticker_input: String,
    pub dialog: FilterDialog,
    pub selected: usize,
    pub show_help: bool,
    pub should_quit: bool,

    // Statistics
    pub stream_count: u64,
}

impl App {
    pub fn new(state: DashboardState) -> Self {
        Self {
            ticker_input: state.ticker_text.clone(),
            state,
            input_mode: InputMode::Normal,
            dialog: FilterDialog::default(),
            selected: 0,
            show_help: false,
            should_quit: false,
            stream_count: 0,
        }
    }

    /// Run an action through the dashboard state.
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        if matches!(action, Action::StreamRecord(_)) {
            self.stream_count += 1;
        }
        let effects = self.state.update(action);
        self.selected = self.selected.min(self.state.records.len().saturating_sub(1));
        effects
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Vec::new();
        }

        if self.show_help {
            if matches!(key.code, KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Esc) {
                self.toggle_help();
            }
            return Vec::new();
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::EditingTicker => self.handle_ticker_key(key),
            InputMode::FilterDialog => self.handle_dialog_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('/') => {
                self.start_ticker_edit();
                Vec::new()
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.open_filter_dialog();
                Vec::new()
            }
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                self.apply(Action::LiveToggled)
            }
            KeyCode::Char('v') | KeyCode::Char('V') => self.apply(Action::ViewModeToggled),

            // Pagination
            KeyCode::Char('n') | KeyCode::Right => self.apply(Action::NextPage),
            KeyCode::Char('b') | KeyCode::Left => self.apply(Action::PreviousPage),

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection_up();
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection_down();
                Vec::new()
            }

            KeyCode::Char(c) if c.is_ascii_digit() => self.toggle_sort_by_key(c),

            KeyCode::F(1) | KeyCode::Char('?') => {
                self.toggle_help();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_ticker_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                Vec::new()
            }
            KeyCode::Backspace => {
                if self.ticker_input.pop().is_none() {
                    return Vec::new();
                }
                self.apply(Action::TickerEdited(self.ticker_input.clone()))
            }
            KeyCode::Char(c) => {
                self.ticker_input.push(c);
                self.apply(Action::TickerEdited(self.ticker_input.clone()))
            }
            _ => Vec::new(),
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                Vec::new()
            }
            KeyCode::Enter => self.submit_filter_dialog(),
            KeyCode::Down | KeyCode::Tab => {
                self.dialog.next_field();
                Vec::new()
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.dialog.prev_field();
                Vec::new()
            }
            KeyCode::Left if self.dialog.focused() == DialogField::CallPut => {
                self.dialog.call_put = self.dialog.call_put.cycle_back();
                Vec::new()
            }
            KeyCode::Right if self.dialog.focused() == DialogField::CallPut => {
                self.dialog.call_put = self.dialog.call_put.cycle();
                Vec::new()
            }
            KeyCode::Backspace => {
                if let Some(text) = self.dialog.focused_text_mut() {
                    text.pop();
                }
                Vec::new()
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.dialog.focused_text_mut() {
                    text.push(c);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn start_ticker_edit(&mut self) {
        self.ticker_input = self.state.ticker_text.clone();
        self.input_mode = InputMode::EditingTicker;
    }

    pub fn open_filter_dialog(&mut self) {
        self.dialog = FilterDialog::from_form(&self.state.form);
        self.input_mode = InputMode::FilterDialog;
    }

    /// Apply the dialog. If a bound was rejected the dialog stays open
    /// showing why.
    pub fn submit_filter_dialog(&mut self) -> Vec<Effect> {
        let (form, error) = self.dialog.to_form(&self.state.form);
        self.ticker_input = form.ticker.clone();
        if error.is_none() {
            self.input_mode = InputMode::Normal;
        }
        self.dialog.error = error;
        self.apply(Action::FiltersApplied(form))
    }

    /// `1`..`9` pick the first nine visible columns, `0` the tenth.
    pub fn toggle_sort_by_key(&mut self, digit: char) -> Vec<Effect> {
        let index = match digit.to_digit(10) {
            Some(0) => 9,
            Some(n) => n as usize - 1,
            None => return Vec::new(),
        };
        match columns(self.state.view_mode).get(index) {
            Some(column) => self.apply(Action::SortToggled(column.sort)),
            None => {
                debug!(index, view = self.state.view_mode.label(), "no column for sort key");
                Vec::new()
            }
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected + 1 < self.state.records.len() {
            self.selected += 1;
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::{CallPut, FieldFilter, OptionsFlow, SortColumn, SortDirection, ViewMode};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) -> Vec<Effect> {
        let mut effects = Vec::new();
        for c in text.chars() {
            effects = app.handle_key(key(KeyCode::Char(c)));
        }
        effects
    }

    fn row(ticker: &str) -> OptionsFlow {
        OptionsFlow {
            time: "10:00:00".into(),
            ticker: ticker.into(),
            callput: CallPut::Call,
            strike: 100.0,
            expiration: "2024-05-17".into(),
            price: 1.0,
            size: 10,
            totalpremium: 1_000.0,
            is_sweep: String::new(),
            dte: None,
        }
    }

    fn last_fetch(effects: &[Effect]) -> &flow_core::QueryParams {
        match effects.last() {
            Some(Effect::Fetch(params)) => params,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn typing_in_ticker_box_filters_live() {
        let mut app = App::new(DashboardState::new());
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::EditingTicker);

        let effects = type_text(&mut app, "ts");
        let params = last_fetch(&effects);
        assert_eq!(params.page, 0);
        assert_eq!(params.filters.ticker, FieldFilter::Exact("TS".to_string()));
        assert_eq!(app.state.ticker_text, "ts");

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn backspace_on_empty_ticker_does_nothing() {
        let mut app = App::new(DashboardState::new());
        app.handle_key(key(KeyCode::Char('/')));
        assert!(app.handle_key(key(KeyCode::Backspace)).is_empty());
    }

    #[test]
    fn bad_bound_keeps_prior_value_and_applies_the_rest() {
        let mut state = DashboardState::new();
        state.update(Action::FiltersApplied(
            FilterForm::new().with_bound(Bound::PremiumMin, Some(10_000.0)),
        ));
        let mut app = App::new(state);
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.input_mode, InputMode::FilterDialog);

        type_text(&mut app, "nvda");

        // Premium min: replace "10000" with junk.
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Backspace));
        }
        type_text(&mut app, "lots");

        // Size max gets a valid value.
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Down));
        }
        type_text(&mut app, "2k");

        let effects = app.handle_key(key(KeyCode::Enter));
        let params = last_fetch(&effects);
        assert_eq!(params.filters.ticker, FieldFilter::Exact("NVDA".to_string()));
        assert!(params.filters.totalpremium.matches(10_000.0));
        assert!(!params.filters.totalpremium.matches(9_999.0));
        assert!(params.filters.size.matches(2_000.0));
        assert!(!params.filters.size.matches(2_001.0));

        assert_eq!(app.state.form.bound(Bound::PremiumMin), Some(10_000.0));
        assert_eq!(app.state.form.bound(Bound::SizeMax), Some(2_000.0));
        assert_eq!(app.input_mode, InputMode::FilterDialog);
        assert!(app.dialog.error.as_deref().unwrap_or("").starts_with("Premium min"));

        // Fixing the field and applying again closes the dialog.
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Up));
        }
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Backspace));
        }
        type_text(&mut app, "20k");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.dialog.error, None);
        assert_eq!(app.state.form.bound(Bound::PremiumMin), Some(20_000.0));
    }

    #[test]
    fn dialog_applies_bounds_and_call_put() {
        let mut app = App::new(DashboardState::new());
        app.handle_key(key(KeyCode::Char('f')));
        type_text(&mut app, "tsla");

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.dialog.call_put, CallPutSelection::Call);

        app.handle_key(key(KeyCode::Down));
        type_text(&mut app, "25k");

        let effects = app.handle_key(key(KeyCode::Enter));
        let params = last_fetch(&effects);
        assert_eq!(params.filters.ticker, FieldFilter::Exact("TSLA".to_string()));
        assert_eq!(params.filters.callput, FieldFilter::Exact(CallPut::Call));
        assert!(params.filters.totalpremium.matches(25_000.0));
        assert!(!params.filters.totalpremium.matches(24_999.0));

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.ticker_input, "tsla");
        assert_eq!(app.state.form.bound(Bound::PremiumMin), Some(25_000.0));
    }

    #[test]
    fn reopening_dialog_shows_applied_values() {
        let mut state = DashboardState::new();
        state.update(Action::FiltersApplied(
            FilterForm::ticker_only("SPY").with_bound(Bound::SizeMax, Some(500.0)),
        ));
        let mut app = App::new(state);

        app.open_filter_dialog();
        assert_eq!(app.dialog.ticker, "SPY");
        assert_eq!(app.dialog.bound_text(Bound::SizeMax), "500");
        assert_eq!(app.dialog.bound_text(Bound::SizeMin), "");
    }

    #[test]
    fn call_put_arrows_only_act_on_call_put_row() {
        let mut app = App::new(DashboardState::new());
        app.open_filter_dialog();
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.dialog.call_put, CallPutSelection::All);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.dialog.call_put, CallPutSelection::Put);
    }

    #[test]
    fn esc_closes_dialog_without_applying() {
        let mut app = App::new(DashboardState::new());
        app.open_filter_dialog();
        type_text(&mut app, "QQQ");
        assert!(app.handle_key(key(KeyCode::Esc)).is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.state.filters.is_empty());
    }

    #[test]
    fn digit_keys_sort_visible_columns() {
        let mut app = App::new(DashboardState::new());

        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.state.sort_direction(SortColumn::Time), Some(SortDirection::Asc));
        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.state.sort_direction(SortColumn::Time), Some(SortDirection::Desc));

        // Compact view has eight columns.
        assert!(app.handle_key(key(KeyCode::Char('0'))).is_empty());

        app.handle_key(key(KeyCode::Char('v')));
        assert_eq!(app.state.view_mode, ViewMode::Standard);
        app.handle_key(key(KeyCode::Char('0')));
        assert_eq!(app.state.sort_direction(SortColumn::Kind), Some(SortDirection::Asc));
        assert_eq!(app.state.sort.len(), 1);
    }

    #[test]
    fn space_toggles_live_stream() {
        let mut app = App::new(DashboardState::new());
        assert_eq!(app.handle_key(key(KeyCode::Char(' '))), vec![Effect::StopStream]);
        assert!(!app.state.live);
        assert_eq!(app.handle_key(key(KeyCode::Char('p'))), vec![Effect::StartStream]);
        assert!(app.state.live);
    }

    #[test]
    fn pagination_keys_respect_bounds() {
        let mut app = App::new(DashboardState::new());
        assert!(app.handle_key(key(KeyCode::Char('b'))).is_empty());
        assert!(app.handle_key(key(KeyCode::Char('n'))).is_empty());

        app.apply(Action::FetchStarted { seq: 1 });
        app.apply(Action::PageLoaded {
            seq: 1,
            page: 0,
            rows: vec![row("A"); 100],
        });
        let effects = app.handle_key(key(KeyCode::Right));
        assert_eq!(last_fetch(&effects).page, 1);
    }

    #[test]
    fn selection_stays_within_records() {
        let mut app = App::new(DashboardState::new());
        app.move_selection_down();
        assert_eq!(app.selected, 0);

        app.apply(Action::FetchStarted { seq: 1 });
        app.apply(Action::PageLoaded {
            seq: 1,
            page: 0,
            rows: vec![row("A"), row("B"), row("C")],
        });
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected, 2);

        app.apply(Action::FetchStarted { seq: 2 });
        app.apply(Action::PageLoaded {
            seq: 2,
            page: 0,
            rows: vec![row("D")],
        });
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = App::new(DashboardState::new());
        app.handle_key(key(KeyCode::F(1)));
        assert!(app.show_help);
        assert!(app.handle_key(key(KeyCode::Char(' '))).is_empty());
        assert!(app.state.live);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(DashboardState::new());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = App::new(DashboardState::new());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn stream_records_are_counted() {
        let mut app = App::new(DashboardState::new());
        app.apply(Action::StreamRecord(row("NVDA")));
        assert_eq!(app.stream_count, 1);
        assert_eq!(app.state.records.len(), 1);
    }
}
