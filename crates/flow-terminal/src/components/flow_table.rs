// crates/flow-terminal/src/components/flow_table.rs

use chrono::NaiveDate;
use flow_core::{
    format_dte, format_premium, format_price, format_strike, is_large_premium, CallPut,
    OptionsFlow, SortColumn, SortDirection, TradeKind, ViewMode,
};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;

const CALL_COLOR: Color = Color::Rgb(76, 175, 80);
const PUT_COLOR: Color = Color::Rgb(255, 82, 82);
const PREMIUM_COLOR: Color = Color::Rgb(255, 215, 0);

/// One table column: header text, the field it sorts on, and its width.
pub struct ColumnSpec {
    pub title: &'static str,
    pub sort: SortColumn,
    pub width: Constraint,
}

static COMPACT: [ColumnSpec; 8] = [
    ColumnSpec { title: "Time", sort: SortColumn::Time, width: Constraint::Length(9) },
    ColumnSpec { title: "Contract", sort: SortColumn::Ticker, width: Constraint::Min(26) },
    ColumnSpec { title: "DTE", sort: SortColumn::Dte, width: Constraint::Length(6) },
    ColumnSpec { title: "C/P", sort: SortColumn::CallPut, width: Constraint::Length(5) },
    ColumnSpec { title: "Premium ($)", sort: SortColumn::TotalPremium, width: Constraint::Length(13) },
    ColumnSpec { title: "Price", sort: SortColumn::Price, width: Constraint::Length(8) },
    ColumnSpec { title: "Size", sort: SortColumn::Size, width: Constraint::Length(7) },
    ColumnSpec { title: "Type", sort: SortColumn::Kind, width: Constraint::Length(9) },
];

static STANDARD: [ColumnSpec; 10] = [
    ColumnSpec { title: "Time", sort: SortColumn::Time, width: Constraint::Length(9) },
    ColumnSpec { title: "Ticker", sort: SortColumn::Ticker, width: Constraint::Length(7) },
    ColumnSpec { title: "Strike", sort: SortColumn::Strike, width: Constraint::Length(8) },
    ColumnSpec { title: "Expiration", sort: SortColumn::Expiration, width: Constraint::Length(11) },
    ColumnSpec { title: "DTE", sort: SortColumn::Dte, width: Constraint::Length(6) },
    ColumnSpec { title: "Call/Put", sort: SortColumn::CallPut, width: Constraint::Length(9) },
    ColumnSpec { title: "Premium ($)", sort: SortColumn::TotalPremium, width: Constraint::Length(13) },
    ColumnSpec { title: "Price", sort: SortColumn::Price, width: Constraint::Length(8) },
    ColumnSpec { title: "Size", sort: SortColumn::Size, width: Constraint::Length(7) },
    ColumnSpec { title: "Type", sort: SortColumn::Kind, width: Constraint::Min(9) },
];

/// Columns shown in a view mode, left to right.
pub fn columns(mode: ViewMode) -> &'static [ColumnSpec] {
    match mode {
        ViewMode::Compact => &COMPACT,
        ViewMode::Standard => &STANDARD,
    }
}

pub fn draw_flow_table(f: &mut Frame, area: Rect, app: &App, today: NaiveDate) {
    let state = &app.state;
    let block = Block::default()
        .title(format!(" Options Flow ({}) ", state.view_mode.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    if state.records.is_empty() {
        let message = if state.loading { "Loading..." } else { "No results." };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let cols = columns(state.view_mode);

    let header = Row::new(cols.iter().enumerate().map(|(i, col)| {
        let key = if i == 9 { 0 } else { i + 1 };
        let arrow = match state.sort_direction(col.sort) {
            Some(SortDirection::Asc) => " ▲",
            Some(SortDirection::Desc) => " ▼",
            None => "",
        };
        Cell::from(format!("{}:{}{}", key, col.title, arrow))
    }))
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .records
        .iter()
        .map(|record| Row::new(cols.iter().map(|col| cell(record, col, state.view_mode, today))))
        .collect();

    let widths: Vec<Constraint> = cols.iter().map(|col| col.width).collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut table_state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn cell(record: &OptionsFlow, col: &ColumnSpec, mode: ViewMode, today: NaiveDate) -> Cell<'static> {
    match (col.sort, mode) {
        (SortColumn::Time, _) => {
            Cell::from(record.time.clone()).style(Style::default().fg(Color::Gray))
        }
        (SortColumn::Ticker, ViewMode::Compact) => Cell::from(contract_line(record)),
        (SortColumn::Ticker, ViewMode::Standard) => Cell::from(record.ticker.clone()),
        (SortColumn::Strike, _) => Cell::from(format_strike(record.strike)),
        (SortColumn::Expiration, _) => Cell::from(record.expiration.clone()),
        (SortColumn::Dte, _) => Cell::from(format_dte(&record.expiration, today))
            .style(Style::default().fg(Color::DarkGray)),
        (SortColumn::CallPut, _) => Cell::from(record.callput.as_str())
            .style(Style::default().fg(call_put_color(record.callput))),
        (SortColumn::TotalPremium, _) => {
            let style = if is_large_premium(record.totalpremium) {
                Style::default().fg(PREMIUM_COLOR).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Cell::from(Line::from(format_premium(record.totalpremium)).alignment(Alignment::Right))
                .style(style)
        }
        (SortColumn::Price, _) => {
            Cell::from(Line::from(format_price(record.price)).alignment(Alignment::Right))
        }
        (SortColumn::Size, _) => {
            Cell::from(Line::from(record.size.to_string()).alignment(Alignment::Right))
        }
        (SortColumn::Kind, _) => {
            Cell::from(record.is_sweep.clone()).style(Style::default().fg(kind_color(record.kind())))
        }
    }
}

fn contract_line(record: &OptionsFlow) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!(
            "{} {} {} ",
            record.expiration,
            record.ticker,
            format_strike(record.strike)
        )),
        Span::styled(
            record.callput.as_char().to_string(),
            Style::default().fg(call_put_color(record.callput)),
        ),
    ])
}

fn call_put_color(cp: CallPut) -> Color {
    match cp {
        CallPut::Call => CALL_COLOR,
        CallPut::Put => PUT_COLOR,
    }
}

fn kind_color(kind: TradeKind) -> Color {
    match kind {
        TradeKind::Sweep => Color::Rgb(135, 169, 237),
        TradeKind::Split => Color::Rgb(255, 170, 43),
        TradeKind::Unusual => Color::Rgb(147, 112, 219),
        TradeKind::Other | TradeKind::None => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_cover_every_column() {
        assert_eq!(columns(ViewMode::Compact).len(), 8);
        assert_eq!(columns(ViewMode::Standard).len(), 10);
        assert_eq!(columns(ViewMode::Compact)[1].sort, SortColumn::Ticker);
        assert_eq!(columns(ViewMode::Standard)[9].sort, SortColumn::Kind);
    }
}
