// crates/flow-terminal/src/ui.rs

use chrono::Local;
use flow_core::{FilterField, FilterModel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use crate::components::{
    filter_dialog::draw_filter_dialog, flow_table::draw_flow_table, help::draw_help,
    status_bar::draw_status_bar,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Flow table
            Constraint::Length(1), // Pagination footer
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    draw_header(f, chunks[0], app);
    draw_flow_table(f, chunks[1], app, Local::now().date_naive());
    draw_footer(f, chunks[2], app);
    draw_status_bar(f, chunks[3], app);

    if app.input_mode == InputMode::FilterDialog {
        draw_filter_dialog(f, centered_rect(50, 60, f.size()), app);
    }

    if app.show_help {
        draw_help(f, centered_rect(60, 60, f.size()));
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(area);

    let state = &app.state;

    // Left: title, play/pause and connection status
    let (live_text, live_color) = if state.live {
        ("▶ LIVE", Color::Green)
    } else {
        ("❚❚ PAUSED", Color::Yellow)
    };
    let connection_color = if state.connected { Color::Green } else { Color::Red };

    let left_text = vec![
        Span::styled(
            "OPTIONS FLOW",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(live_text, Style::default().fg(live_color)),
        Span::raw("  "),
        Span::styled("●", Style::default().fg(connection_color)),
        Span::raw(if state.connected { " Connected" } else { " Disconnected" }),
    ];
    let left_paragraph =
        Paragraph::new(Line::from(left_text)).block(Block::default().borders(Borders::ALL));
    f.render_widget(left_paragraph, header_chunks[0]);

    // Center: ticker box
    let editing = app.input_mode == InputMode::EditingTicker;
    let ticker = if editing { &app.ticker_input } else { &state.ticker_text };
    let mut ticker_spans = vec![
        Span::raw("Ticker: "),
        Span::styled(ticker.as_str(), Style::default().fg(Color::Yellow)),
    ];
    if editing {
        ticker_spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    } else if ticker.is_empty() {
        ticker_spans.push(Span::styled("[/] to search", Style::default().fg(Color::DarkGray)));
    }
    let border_color = if editing { Color::Yellow } else { Color::White };
    let center_paragraph = Paragraph::new(Line::from(ticker_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(center_paragraph, header_chunks[1]);

    // Right: active filters and stream counter
    let right_text = format!(
        "{} | Prints: {}",
        filter_summary(&state.filters),
        app.stream_count
    );
    let right_paragraph = Paragraph::new(right_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(right_paragraph, header_chunks[2]);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let showing = match state.showing_range() {
        Some((first, last, total)) => format!("Showing {} to {} of {} entries", first, last, total),
        None if state.loading => "Loading...".to_string(),
        None => "No entries".to_string(),
    };
    f.render_widget(
        Paragraph::new(showing).style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    let enabled = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);
    let controls = Line::from(vec![
        Span::styled(
            "◀ [B] Prev",
            if state.can_previous_page() { enabled } else { disabled },
        ),
        Span::raw(format!(
            "  Page {} of {}  ",
            state.page + 1,
            state.page_count().max(1)
        )),
        Span::styled(
            "Next [N] ▶",
            if state.can_next_page() { enabled } else { disabled },
        ),
    ]);
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Right),
        chunks[1],
    );
}

fn filter_summary(filters: &FilterModel) -> String {
    let active = filters.active_fields();
    if active.is_empty() {
        return "No filters".to_string();
    }
    let names: Vec<&str> = active
        .into_iter()
        .map(|field| match field {
            FilterField::Ticker => "ticker",
            FilterField::TotalPremium => "premium",
            FilterField::Price => "price",
            FilterField::Size => "size",
            FilterField::CallPut => "call/put",
        })
        .collect();
    format!("Filters: {}", names.join(", "))
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
