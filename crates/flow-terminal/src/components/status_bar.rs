// crates/flow-terminal/src/components/status_bar.rs

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};

pub fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (msg, style) = match app.input_mode {
        InputMode::Normal => {
            let play_pause = if app.state.live { "ause " } else { "lay " };
            let shortcuts = vec![
                Span::styled("[/]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw("Ticker "),
                Span::styled("[F]", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw("ilters "),
                Span::styled("[P]", Style::default().fg(Color::Green)),
                Span::raw(play_pause),
                Span::styled("[V]", Style::default().fg(Color::Magenta)),
                Span::raw("iew "),
                Span::styled("[B/N]", Style::default().fg(Color::Blue)),
                Span::raw("Page "),
                Span::styled("[1-0]", Style::default().fg(Color::Blue)),
                Span::raw("Sort "),
                Span::styled("[Q]", Style::default().fg(Color::Gray)),
                Span::raw("uit"),
            ];
            (Line::from(shortcuts), Style::default())
        }
        InputMode::EditingTicker => {
            let input = vec![
                Span::raw("Ticker: "),
                Span::styled(&app.ticker_input, Style::default().fg(Color::Yellow)),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
                Span::raw(" [Enter/Esc] Done"),
            ];
            (Line::from(input), Style::default().fg(Color::Yellow))
        }
        InputMode::FilterDialog => (
            Line::from("Editing filters - [Enter] Apply [Esc] Close"),
            Style::default().fg(Color::Cyan),
        ),
    };

    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(style);

    let paragraph = Paragraph::new(msg)
        .block(status_block)
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}
