// crates/flow-terminal/src/components/filter_dialog.rs

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, DialogField};

pub fn draw_filter_dialog(f: &mut Frame, area: Rect, app: &App) {
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Advanced Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DialogField::ALL.len() as u16 + 1), // Fields
            Constraint::Length(1),                                 // Error
            Constraint::Min(0),
            Constraint::Length(1), // Actions
        ])
        .split(inner);

    let dialog = &app.dialog;
    let lines: Vec<Line> = DialogField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == dialog.focus;
            let marker = if focused { "› " } else { "  " };
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::styled(marker, label_style),
                Span::styled(format!("{:<12}", field.label()), label_style),
            ];
            match field {
                DialogField::Ticker => spans.push(text_value(&dialog.ticker, "e.g. TSLA", focused)),
                DialogField::CallPut => {
                    spans.push(Span::styled(
                        format!("◀ {} ▶", dialog.call_put.label()),
                        Style::default().fg(Color::Cyan),
                    ));
                }
                DialogField::Bound(bound) => spans.push(text_value(
                    dialog.bound_text(*bound),
                    bound.placeholder(),
                    focused,
                )),
            }
            if focused && *field != DialogField::CallPut {
                spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), chunks[0]);

    if let Some(error) = &dialog.error {
        let error = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(error, chunks[1]);
    }

    let actions = Paragraph::new("[↑/↓] Field  [←/→] Call/Put  [Enter] Apply  [Esc] Close")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(actions, chunks[3]);
}

fn text_value<'a>(text: &'a str, placeholder: &'static str, focused: bool) -> Span<'a> {
    if text.is_empty() && !focused {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(text, Style::default().fg(Color::Cyan))
    }
}
