// crates/flow-terminal/src/components/help.rs

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

const SHORTCUTS: [(&str, &str, Color); 11] = [
    ("/", "Edit ticker (filters as you type)", Color::Yellow),
    ("F/f", "Advanced filter dialog", Color::Cyan),
    ("Space/P", "Play / pause live stream", Color::Green),
    ("V/v", "Toggle compact / standard view", Color::Magenta),
    ("N/→", "Next page", Color::Blue),
    ("B/←", "Previous page", Color::Blue),
    ("1-9, 0", "Sort by column (asc, desc, off)", Color::Blue),
    ("↑/k", "Move up", Color::White),
    ("↓/j", "Move down", Color::White),
    ("F1/?", "Toggle help", Color::Gray),
    ("Q/q", "Quit", Color::Red),
];

pub fn draw_help(f: &mut Frame, area: Rect) {
    f.render_widget(Clear, area);

    let help_items: Vec<ListItem> = SHORTCUTS
        .iter()
        .map(|(keys, action, color)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<8}", keys),
                    Style::default().fg(*color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" - {}", action)),
            ]))
        })
        .collect();

    let help_list = List::new(help_items).block(
        Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(help_list, area);

    let footer = Paragraph::new("Press F1 or ESC to close help")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    let footer_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(2),
        width: area.width,
        height: 1,
    };

    f.render_widget(footer, footer_area);
}
