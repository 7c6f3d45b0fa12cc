//! Key binding overlay

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout::centered_rect;
use crate::theme::Theme;

/// (keys, description) pairs shown in the overlay
const BINDINGS: &[(&str, &str)] = &[
    ("j / k", "Next / previous module"),
    ("g / G", "First / last module"),
    ("Enter", "Open or close module"),
    ("m", "Mark complete / incomplete"),
    ("Ctrl-d / Ctrl-u", "Half page down / up"),
    ("PgDn / PgUp", "Page down / up"),
    ("t", "Back to top"),
    ("?", "Toggle this help"),
    ("q", "Quit"),
];

/// Draw the help overlay
pub fn draw(frame: &mut Frame, theme: &Theme) {
    let height = BINDINGS.len() as u16 + 2;
    let area = centered_rect(48, height, frame.area());

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface));

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, description)| {
            Line::from(vec![
                Span::styled(
                    format!(" {keys:<16}"),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*description, Style::default().fg(theme.text)),
            ])
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
