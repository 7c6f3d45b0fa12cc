//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::Style,
    widgets::{Paragraph, Wrap},
};

use crate::theme::Theme;

/// Draw a full-screen message (used when there is nothing to interact with)
pub fn draw_placeholder(frame: &mut Frame, message: &str, theme: &Theme) {
    let area = frame.area();

    let style = Style::default().fg(theme.muted).bg(theme.background);

    let placeholder =
        Paragraph::new(message).style(style).alignment(Alignment::Center).wrap(Wrap { trim: true });

    frame.render_widget(placeholder, centered_rect(area.width, 3, area));
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] =
        Layout::horizontal([Constraint::Length(width.min(area.width))]).flex(Flex::Center).areas(row);
    rect
}
