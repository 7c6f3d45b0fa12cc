//! Application state definitions

use ratatui::layout::{Position, Rect};

/// Shell state that sits around the guide component
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Card the keyboard acts on
    pub focus: usize,

    /// Help overlay shown
    pub show_help: bool,

    /// Where the guide content was last drawn (updated on render)
    pub content_area: Rect,

    /// Where the back-to-top control was last drawn, if it was
    pub back_to_top_area: Option<Rect>,

    /// Status message for the footer
    pub message: Option<String>,
}

impl AppState {
    /// Move focus down, stopping at the last card
    pub fn focus_next(&mut self, card_count: usize) {
        if self.focus + 1 < card_count {
            self.focus += 1;
        }
    }

    /// Move focus up, stopping at the first card
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_first(&mut self) {
        self.focus = 0;
    }

    pub fn focus_last(&mut self, card_count: usize) {
        self.focus = card_count.saturating_sub(1);
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Whether a screen cell lies on the back-to-top control
    pub fn hits_back_to_top(&self, column: u16, row: u16) -> bool {
        self.back_to_top_area.is_some_and(|area| area.contains(Position::new(column, row)))
    }

    /// Translate a screen cell into content viewport coordinates
    pub fn to_content(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let area = self.content_area;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        Some(((row - area.y) as usize, (column - area.x) as usize))
    }
}
