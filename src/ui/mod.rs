//! UI rendering components

pub mod guide_screen;
pub mod help;
pub mod layout;

use ratatui::Frame;

use crate::app::state::AppState;
use crate::guide::ModuleGuide;
use crate::store::KeyValueStore;
use crate::theme::Theme;

/// Main draw function
pub fn draw<S: KeyValueStore>(
    frame: &mut Frame,
    guide: &mut ModuleGuide<S>,
    state: &mut AppState,
    theme: &Theme,
) {
    if !guide.is_initialized() {
        layout::draw_placeholder(
            frame,
            "No guide found. The guide file needs a top-level '# Title' heading. Press q to quit.",
            theme,
        );
        return;
    }

    guide_screen::draw(frame, guide, state, theme);

    if state.show_help {
        help::draw(frame, theme);
    }
}
