//! Colors for the guide screen
//!
//! A [`Theme`] names colors by the part of the guide they paint rather than by
//! palette slot, so a custom theme in `config.json` reads like the screen.

mod tokyo_night;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// A color theme for the guide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    /// Screen background
    pub background: Color,
    /// Background of overlays (help)
    pub surface: Color,

    /// Body text of an open module
    pub text: Color,
    /// Module titles and the progress label
    pub heading: Color,
    /// Introduction, hints and pending controls
    pub muted: Color,

    /// Guide title, open module, key names and the back-to-top control
    pub accent: Color,
    /// Completed modules, progress fill and the banner
    pub completed: Color,
    /// Unfilled part of the progress gauge
    pub progress_track: Color,
    /// Footer status messages
    pub message: Color,

    pub border: Color,
    pub border_focused: Color,
    /// Background of the focused module header
    pub focus: Color,
}

impl Theme {
    /// Names of the built-in themes
    pub const BUILT_IN: [&'static str; 2] = ["Tokyo Night", "Tokyo Night Storm"];

    /// Look up a built-in theme by name (case-insensitive)
    pub fn named(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "tokyo night" => Some(Self::tokyo_night()),
            "tokyo night storm" => Some(Self::tokyo_night_storm()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}
