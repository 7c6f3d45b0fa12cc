//! Tokyo Night palettes

use ratatui::style::Color;

use super::Theme;

const BLUE: Color = Color::Rgb(122, 162, 247); // #7aa2f7
const GREEN: Color = Color::Rgb(158, 206, 106); // #9ece6a
const CYAN: Color = Color::Rgb(125, 207, 255); // #7dcfff
const COMMENT: Color = Color::Rgb(86, 95, 137); // #565f89
const FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
const FG_DARK: Color = Color::Rgb(169, 177, 214); // #a9b1d6
const TERMINAL_BLACK: Color = Color::Rgb(65, 72, 104); // #414868

impl Theme {
    /// The darker Night variant
    pub fn tokyo_night() -> Self {
        Theme {
            name: "Tokyo Night".to_string(),
            background: Color::Rgb(26, 27, 38), // #1a1b26
            surface: Color::Rgb(36, 40, 59),    // #24283b
            text: FG_DARK,
            heading: FG,
            muted: COMMENT,
            accent: BLUE,
            completed: GREEN,
            progress_track: TERMINAL_BLACK,
            message: CYAN,
            border: TERMINAL_BLACK,
            border_focused: BLUE,
            focus: Color::Rgb(40, 52, 87), // #283457
        }
    }

    /// The Storm variant, a lighter blue-grey background
    pub fn tokyo_night_storm() -> Self {
        Theme {
            name: "Tokyo Night Storm".to_string(),
            background: Color::Rgb(36, 40, 59), // #24283b
            surface: Color::Rgb(31, 35, 53),    // #1f2335
            focus: Color::Rgb(46, 60, 100),     // #2e3c64
            ..Self::tokyo_night()
        }
    }
}
