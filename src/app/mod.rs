//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::guide::{ClickTarget, ModuleGuide};
use crate::store::KeyValueStore;
use crate::ui;
use input::{Action, WHEEL_ROWS};
use state::AppState;

/// Longest wait for input before redrawing
const FRAME: Duration = Duration::from_millis(16);

/// The main application
pub struct App<S> {
    /// Application configuration
    config: Config,

    /// The guide being shown
    guide: ModuleGuide<S>,

    /// Shell state around the guide
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new application instance
    pub fn new(config: Config, guide: ModuleGuide<S>) -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self { config, guide, state: AppState::default(), terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let theme = self.config.active_theme();

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.guide, &mut self.state, &theme);
            })?;

            // Wait for input, but no longer than the next animation step
            let now = Instant::now();
            let timeout = self
                .guide
                .next_due()
                .map(|due| due.saturating_duration_since(now))
                .unwrap_or(FRAME)
                .min(FRAME);

            if event::poll(timeout)? {
                let quit = match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match input::key_with_modifier_to_action(key.code, key.modifiers) {
                            Some(action) => {
                                apply_action(&mut self.guide, &mut self.state, action, now)
                            }
                            None => false,
                        }
                    }
                    Event::Mouse(mouse) => {
                        apply_mouse(&mut self.guide, &mut self.state, mouse, now);
                        false
                    }
                    _ => false,
                };
                if quit {
                    break;
                }
            }

            // Advance animations
            self.guide.tick(Instant::now());
        }

        self.restore_terminal()?;
        Ok(())
    }
}

impl<S> Drop for App<S> {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = self.terminal.show_cursor();
    }
}

/// Apply a keyboard action, returns true if the app should exit
pub fn apply_action<S: KeyValueStore>(
    guide: &mut ModuleGuide<S>,
    state: &mut AppState,
    action: Action,
    now: Instant,
) -> bool {
    let card_count = guide.cards().len();
    let page = guide.viewport().height.max(1) as isize;

    if state.show_help {
        // Any key closes the overlay
        state.show_help = false;
        return action == Action::Quit;
    }

    match action {
        Action::FocusNext => {
            state.focus_next(card_count);
            guide.reveal_card(state.focus);
        }
        Action::FocusPrev => {
            state.focus_prev();
            guide.reveal_card(state.focus);
        }
        Action::FocusFirst => {
            state.focus_first();
            guide.reveal_card(state.focus);
        }
        Action::FocusLast => {
            state.focus_last(card_count);
            guide.reveal_card(state.focus);
        }

        Action::ScrollUp => guide.scroll_by(-1),
        Action::ScrollDown => guide.scroll_by(1),
        Action::HalfPageUp => guide.scroll_by(-page / 2),
        Action::HalfPageDown => guide.scroll_by(page / 2),
        Action::PageUp => guide.scroll_by(-page),
        Action::PageDown => guide.scroll_by(page),
        Action::BackToTop => {
            if guide.back_to_top_visible() {
                guide.scroll_to_top(now);
            }
        }

        Action::ToggleOpen => {
            guide.toggle_accordion(state.focus, now);
        }
        Action::ToggleComplete => {
            let card = state.focus;
            toggle_completion(guide, state, card);
        }

        Action::Help => state.show_help = true,
        Action::Quit => return true,
    }

    false
}

/// Apply a mouse event
pub fn apply_mouse<S: KeyValueStore>(
    guide: &mut ModuleGuide<S>,
    state: &mut AppState,
    mouse: MouseEvent,
    now: Instant,
) {
    match mouse.kind {
        MouseEventKind::ScrollDown => guide.scroll_by(WHEEL_ROWS),
        MouseEventKind::ScrollUp => guide.scroll_by(-WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            if state.show_help {
                state.show_help = false;
                return;
            }
            if state.hits_back_to_top(mouse.column, mouse.row) {
                guide.scroll_to_top(now);
                return;
            }
            let Some((row, col)) = state.to_content(mouse.column, mouse.row) else {
                return;
            };
            match guide.click(row, col, now) {
                Some(ClickTarget::Header(card)) => state.focus = card,
                Some(ClickTarget::CompleteControl(card)) => {
                    state.focus = card;
                    set_completion_message(guide, state, card);
                }
                None => {}
            }
        }
        _ => {}
    }
}

fn toggle_completion<S: KeyValueStore>(
    guide: &mut ModuleGuide<S>,
    state: &mut AppState,
    card: usize,
) {
    if guide.toggle_completion(card).is_some() {
        set_completion_message(guide, state, card);
    }
}

fn set_completion_message<S>(guide: &ModuleGuide<S>, state: &mut AppState, card: usize) {
    let Some(module) = guide.cards().get(card) else {
        return;
    };
    let verb = if guide.is_completed(card) { "Completed" } else { "Reopened" };
    state.set_message(format!("{verb} '{}' ({})", module.title, guide.progress().label()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::{GuideOptions, parse_guide};
    use crate::store::MemoryStore;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    const GUIDE: &str = "# Guide\n\n## One\n\nFirst.\n\n## Two\n\nSecond.\n\n## Three\n\nThird.\n";

    fn guide() -> ModuleGuide<MemoryStore> {
        let document = parse_guide(GUIDE).unwrap();
        let options = GuideOptions { animation_speed: 0.0, ..GuideOptions::default() };
        let mut guide = ModuleGuide::new(document, MemoryStore::new(), options);
        guide.set_viewport(40, 10);
        guide.init();
        guide
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keyboard_opens_focused_card() {
        let mut guide = guide();
        let mut state = AppState::default();
        let now = Instant::now();

        apply_action(&mut guide, &mut state, Action::FocusNext, now);
        apply_action(&mut guide, &mut state, Action::ToggleOpen, now);
        assert!(guide.is_open(1));
    }

    #[test]
    fn keyboard_completion_sets_message() {
        let mut guide = guide();
        let mut state = AppState::default();

        apply_action(&mut guide, &mut state, Action::ToggleComplete, Instant::now());
        assert!(guide.is_completed(0));
        assert_eq!(state.message.as_deref(), Some("Completed 'One' (33% Complete)"));
        assert_eq!(guide.open_card(), None);
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let mut guide = guide();
        let mut state = AppState::default();
        let now = Instant::now();

        apply_action(&mut guide, &mut state, Action::Help, now);
        assert!(state.show_help);
        assert!(!apply_action(&mut guide, &mut state, Action::ToggleOpen, now));
        assert!(!state.show_help);
        assert_eq!(guide.open_card(), None);
    }

    #[test]
    fn quit_action_exits() {
        let mut guide = guide();
        let mut state = AppState::default();
        assert!(apply_action(&mut guide, &mut state, Action::Quit, Instant::now()));
    }

    #[test]
    fn mouse_click_on_control_completes_without_opening() {
        let mut guide = guide();
        let mut state = AppState { content_area: Rect::new(0, 3, 40, 10), ..Default::default() };
        let now = Instant::now();

        apply_mouse(&mut guide, &mut state, click(38, 4), now);
        assert!(guide.is_completed(1));
        assert_eq!(guide.open_card(), None);
        assert_eq!(state.focus, 1);

        apply_mouse(&mut guide, &mut state, click(1, 5), now);
        assert!(guide.is_open(2));
        assert_eq!(state.focus, 2);
    }

    #[test]
    fn click_outside_content_is_ignored() {
        let mut guide = guide();
        let mut state = AppState { content_area: Rect::new(0, 3, 40, 10), ..Default::default() };

        apply_mouse(&mut guide, &mut state, click(1, 0), Instant::now());
        assert_eq!(guide.open_card(), None);
    }
}
