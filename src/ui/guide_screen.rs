//! The guide screen: progress header, accordion content and footer

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
};

use crate::app::state::AppState;
use crate::guide::layout::{BODY_INDENT, COMPLETE_CONTROL_WIDTH};
use crate::guide::{ModuleGuide, Region};
use crate::store::KeyValueStore;
use crate::theme::Theme;

/// Status indicators for modules
const STATUS_PENDING: &str = "○";
const STATUS_COMPLETED: &str = "✓";

const CONTROL_PENDING: &str = "[ ] Mark complete";
const CONTROL_COMPLETED: &str = "[✓] Completed";

const BANNER_TEXT: &str = "★ All modules complete. Well done! ★";
const BACK_TO_TOP_LABEL: &str = " ↑ Top ";

const HINT: &str = "j/k move · Enter open · m complete · t top · ? help · q quit";

/// Draw the guide screen and record where interactive areas ended up
pub fn draw<S: KeyValueStore>(
    frame: &mut Frame,
    guide: &mut ModuleGuide<S>,
    state: &mut AppState,
    theme: &Theme,
) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    draw_header(frame, chunks[0], guide, theme);

    let content = chunks[1];
    state.content_area = content;
    guide.set_viewport(content.width as usize, content.height as usize);
    draw_content(frame, content, guide, state.focus, theme);
    state.back_to_top_area = draw_back_to_top(frame, content, guide, theme);

    draw_footer(frame, chunks[2], state, theme);
}

/// Title block with the progress gauge
fn draw_header<S>(frame: &mut Frame, area: Rect, guide: &ModuleGuide<S>, theme: &Theme) {
    let title = guide.document().map(|d| d.title.as_str()).unwrap_or_default();
    let progress = guide.progress();

    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.background));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(theme.completed).bg(theme.progress_track))
        .ratio(progress.ratio())
        .label(Span::styled(
            progress.label(),
            Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(gauge, area);
}

/// Visible slice of the accordion
fn draw_content<S>(
    frame: &mut Frame,
    area: Rect,
    guide: &ModuleGuide<S>,
    focus: usize,
    theme: &Theme,
) {
    let layout = guide.layout();
    let width = area.width as usize;
    let offset = guide.viewport().offset;

    let lines: Vec<Line> = (offset..offset + area.height as usize)
        .map(|row| match layout.region_at(row) {
            Some(Region::Intro { line }) => {
                let text = guide.intro_lines().get(line).cloned().unwrap_or_default();
                Line::from(Span::styled(text, Style::default().fg(theme.muted)))
            }
            Some(Region::Header(card)) => header_line(guide, card, width, card == focus, theme),
            Some(Region::Body { card, line }) => {
                let text = guide.body_lines(card).get(line).map(String::as_str).unwrap_or("");
                Line::from(Span::styled(
                    format!("{}{}", " ".repeat(BODY_INDENT), text),
                    Style::default().fg(theme.text),
                ))
            }
            Some(Region::Banner { line: 1 }) => Line::from(Span::styled(
                BANNER_TEXT,
                Style::default().fg(theme.completed).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Some(Region::Banner { .. }) | None => Line::default(),
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// One card header row: marker, number and title on the left, the complete control on the right
fn header_line<'a, S>(
    guide: &'a ModuleGuide<S>,
    card: usize,
    width: usize,
    focused: bool,
    theme: &Theme,
) -> Line<'a> {
    let Some(module) = guide.cards().get(card) else {
        return Line::default();
    };
    let open = guide.is_open(card);
    let done = guide.is_completed(card);

    let marker = if open { "▼" } else { "▶" };
    let status = if done { STATUS_COMPLETED } else { STATUS_PENDING };
    let control = if done { CONTROL_COMPLETED } else { CONTROL_PENDING };

    let left_width = width.saturating_sub(COMPLETE_CONTROL_WIDTH);
    let left = fit(&format!("{marker} {status} {:02}. {}", module.number, module.title), left_width);
    let right = format!("{control:>w$}", w = COMPLETE_CONTROL_WIDTH.min(width));

    let base = if focused {
        Style::default().bg(theme.focus).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let title_color = if done {
        theme.completed
    } else if open {
        theme.accent
    } else {
        theme.heading
    };
    let control_color = if done { theme.completed } else { theme.muted };

    Line::from(vec![
        Span::styled(left, base.fg(title_color)),
        Span::styled(right, base.fg(control_color)),
    ])
}

/// Truncate or pad `text` to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let mut truncated: String = text.chars().take(width - 1).collect();
        truncated.push('…');
        truncated
    }
}

/// Floating control at the bottom-right of the content, when visible
fn draw_back_to_top<S>(
    frame: &mut Frame,
    area: Rect,
    guide: &ModuleGuide<S>,
    theme: &Theme,
) -> Option<Rect> {
    let label_width = BACK_TO_TOP_LABEL.chars().count() as u16;
    if !guide.back_to_top_visible() || area.width <= label_width || area.height == 0 {
        return None;
    }

    let rect = Rect::new(area.right() - label_width - 1, area.bottom() - 1, label_width, 1);
    let button = Paragraph::new(BACK_TO_TOP_LABEL).style(
        Style::default().fg(theme.background).bg(theme.accent).add_modifier(Modifier::BOLD),
    );

    frame.render_widget(Clear, rect);
    frame.render_widget(button, rect);
    Some(rect)
}

/// Status message or key hints
fn draw_footer(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let line = match &state.message {
        Some(message) => Line::from(Span::styled(message.clone(), Style::default().fg(theme.message))),
        None => Line::from(Span::styled(HINT, Style::default().fg(theme.muted))),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::{GuideOptions, parse_guide};
    use crate::store::MemoryStore;
    use crate::ui;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    const GUIDE: &str = "# Rust Basics\n\nStart here.\n\n## One\n\nFirst body.\n\n## Two\n\nSecond body.\n";

    fn setup(threshold: usize) -> (ModuleGuide<MemoryStore>, AppState, Terminal<TestBackend>) {
        let options = GuideOptions {
            animation_speed: 0.0,
            back_to_top_threshold: threshold,
            ..GuideOptions::default()
        };
        let mut guide = ModuleGuide::new(parse_guide(GUIDE).unwrap(), MemoryStore::new(), options);
        guide.init();
        let terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        (guide, AppState::default(), terminal)
    }

    fn render(
        terminal: &mut Terminal<TestBackend>,
        guide: &mut ModuleGuide<MemoryStore>,
        state: &mut AppState,
    ) -> String {
        let theme = Theme::default();
        terminal.draw(|frame| ui::draw(frame, guide, state, &theme)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn renders_progress_and_cards() {
        let (mut guide, mut state, mut terminal) = setup(300);
        let text = render(&mut terminal, &mut guide, &mut state);

        assert!(text.contains("Rust Basics"));
        assert!(text.contains("0% Complete"));
        assert!(text.contains("Start here."));
        assert!(text.contains("▶ ○ 01. One"));
        assert!(text.contains(CONTROL_PENDING));
        assert!(!text.contains("First body."));
        assert_eq!(state.content_area, Rect::new(0, 3, 60, 8));
    }

    #[test]
    fn open_card_shows_body() {
        let (mut guide, mut state, mut terminal) = setup(300);
        render(&mut terminal, &mut guide, &mut state);

        guide.toggle_accordion(1, Instant::now());
        let text = render(&mut terminal, &mut guide, &mut state);
        assert!(text.contains("▼ ○ 02. Two"));
        assert!(text.contains("    Second body."));
    }

    #[test]
    fn completing_everything_shows_banner() {
        let (mut guide, mut state, mut terminal) = setup(300);
        guide.toggle_completion(0);
        guide.toggle_completion(1);

        let text = render(&mut terminal, &mut guide, &mut state);
        assert!(text.contains("100% Complete"));
        assert!(text.contains(CONTROL_COMPLETED));
        assert!(text.contains(BANNER_TEXT));
    }

    #[test]
    fn back_to_top_control_is_recorded() {
        let (mut guide, mut state, mut terminal) = setup(0);
        render(&mut terminal, &mut guide, &mut state);
        assert!(state.back_to_top_area.is_none());

        guide.toggle_accordion(0, Instant::now());
        guide.toggle_completion(0);
        guide.toggle_completion(1);
        guide.scroll_by(2);
        let text = render(&mut terminal, &mut guide, &mut state);

        assert!(guide.back_to_top_visible());
        assert!(text.contains("↑ Top"));
        assert_eq!(state.back_to_top_area, Some(Rect::new(52, 10, 7, 1)));
    }

    #[test]
    fn missing_root_shows_placeholder() {
        let mut guide = ModuleGuide::new(None, MemoryStore::new(), GuideOptions::default());
        guide.init();
        let mut state = AppState::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();

        let text = render(&mut terminal, &mut guide, &mut state);
        assert!(text.contains("No guide found"));
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 0), "");
    }
}
