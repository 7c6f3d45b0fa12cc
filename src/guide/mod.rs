//! The interactive module guide
//!
//! [`ModuleGuide`] owns every piece of widget state: the loaded document, the
//! completion set, which card is open, the viewport and any in-flight
//! animation. Rendering reads from it; input handlers mutate it.
//!
//! Opening a card keeps the clicked header at the same viewport row. The
//! header position is measured before the change, the change is applied
//! without animating the card that collapses, the header is measured again and
//! the viewport is shifted by the difference. The opened body is revealed
//! below its header over a few frames, which never moves the header itself.

pub mod accordion;
pub mod completion;
pub mod error;
pub mod layout;
pub mod markdown;
pub mod model;
pub mod progress;
pub mod schedule;
pub mod viewport;

use std::time::{Duration, Instant};

pub use accordion::{Accordion, Transition};
pub use completion::CompletionSet;
pub use error::GuideError;
pub use layout::{GuideLayout, Region};
pub use markdown::{load_guide, parse_guide};
pub use model::{BodyBlock, GuideDocument, ModuleCard};
pub use progress::Progress;
pub use schedule::{Continuation, Scheduler};
pub use viewport::Viewport;

use crate::config::Config;
use crate::store::KeyValueStore;
use layout::{BODY_INDENT, COMPLETE_CONTROL_WIDTH};

/// Storage key of the completion set
pub const STORAGE_KEY: &str = "completedModules";

/// Scroll offset (rows) past which the back-to-top control shows
pub const BACK_TO_TOP_THRESHOLD: usize = 300;

/// One animation frame at normal speed
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Frames a body reveal takes, whatever its length
const REVEAL_FRAMES: usize = 8;

/// Behaviour knobs for a guide
#[derive(Debug, Clone, PartialEq)]
pub struct GuideOptions {
    /// Key the completion set is stored under
    pub storage_key: String,
    /// Whether the back-to-top control exists
    pub back_to_top: bool,
    /// Offset the control appears after
    pub back_to_top_threshold: usize,
    /// Animation speed multiplier (1.0 = normal, 0.0 = instant)
    pub animation_speed: f32,
}

impl Default for GuideOptions {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            back_to_top: true,
            back_to_top_threshold: BACK_TO_TOP_THRESHOLD,
            animation_speed: 1.0,
        }
    }
}

impl From<&Config> for GuideOptions {
    fn from(config: &Config) -> Self {
        Self {
            storage_key: config.storage_key.clone(),
            back_to_top: config.back_to_top,
            back_to_top_threshold: config.back_to_top_threshold,
            animation_speed: config.animation_speed,
        }
    }
}

impl GuideOptions {
    /// Delay between animation steps, `None` when animations are off
    fn frame_interval(&self) -> Option<Duration> {
        if self.animation_speed.is_finite() && self.animation_speed > 0.0 {
            Some(FRAME_INTERVAL.div_f32(self.animation_speed.max(0.01)))
        } else {
            None
        }
    }
}

/// Which control a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A card header (accordion toggle)
    Header(usize),
    /// The complete control inside a card header
    CompleteControl(usize),
}

/// The guide component
#[derive(Debug)]
pub struct ModuleGuide<S> {
    document: Option<GuideDocument>,
    store: S,
    options: GuideOptions,

    completed: CompletionSet,
    progress: Progress,
    accordion: Accordion,
    /// Body rows of the open card shown so far
    revealed: usize,

    viewport: Viewport,
    intro_lines: Vec<String>,
    body_lines: Vec<Vec<String>>,
    back_to_top_visible: bool,

    scheduler: Scheduler,
    initialized: bool,
}

impl<S: KeyValueStore> ModuleGuide<S> {
    /// Create a guide over `document` (the root container, if one was found)
    pub fn new(document: Option<GuideDocument>, store: S, options: GuideOptions) -> Self {
        let mut guide = Self {
            document,
            store,
            options,
            completed: CompletionSet::default(),
            progress: Progress::default(),
            accordion: Accordion::default(),
            revealed: 0,
            viewport: Viewport::default(),
            intro_lines: Vec::new(),
            body_lines: Vec::new(),
            back_to_top_visible: false,
            scheduler: Scheduler::default(),
            initialized: false,
        };
        guide.rewrap();
        guide
    }

    /// Load persisted state, compute progress and enable input handling
    ///
    /// Returns false, leaving every handler inert, when there is no root container.
    pub fn init(&mut self) -> bool {
        if self.initialized {
            return true;
        }
        let Some(document) = &self.document else {
            tracing::error!("Guide root container not found; interactive features disabled");
            return false;
        };
        tracing::info!(
            title = %document.title,
            modules = document.modules.len(),
            "Initializing module guide"
        );

        self.load_state();
        self.update_progress();
        self.initialized = true;
        self.handle_scroll();
        true
    }

    /// Read the completion set from the store
    pub fn load_state(&mut self) {
        let cards = self.cards();
        let completed = CompletionSet::load(&self.store, &self.options.storage_key, |id| {
            cards.iter().any(|card| card.id == id)
        });
        tracing::debug!(completed = completed.len(), "Loaded completion state");
        self.completed = completed;
    }

    /// Write the completion set to the store
    pub fn save_state(&mut self) {
        self.completed.save(&mut self.store, &self.options.storage_key);
    }

    /// Recompute progress and banner visibility
    pub fn update_progress(&mut self) -> Progress {
        self.progress = Progress::new(self.completed.len(), self.cards().len());
        // The banner sits at the end of the content and may have appeared or gone
        let height = self.settled_layout().content_height();
        self.viewport.clamp(height);
        self.progress
    }

    /// Activate the header of card `index`
    pub fn toggle_accordion(&mut self, index: usize, now: Instant) -> Option<Transition> {
        if !self.initialized || index >= self.cards().len() {
            return None;
        }

        // Anything pending was computed against the old geometry
        self.scheduler.cancel_all();

        let before = self.layout().card_top(index).unwrap_or_default();
        let transition = self.accordion.toggle(index);

        match transition.opened {
            Some(card) => {
                self.start_reveal(card, now);

                let settled = self.settled_layout();
                let height = settled.content_height();
                let after = settled.card_top(index).unwrap_or_default();

                let target = (after + self.viewport.offset).saturating_sub(before);
                self.viewport.scroll_to(target, height);
                if !self.viewport.contains(after) {
                    self.viewport.scroll_to(after, height);
                }
            }
            None => {
                self.revealed = 0;
                let height = self.settled_layout().content_height();
                self.viewport.clamp(height);
            }
        }

        tracing::debug!(?transition, offset = self.viewport.offset, "Accordion toggled");
        self.handle_scroll();
        Some(transition)
    }

    /// Flip the completed flag of card `index`, returns the new flag
    ///
    /// Never touches the accordion.
    pub fn toggle_completion(&mut self, index: usize) -> Option<bool> {
        if !self.initialized {
            return None;
        }
        let id = self.cards().get(index)?.id.clone();

        let completed = self.completed.toggle(&id);
        tracing::info!(module = %id, completed, "Module completion toggled");

        self.save_state();
        self.update_progress();
        self.handle_scroll();
        Some(completed)
    }

    /// Update back-to-top visibility from the current offset
    pub fn handle_scroll(&mut self) {
        self.back_to_top_visible = self.initialized
            && self.options.back_to_top
            && self.viewport.offset > self.options.back_to_top_threshold;
    }

    /// Animate the viewport back to the first row
    pub fn scroll_to_top(&mut self, now: Instant) {
        if !self.initialized || !self.options.back_to_top {
            return;
        }
        self.cancel_scroll_animation();

        match self.options.frame_interval() {
            Some(_) if self.viewport.offset > 0 => {
                self.scheduler.schedule(now, Continuation::ScrollStep { target: 0 });
            }
            _ => {
                self.viewport.offset = 0;
                self.handle_scroll();
            }
        }
    }

    /// Scroll by a signed number of rows (wheel, page keys)
    pub fn scroll_by(&mut self, delta: isize) {
        if !self.initialized {
            return;
        }
        self.cancel_scroll_animation();
        let height = self.settled_layout().content_height();
        self.viewport.scroll_by(delta, height);
        self.handle_scroll();
    }

    /// Scroll the least amount needed to show the header of card `index`
    pub fn reveal_card(&mut self, index: usize) {
        if !self.initialized {
            return;
        }
        let Some(top) = self.layout().card_top(index) else {
            return;
        };
        self.cancel_scroll_animation();
        let height = self.settled_layout().content_height();
        self.viewport.reveal(top, height);
        self.handle_scroll();
    }

    /// Route a click at viewport `row`/`col`
    ///
    /// A click on the complete control only toggles completion; it never
    /// reaches the header underneath.
    pub fn click(&mut self, row: usize, col: usize, now: Instant) -> Option<ClickTarget> {
        if !self.initialized {
            return None;
        }
        let content_row = self.viewport.offset + row;
        let Some(Region::Header(card)) = self.layout().region_at(content_row) else {
            return None;
        };

        if col >= self.viewport.width.saturating_sub(COMPLETE_CONTROL_WIDTH) {
            self.toggle_completion(card);
            Some(ClickTarget::CompleteControl(card))
        } else {
            self.toggle_accordion(card, now);
            Some(ClickTarget::Header(card))
        }
    }

    /// Clear every completion
    pub fn reset_progress(&mut self) {
        if !self.initialized {
            return;
        }
        tracing::info!(cleared = self.completed.len(), "Resetting progress");
        self.completed.clear();
        self.save_state();
        self.update_progress();
        self.handle_scroll();
    }

    /// Resize the visible area
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        if width != self.viewport.width {
            let open = self.accordion.open_index();
            let was_settled = open.is_some_and(|card| self.revealed >= self.body_rows(card));

            self.viewport.width = width;
            self.rewrap();

            if let Some(card) = open {
                let full = self.body_rows(card);
                self.revealed = if was_settled { full } else { self.revealed.min(full) };
            }
        }
        self.viewport.height = height;

        let content = self.settled_layout().content_height();
        self.viewport.clamp(content);
        self.handle_scroll();
    }

    /// Run continuations that are due, returns true if anything changed
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = self.scheduler.poll(now);
        let changed = !fired.is_empty();

        for continuation in fired {
            match continuation {
                Continuation::RevealStep { card } => self.reveal_step(card, now),
                Continuation::ScrollStep { target } => self.scroll_step(target, now),
            }
        }

        changed
    }

    /// When the next continuation is due
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    fn start_reveal(&mut self, card: usize, now: Instant) {
        match self.options.frame_interval() {
            Some(interval) => {
                self.revealed = 0;
                self.scheduler.schedule(now + interval, Continuation::RevealStep { card });
            }
            None => self.revealed = self.body_rows(card),
        }
    }

    fn reveal_step(&mut self, card: usize, now: Instant) {
        if !self.accordion.is_open(card) {
            return;
        }
        let full = self.body_rows(card);
        let step = full.div_ceil(REVEAL_FRAMES).max(1);
        self.revealed = (self.revealed + step).min(full);

        if self.revealed < full {
            match self.options.frame_interval() {
                Some(interval) => {
                    self.scheduler.schedule(now + interval, Continuation::RevealStep { card });
                }
                None => self.revealed = full,
            }
        }
    }

    fn scroll_step(&mut self, target: usize, now: Instant) {
        let offset = self.viewport.offset;
        let remaining = offset.abs_diff(target);
        let step = (remaining / 3).max(1).min(remaining);
        self.viewport.offset = if offset > target { offset - step } else { offset + step };
        self.handle_scroll();

        if self.viewport.offset != target {
            match self.options.frame_interval() {
                Some(interval) => {
                    self.scheduler.schedule(now + interval, Continuation::ScrollStep { target });
                }
                None => {
                    self.viewport.offset = target;
                    self.handle_scroll();
                }
            }
        }
    }

    fn cancel_scroll_animation(&mut self) {
        self.scheduler.cancel_matching(|c| matches!(c, Continuation::ScrollStep { .. }));
    }

    fn rewrap(&mut self) {
        let width = self.viewport.width;
        let body_width = width.saturating_sub(BODY_INDENT);

        let (intro, bodies) = match &self.document {
            Some(document) => (
                model::wrap_blocks(&document.introduction, width),
                document.modules.iter().map(|m| model::wrap_blocks(&m.body, body_width)).collect(),
            ),
            None => (Vec::new(), Vec::new()),
        };
        self.intro_lines = intro;
        self.body_lines = bodies;
    }
}

impl<S> ModuleGuide<S> {
    fn intro_rows(&self) -> usize {
        if self.intro_lines.is_empty() { 0 } else { self.intro_lines.len() + 1 }
    }

    /// Rows the body of card `index` takes once fully open (text plus one padding row)
    pub fn body_rows(&self, index: usize) -> usize {
        self.body_lines.get(index).map_or(0, |lines| lines.len() + 1)
    }

    /// Geometry as currently drawn, including a partially revealed body
    pub fn layout(&self) -> GuideLayout {
        let open = self.accordion.open_index().map(|card| (card, self.revealed));
        GuideLayout::compute(
            self.intro_rows(),
            self.cards().len(),
            open,
            self.progress.banner_visible(),
        )
    }

    /// Geometry once every animation has finished
    fn settled_layout(&self) -> GuideLayout {
        let open = self.accordion.open_index().map(|card| (card, self.body_rows(card)));
        GuideLayout::compute(
            self.intro_rows(),
            self.cards().len(),
            open,
            self.progress.banner_visible(),
        )
    }

    /// The root container, if one was found
    pub fn document(&self) -> Option<&GuideDocument> {
        self.document.as_ref()
    }

    /// All module cards
    pub fn cards(&self) -> &[ModuleCard] {
        self.document.as_ref().map(|d| d.modules.as_slice()).unwrap_or(&[])
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn open_card(&self) -> Option<usize> {
        self.accordion.open_index()
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.accordion.is_open(index)
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.cards().get(index).is_some_and(|card| self.completed.contains(&card.id))
    }

    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn banner_visible(&self) -> bool {
        self.progress.banner_visible()
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.back_to_top_visible
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Wrapped introduction lines
    pub fn intro_lines(&self) -> &[String] {
        &self.intro_lines
    }

    /// Wrapped body lines of card `index`
    pub fn body_lines(&self, index: usize) -> &[String] {
        self.body_lines.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Body rows of the open card shown so far
    pub fn revealed_rows(&self) -> usize {
        self.revealed
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
