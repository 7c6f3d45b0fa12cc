//! Content model for module guides
//!
//! A guide is a titled root container holding an optional introduction and an
//! ordered list of module cards. Card bodies are kept as blocks and wrapped to
//! the viewport width on demand.

use serde::{Deserialize, Serialize};

/// A parsed guide document (the root container)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideDocument {
    /// Display title
    pub title: String,
    /// Text shown above the first module
    pub introduction: Vec<BodyBlock>,
    /// Module cards in display order
    pub modules: Vec<ModuleCard>,
}

impl GuideDocument {
    /// Create an empty guide with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), introduction: Vec::new(), modules: Vec::new() }
    }

    /// Find a module by its identifier
    pub fn find_module(&self, id: &str) -> Option<&ModuleCard> {
        self.modules.iter().find(|m| m.id == id)
    }
}

/// One accordion item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCard {
    /// Stable identifier, used as the persisted completion key
    pub id: String,
    /// Position in the guide (1-indexed, for display)
    pub number: usize,
    /// Header text
    pub title: String,
    /// Body content revealed when the card is open
    pub body: Vec<BodyBlock>,
}

impl ModuleCard {
    /// Create a card with an empty body
    pub fn new(id: impl Into<String>, number: usize, title: impl Into<String>) -> Self {
        Self { id: id.into(), number, title: title.into(), body: Vec::new() }
    }

    /// Add a block to the body
    pub fn with_block(mut self, block: BodyBlock) -> Self {
        self.body.push(block);
        self
    }
}

/// A block of body content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyBlock {
    /// Flowing text
    Paragraph(String),
    /// A list item with its marker ("•", "3.", "  •" for nested items)
    Item { marker: String, text: String },
    /// Preformatted lines, never wrapped
    Code(Vec<String>),
}

impl BodyBlock {
    fn is_item(&self) -> bool {
        matches!(self, BodyBlock::Item { .. })
    }

    fn wrap_into(&self, width: usize, out: &mut Vec<String>) {
        match self {
            BodyBlock::Paragraph(text) => {
                out.extend(textwrap::wrap(text, width).into_iter().map(|l| l.into_owned()));
            }
            BodyBlock::Item { marker, text } => {
                let first = format!("{marker} ");
                let rest = " ".repeat(first.chars().count());
                let options =
                    textwrap::Options::new(width).initial_indent(&first).subsequent_indent(&rest);
                out.extend(textwrap::wrap(text, options).into_iter().map(|l| l.into_owned()));
            }
            BodyBlock::Code(lines) => {
                out.extend(lines.iter().map(|l| format!("  {l}")));
            }
        }
    }
}

/// Wrap blocks into display lines
///
/// Blocks are separated by a blank line, except between consecutive list items.
pub fn wrap_blocks(blocks: &[BodyBlock], width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut previous: Option<&BodyBlock> = None;

    for block in blocks {
        if let Some(prev) = previous {
            if !(prev.is_item() && block.is_item()) {
                lines.push(String::new());
            }
        }
        block.wrap_into(width, &mut lines);
        previous = Some(block);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn find_module_by_id() {
        let mut guide = GuideDocument::new("Guide");
        guide.modules.push(ModuleCard::new("intro", 1, "Introduction"));
        guide.modules.push(ModuleCard::new("setup", 2, "Setup"));

        assert_eq!(guide.find_module("setup").map(|m| m.number), Some(2));
        assert!(guide.find_module("missing").is_none());
    }

    #[test]
    fn paragraphs_are_separated_by_blank_line() {
        let blocks = vec![
            BodyBlock::Paragraph("First paragraph".into()),
            BodyBlock::Paragraph("Second".into()),
        ];
        assert_eq!(wrap_blocks(&blocks, 40), vec!["First paragraph", "", "Second"]);
    }

    #[test]
    fn list_items_stay_together_and_hang_indent() {
        let blocks = vec![
            BodyBlock::Item { marker: "•".into(), text: "one two three four".into() },
            BodyBlock::Item { marker: "•".into(), text: "five".into() },
        ];
        assert_eq!(wrap_blocks(&blocks, 10), vec!["• one two", "  three", "  four", "• five"]);
    }

    #[test]
    fn code_lines_are_not_wrapped() {
        let blocks = vec![BodyBlock::Code(vec!["let x = a_very_long_identifier;".into()])];
        assert_eq!(wrap_blocks(&blocks, 8), vec!["  let x = a_very_long_identifier;"]);
    }

    #[test]
    fn zero_width_does_not_panic() {
        let blocks = vec![BodyBlock::Paragraph("abc".into())];
        assert!(!wrap_blocks(&blocks, 0).is_empty());
    }
}
