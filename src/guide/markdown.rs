//! Markdown loader for module guides
//!
//! The first level-1 heading is the root container. Every level-2 heading that
//! follows starts a module card; its `{#id}` attribute (or a slug of the title)
//! becomes the card identifier. Content between the root and the first card is
//! the introduction. A second level-1 heading ends the guide.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;

use super::error::GuideError;
use super::model::{BodyBlock, GuideDocument, ModuleCard};

/// Runs of characters that are not allowed in a slug (compiled once)
static NON_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Read and parse a guide file
pub fn load_guide(path: &Path) -> Result<Option<GuideDocument>, GuideError> {
    let markdown = fs::read_to_string(path)
        .map_err(|source| GuideError::Read { path: path.to_path_buf(), source })?;
    parse_guide(&markdown)
}

/// Parse a markdown string into a guide
///
/// Returns `Ok(None)` when the document has no root container.
pub fn parse_guide(markdown: &str) -> Result<Option<GuideDocument>, GuideError> {
    let options = Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let mut builder = GuideBuilder::default();

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                builder.flush_paragraph();
                builder.heading = Some((level, id.map(|id| id.to_string())));
            }
            Event::End(TagEnd::Heading(_)) => {
                if builder.end_heading()? {
                    break;
                }
            }

            Event::End(TagEnd::Paragraph) => {
                if builder.list_stack.is_empty() {
                    builder.flush_paragraph();
                } else {
                    builder.text.push(' ');
                }
            }

            Event::Start(Tag::List(first)) => {
                builder.flush_item();
                builder.flush_paragraph();
                builder.list_stack.push(first);
            }
            Event::End(TagEnd::List(_)) => {
                builder.flush_item();
                builder.list_stack.pop();
            }
            Event::Start(Tag::Item) => {
                builder.flush_item();
                builder.item_marker = Some(builder.next_marker());
            }
            Event::End(TagEnd::Item) => builder.flush_item(),
            Event::TaskListMarker(checked) => {
                builder.text.push_str(if checked { "[x] " } else { "[ ] " });
            }

            Event::Start(Tag::CodeBlock(_)) => {
                builder.flush_paragraph();
                builder.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                builder.in_code_block = false;
                let code = std::mem::take(&mut builder.code);
                let lines: Vec<String> = code.trim_end().lines().map(str::to_string).collect();
                if !lines.is_empty() {
                    builder.push_block(BodyBlock::Code(lines));
                }
            }

            Event::Text(text) => {
                if builder.in_code_block {
                    builder.code.push_str(&text);
                } else {
                    builder.text.push_str(&text);
                }
            }
            Event::Code(code) => {
                builder.text.push('`');
                builder.text.push_str(&code);
                builder.text.push('`');
            }
            Event::SoftBreak | Event::HardBreak => builder.text.push(' '),

            _ => {}
        }
    }

    builder.finish()
}

/// Turn a heading into an identifier ("Getting Started!" -> "getting-started")
pub fn slugify(title: &str) -> String {
    NON_SLUG_RE.replace_all(&title.to_lowercase(), "-").trim_matches('-').to_string()
}

#[derive(Default)]
struct GuideBuilder {
    document: Option<GuideDocument>,
    seen_ids: HashSet<String>,

    heading: Option<(HeadingLevel, Option<String>)>,
    text: String,

    list_stack: Vec<Option<u64>>,
    item_marker: Option<String>,

    in_code_block: bool,
    code: String,
}

impl GuideBuilder {
    /// Handle the end of a heading, returns true when the guide is finished
    fn end_heading(&mut self) -> Result<bool, GuideError> {
        let Some((level, id)) = self.heading.take() else {
            return Ok(false);
        };
        let title = std::mem::take(&mut self.text).trim().to_string();

        let Some(document) = self.document.as_mut() else {
            if level == HeadingLevel::H1 {
                self.document = Some(GuideDocument::new(title));
            }
            return Ok(false);
        };

        match level {
            HeadingLevel::H1 => return Ok(true),
            HeadingLevel::H2 => {
                let number = document.modules.len() + 1;
                let id = id
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| slugify(&title));
                let id = if id.is_empty() { format!("module-{number}") } else { id };

                if !self.seen_ids.insert(id.clone()) {
                    return Err(GuideError::DuplicateModule(id));
                }
                document.modules.push(ModuleCard::new(id, number, title));
            }
            _ => {
                if !title.is_empty() {
                    self.push_block(BodyBlock::Paragraph(title));
                }
            }
        }

        Ok(false)
    }

    /// Marker for the next item of the innermost list
    fn next_marker(&mut self) -> String {
        let depth = self.list_stack.len().saturating_sub(1);
        let indent = "  ".repeat(depth);
        match self.list_stack.last_mut() {
            Some(Some(n)) => {
                let marker = format!("{indent}{n}.");
                *n += 1;
                marker
            }
            _ => format!("{indent}•"),
        }
    }

    fn flush_paragraph(&mut self) {
        let text = std::mem::take(&mut self.text).trim().to_string();
        if !text.is_empty() {
            self.push_block(BodyBlock::Paragraph(text));
        }
    }

    fn flush_item(&mut self) {
        let text = std::mem::take(&mut self.text).trim().to_string();
        match self.item_marker.take() {
            Some(marker) if !text.is_empty() => self.push_block(BodyBlock::Item { marker, text }),
            Some(_) => {}
            None if !text.is_empty() => self.push_block(BodyBlock::Paragraph(text)),
            None => {}
        }
    }

    /// Append to the current module, or the introduction before the first one
    fn push_block(&mut self, block: BodyBlock) {
        let Some(document) = self.document.as_mut() else {
            return;
        };
        match document.modules.last_mut() {
            Some(module) => module.body.push(block),
            None => document.introduction.push(block),
        }
    }

    fn finish(mut self) -> Result<Option<GuideDocument>, GuideError> {
        self.flush_item();
        self.flush_paragraph();
        Ok(self.document)
    }
}
