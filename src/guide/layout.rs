//! Row geometry of the scrollable guide content
//!
//! Content is laid out top to bottom as: introduction rows, then for every
//! card a single header row followed (for the open card only) by its body
//! rows, then the completion banner when it is visible.

/// Columns the body is indented by
pub const BODY_INDENT: usize = 4;

/// Rows taken by the completion banner
pub const BANNER_HEIGHT: usize = 3;

/// Columns at the right end of a header row that belong to the complete control
pub const COMPLETE_CONTROL_WIDTH: usize = 19;

/// What occupies a content row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Intro { line: usize },
    Header(usize),
    Body { card: usize, line: usize },
    Banner { line: usize },
}

/// Computed row positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuideLayout {
    intro_rows: usize,
    card_tops: Vec<usize>,
    open: Option<(usize, usize)>,
    banner_top: Option<usize>,
    height: usize,
}

impl GuideLayout {
    /// Lay out `card_count` cards below `intro_rows` rows of introduction
    ///
    /// `open` is the expanded card together with the number of body rows
    /// currently shown for it.
    pub fn compute(
        intro_rows: usize,
        card_count: usize,
        open: Option<(usize, usize)>,
        banner_visible: bool,
    ) -> Self {
        let open = open.filter(|(card, _)| *card < card_count);

        let mut card_tops = Vec::with_capacity(card_count);
        let mut y = intro_rows;
        for index in 0..card_count {
            card_tops.push(y);
            y += 1;
            if let Some((card, rows)) = open {
                if card == index {
                    y += rows;
                }
            }
        }

        let banner_top = banner_visible.then_some(y);
        if banner_visible {
            y += BANNER_HEIGHT;
        }

        Self { intro_rows, card_tops, open, banner_top, height: y }
    }

    /// Total rows of content
    pub fn content_height(&self) -> usize {
        self.height
    }

    /// Row of the header of card `index`
    pub fn card_top(&self, index: usize) -> Option<usize> {
        self.card_tops.get(index).copied()
    }

    /// First row of the banner, when shown
    pub fn banner_top(&self) -> Option<usize> {
        self.banner_top
    }

    /// Find what occupies content row `row`
    pub fn region_at(&self, row: usize) -> Option<Region> {
        if row >= self.height {
            return None;
        }
        if row < self.intro_rows {
            return Some(Region::Intro { line: row });
        }
        if let Some(top) = self.banner_top {
            if row >= top {
                return Some(Region::Banner { line: row - top });
            }
        }

        let after = self.card_tops.partition_point(|&top| top <= row);
        let card = after.checked_sub(1)?;
        let top = self.card_tops[card];
        if row == top {
            return Some(Region::Header(card));
        }
        match self.open {
            Some((open, rows)) if open == card && row <= top + rows => {
                Some(Region::Body { card, line: row - top - 1 })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collapsed_cards_are_one_row_each() {
        let layout = GuideLayout::compute(2, 3, None, false);
        assert_eq!(layout.card_top(0), Some(2));
        assert_eq!(layout.card_top(2), Some(4));
        assert_eq!(layout.content_height(), 5);
    }

    #[test]
    fn open_card_pushes_later_cards_down() {
        let layout = GuideLayout::compute(0, 3, Some((0, 4)), false);
        assert_eq!(layout.card_top(1), Some(5));
        assert_eq!(layout.card_top(2), Some(6));
        assert_eq!(layout.content_height(), 7);
    }

    #[test]
    fn regions_cover_every_row() {
        let layout = GuideLayout::compute(1, 2, Some((1, 2)), true);

        assert_eq!(layout.region_at(0), Some(Region::Intro { line: 0 }));
        assert_eq!(layout.region_at(1), Some(Region::Header(0)));
        assert_eq!(layout.region_at(2), Some(Region::Header(1)));
        assert_eq!(layout.region_at(3), Some(Region::Body { card: 1, line: 0 }));
        assert_eq!(layout.region_at(4), Some(Region::Body { card: 1, line: 1 }));
        assert_eq!(layout.region_at(5), Some(Region::Banner { line: 0 }));
        assert_eq!(layout.region_at(7), Some(Region::Banner { line: 2 }));
        assert_eq!(layout.region_at(8), None);
    }

    #[test]
    fn out_of_range_open_card_is_ignored() {
        let layout = GuideLayout::compute(0, 2, Some((5, 10)), false);
        assert_eq!(layout.content_height(), 2);
    }
}
