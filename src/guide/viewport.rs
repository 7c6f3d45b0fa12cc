//! Visible window over the guide content

/// Scroll position and size of the visible area, in rows and columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible content row
    pub offset: usize,
    /// Visible rows
    pub height: usize,
    /// Visible columns
    pub width: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset: 0, height: 24, width: 80 }
    }
}

impl Viewport {
    /// Largest offset that still fills the viewport
    pub fn max_offset(&self, content_height: usize) -> usize {
        content_height.saturating_sub(self.height)
    }

    /// Scroll to `offset`, clamped to the content
    pub fn scroll_to(&mut self, offset: usize, content_height: usize) {
        self.offset = offset.min(self.max_offset(content_height));
    }

    /// Scroll by a signed number of rows
    pub fn scroll_by(&mut self, delta: isize, content_height: usize) {
        let target = self.offset.saturating_add_signed(delta);
        self.scroll_to(target, content_height);
    }

    /// Re-apply the clamp after the content changed size
    pub fn clamp(&mut self, content_height: usize) {
        self.scroll_to(self.offset, content_height);
    }

    /// Whether content row `row` is on screen
    pub fn contains(&self, row: usize) -> bool {
        row >= self.offset && row < self.offset + self.height
    }

    /// Scroll the least amount needed to bring `row` on screen
    pub fn reveal(&mut self, row: usize, content_height: usize) {
        if row < self.offset {
            self.scroll_to(row, content_height);
        } else if self.height > 0 && row >= self.offset + self.height {
            self.scroll_to(row + 1 - self.height, content_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(offset: usize, height: usize) -> Viewport {
        Viewport { offset, height, width: 80 }
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut vp = viewport(0, 10);
        vp.scroll_by(100, 25);
        assert_eq!(vp.offset, 15);
        vp.scroll_by(-100, 25);
        assert_eq!(vp.offset, 0);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut vp = viewport(0, 10);
        vp.scroll_by(3, 5);
        assert_eq!(vp.offset, 0);
    }

    #[test]
    fn reveal_scrolls_minimally() {
        let mut vp = viewport(10, 5);
        vp.reveal(12, 100);
        assert_eq!(vp.offset, 10);
        vp.reveal(20, 100);
        assert_eq!(vp.offset, 16);
        vp.reveal(3, 100);
        assert_eq!(vp.offset, 3);
    }
}
