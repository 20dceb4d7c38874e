//! Visible line window that follows the cursor

use std::ops::Range;

/// Window of `height` lines starting at `top`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub top: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Viewport {
            top: 0,
            height: height.max(1),
        }
    }

    /// The window after scrolling as little as possible to show `row`
    pub fn follow(self, row: usize) -> Self {
        let top = if row < self.top {
            row
        } else if row >= self.top + self.height {
            row + 1 - self.height
        } else {
            self.top
        };
        Viewport { top, ..self }
    }

    /// Line indexes shown, clipped to `line_count`
    pub fn visible(&self, line_count: usize) -> Range<usize> {
        let start = self.top.min(line_count);
        let end = (self.top + self.height).min(line_count);
        start..end
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.top && row < self.top + self.height
    }
}
