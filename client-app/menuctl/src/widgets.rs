use std::ops::Range;

/// Selection cursor over a list shown through a fixed-height window.
#[derive(Debug, Clone)]
pub struct ListCursor {
    index: usize,
    offset: usize,
    window: usize,
}

impl ListCursor {
    pub fn new(window: usize) -> Self {
        Self {
            index: 0,
            offset: 0,
            window: window.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn up(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
        if self.index < self.offset {
            self.offset = self.index;
        }
    }

    pub fn down(&mut self, len: usize) {
        if self.index < len.saturating_sub(1) {
            self.index += 1;
        }
        if self.index >= self.offset + self.window {
            self.offset = self.index + 1 - self.window;
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.offset = 0;
    }

    /// Keeps the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        self.index = self.index.min(len - 1);
        self.offset = self
            .offset
            .min(self.index)
            .min(len.saturating_sub(self.window));
        if self.index >= self.offset + self.window {
            self.offset = self.index + 1 - self.window;
        }
    }

    /// Positions currently on screen.
    pub fn visible(&self, len: usize) -> Range<usize> {
        self.offset.min(len)..(self.offset + self.window).min(len)
    }
}
