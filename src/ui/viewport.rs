//! Scrollable text viewport
//!
//! A [`Viewport`] owns the styled lines a window produced plus the vertical
//! and horizontal scroll offsets, and paints the visible slice into its
//! [`Region`]. Scrolling repaints only when an offset actually moves.

use super::ansi::clip_columns;
use super::region::Region;

pub struct Viewport {
    region: Box<dyn Region>,
    lines: Vec<String>,
    line_offset: usize,
    col_offset: usize,
}

impl Viewport {
    /// Bind to `region` with both offsets at zero
    pub fn attach(region: impl Region + 'static) -> Self {
        Viewport {
            region: Box::new(region),
            lines: Vec::new(),
            line_offset: 0,
            col_offset: 0,
        }
    }

    pub fn region(&self) -> &dyn Region {
        self.region.as_ref()
    }

    pub fn region_mut(&mut self) -> &mut dyn Region {
        self.region.as_mut()
    }

    pub fn is_valid(&self) -> bool {
        self.region.is_valid()
    }

    pub fn height(&self) -> usize {
        self.region.height()
    }

    pub fn width(&self) -> usize {
        self.region.width()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the buffer; offsets are kept and fixed up by the next paint
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    pub fn line_offset(&self) -> usize {
        self.line_offset
    }

    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Move the window without painting
    pub fn set_line_offset(&mut self, offset: usize) {
        self.line_offset = offset;
    }

    pub fn scroll_vertical(&mut self, delta: isize) {
        let last = self.lines.len().saturating_sub(1);
        let offset = self.line_offset.saturating_add_signed(delta).min(last);
        if offset != self.line_offset {
            self.line_offset = offset;
            self.paint();
        }
    }

    pub fn scroll_horizontal(&mut self, delta: isize) {
        let offset = self.col_offset.saturating_add_signed(delta);
        if offset != self.col_offset {
            self.col_offset = offset;
            self.paint();
        }
    }

    /// Draw the visible slice, pulling the window back if it runs past the
    /// end of the buffer
    pub fn paint(&mut self) {
        let height = self.region.height();
        let len = self.lines.len();
        if self.line_offset > 0 && self.line_offset + height > len {
            self.line_offset = len.saturating_sub(height);
        }
        let start = self.line_offset;
        let stop = (start + height).min(len);
        if stop > start {
            let width = self.region.width();
            let text = self.lines[start..stop]
                .iter()
                .map(|line| clip_columns(line, self.col_offset, width))
                .collect::<Vec<_>>()
                .join("\n");
            self.region.write(&text, true);
        } else {
            self.region.erase();
        }
    }
}
