//! Drawable regions
//!
//! A [`Region`] is the rectangle a window draws into. The host owns its
//! geometry and lifetime; windows only write text, erase and query the size.
//!
//! [`PaneRegion`] is the in-process implementation: a shared buffer that the
//! application resizes every frame and draws as a ratatui pane.

use std::cell::RefCell;
use std::rc::Rc;

pub trait Region {
    fn height(&self) -> usize;
    fn width(&self) -> usize;
    fn title(&self) -> String;
    fn set_title(&mut self, title: &str);
    /// Replace the region's contents with `text` (newline-separated rows)
    fn write(&mut self, text: &str, full_redraw: bool);
    fn erase(&mut self);
    /// False once the host tore the region down
    fn is_valid(&self) -> bool;
}

#[derive(Debug, Default)]
struct PaneState {
    title: String,
    width: usize,
    height: usize,
    text: String,
    valid: bool,
    writes: usize,
}

/// Shared handle to a pane's buffer; clones refer to the same pane
#[derive(Debug, Clone, Default)]
pub struct PaneRegion {
    state: Rc<RefCell<PaneState>>,
}

impl PaneRegion {
    pub fn new(width: usize, height: usize) -> Self {
        PaneRegion {
            state: Rc::new(RefCell::new(PaneState {
                width,
                height,
                valid: true,
                ..PaneState::default()
            })),
        }
    }

    pub fn set_size(&self, width: usize, height: usize) {
        let mut state = self.state.borrow_mut();
        state.width = width;
        state.height = height;
    }

    /// Tear the region down; windows drawing into it stop refreshing
    pub fn close(&self) {
        let mut state = self.state.borrow_mut();
        state.valid = false;
        state.text.clear();
    }

    /// Current contents, one entry per row
    pub fn rows(&self) -> Vec<String> {
        let state = self.state.borrow();
        if state.text.is_empty() {
            return Vec::new();
        }
        state.text.split('\n').map(str::to_string).collect()
    }

    /// How many times the pane was written or erased
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }
}

impl Region for PaneRegion {
    fn height(&self) -> usize {
        self.state.borrow().height
    }

    fn width(&self) -> usize {
        self.state.borrow().width
    }

    fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.state.borrow_mut().title = title.to_string();
    }

    fn write(&mut self, text: &str, _full_redraw: bool) {
        let mut state = self.state.borrow_mut();
        state.text = text.to_string();
        state.writes += 1;
    }

    fn erase(&mut self) {
        let mut state = self.state.borrow_mut();
        state.text.clear();
        state.writes += 1;
    }

    fn is_valid(&self) -> bool {
        self.state.borrow().valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_buffer() {
        let pane = PaneRegion::new(10, 2);
        let mut handle = pane.clone();
        handle.set_title("locals");
        handle.write("a\nb", true);
        assert_eq!(pane.title(), "locals");
        assert_eq!(pane.rows(), vec!["a", "b"]);
        pane.close();
        assert!(!handle.is_valid());
        assert!(pane.rows().is_empty());
    }
}
