//! The window contract shared by every pane
//!
//! A window turns host state into lines (`refill`), paints them through its
//! [`Viewport`] (`redraw`) and reacts to clicks and scrolling. Refills never
//! paint on their own; whoever triggers one redraws afterwards.

use super::clipboard::Clipboard;
use super::viewport::Viewport;
use crate::host::Host;
use crossterm::event::MouseButton;
use std::any::Any;

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    /// Acted on without changing what is shown (e.g. a copy)
    Handled,
    /// Only the clicked window changed and it already repainted
    Redrawn,
    /// The evaluation context changed; every window must refresh
    RefreshAll,
}

pub trait Window: Any {
    fn title(&self) -> &str;

    fn viewport(&self) -> &Viewport;

    fn viewport_mut(&mut self) -> &mut Viewport;

    fn is_valid(&self) -> bool {
        self.viewport().is_valid()
    }

    /// Recompute the lines from the host's current state
    fn refill(&mut self, host: &dyn Host);

    fn redraw(&mut self) {
        self.viewport_mut().paint();
    }

    /// The region changed size
    fn resized(&mut self, _host: &dyn Host) {
        self.redraw();
    }

    /// `x`/`y` are relative to the region's top-left corner
    fn click(
        &mut self,
        _host: &mut dyn Host,
        _clipboard: &mut dyn Clipboard,
        _x: usize,
        _y: usize,
        _button: MouseButton,
    ) -> ClickOutcome {
        ClickOutcome::Ignored
    }

    fn vscroll(&mut self, _host: &dyn Host, delta: isize) {
        self.viewport_mut().scroll_vertical(delta);
    }

    fn hscroll(&mut self, delta: isize) {
        self.viewport_mut().scroll_horizontal(delta);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
