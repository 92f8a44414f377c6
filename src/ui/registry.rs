//! Refresh coordination
//!
//! The [`WindowRegistry`] holds every live window, keyed by title. Once per
//! pause in the debuggee (the "before prompt" moment) [`refresh_all`] runs
//! refill-then-redraw on each window whose region is still valid. Windows
//! whose region was torn down are skipped, not removed: the host may hand
//! them a new region later.
//!
//! [`refresh_all`]: WindowRegistry::refresh_all

use super::clipboard::Clipboard;
use super::window::{ClickOutcome, Window};
use crate::host::Host;
use crossterm::event::MouseButton;
use tracing::{debug, trace};

#[derive(Default)]
pub struct WindowRegistry {
    windows: Vec<Box<dyn Window>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window, replacing (and returning) one with the same title
    pub fn register(&mut self, window: Box<dyn Window>) -> Option<Box<dyn Window>> {
        debug!(title = window.title(), "registering window");
        match self.position(window.title()) {
            Some(i) => Some(std::mem::replace(&mut self.windows[i], window)),
            None => {
                self.windows.push(window);
                None
            }
        }
    }

    pub fn unregister(&mut self, title: &str) -> Option<Box<dyn Window>> {
        let i = self.position(title)?;
        debug!(title, "unregistering window");
        Some(self.windows.remove(i))
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.windows.iter().position(|w| w.title() == title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.windows.iter().map(|w| w.title())
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&dyn Window> {
        self.windows
            .iter()
            .find(|w| w.title() == title)
            .map(|w| w.as_ref())
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut (dyn Window + 'static)> {
        self.windows
            .iter_mut()
            .find(|w| w.title() == title)
            .map(|w| w.as_mut())
    }

    /// The window registered under `title`, if it is a `T`
    pub fn downcast_mut<T: Window>(&mut self, title: &str) -> Option<&mut T> {
        self.get_mut(title)?.as_any_mut().downcast_mut::<T>()
    }

    /// Refill and redraw every valid window; returns how many ran
    pub fn refresh_all(&mut self, host: &dyn Host) -> usize {
        let mut refreshed = 0;
        for window in self.windows.iter_mut() {
            if !window.is_valid() {
                trace!(title = window.title(), "skipping window with invalid region");
                continue;
            }
            window.refill(host);
            window.redraw();
            refreshed += 1;
        }
        debug!(refreshed, total = self.windows.len(), "refreshed windows");
        refreshed
    }

    /// Route a click; a click that changes the evaluation context refreshes
    /// every window
    pub fn click(
        &mut self,
        title: &str,
        host: &mut dyn Host,
        clipboard: &mut dyn Clipboard,
        x: usize,
        y: usize,
        button: MouseButton,
    ) -> ClickOutcome {
        let outcome = match self.get_mut(title) {
            Some(window) if window.is_valid() => window.click(host, clipboard, x, y, button),
            _ => ClickOutcome::Ignored,
        };
        if outcome == ClickOutcome::RefreshAll {
            self.refresh_all(host);
        }
        outcome
    }

    pub fn scroll(&mut self, title: &str, host: &dyn Host, vertical: isize, horizontal: isize) {
        if let Some(window) = self.get_mut(title) {
            if !window.is_valid() {
                return;
            }
            if vertical != 0 {
                window.vscroll(host, vertical);
            }
            if horizontal != 0 {
                window.hscroll(horizontal);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::region::PaneRegion;
    use crate::ui::viewport::Viewport;
    use std::any::Any;

    struct Counter {
        title: String,
        viewport: Viewport,
        refills: usize,
    }

    impl Counter {
        fn new(title: &str, pane: &PaneRegion) -> Box<Self> {
            Box::new(Counter {
                title: title.to_string(),
                viewport: Viewport::attach(pane.clone()),
                refills: 0,
            })
        }
    }

    impl Window for Counter {
        fn title(&self) -> &str {
            &self.title
        }
        fn viewport(&self) -> &Viewport {
            &self.viewport
        }
        fn viewport_mut(&mut self) -> &mut Viewport {
            &mut self.viewport
        }
        fn refill(&mut self, _host: &dyn Host) {
            self.refills += 1;
            self.viewport.set_lines(vec![format!("refill {}", self.refills)]);
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct NoHost;
    impl Host for NoHost {}

    #[test]
    fn test_refresh_skips_invalid_windows() {
        let live = PaneRegion::new(20, 2);
        let closed = PaneRegion::new(20, 2);
        let mut registry = WindowRegistry::new();
        registry.register(Counter::new("live", &live));
        registry.register(Counter::new("closed", &closed));
        closed.close();

        assert_eq!(registry.refresh_all(&NoHost), 1);
        assert_eq!(live.rows(), vec!["refill 1"]);
        assert_eq!(registry.downcast_mut::<Counter>("closed").map(|c| c.refills), Some(0));
    }

    #[test]
    fn test_register_replaces_same_title() {
        let pane = PaneRegion::new(20, 2);
        let mut registry = WindowRegistry::new();
        assert!(registry.register(Counter::new("locals", &pane)).is_none());
        assert!(registry.register(Counter::new("locals", &pane)).is_some());
        assert_eq!(registry.len(), 1);
        assert!(registry.unregister("locals").is_some());
        assert!(registry.is_empty());
        assert!(registry.unregister("locals").is_none());
    }
}
