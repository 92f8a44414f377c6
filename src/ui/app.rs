//! Main TUI application state and logic
//!
//! The app plays the debugger's part: it owns the [`DemoHost`], creates a
//! window for every pane of the current [`PaneLayout`] and registers it with
//! the [`WindowRegistry`], and fires the refresh after every step. Switching
//! layouts closes the panes that disappear (their windows are unregistered)
//! and opens fresh ones for the panes that appear.

use super::clipboard::{Clipboard, NoClipboard, Osc52Clipboard};
use super::panes::{
    self, display_window, frames_window, locals_window, threads_window, CommandWindow,
    MemoryWindow,
};
use super::region::PaneRegion;
use super::registry::WindowRegistry;
use super::viewport::Viewport;
use super::window::{ClickOutcome, Window};
use crate::config::{ClipboardMode, Config};
use crate::host::demo::DemoHost;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use rustc_hash::FxHashMap;
use std::io;
use std::time::Duration;
use tracing::{debug, info};

pub const REGISTERS: &str = "registers";
const REGISTER_COMMANDS: &str = "info registers\ninfo frame";

/// Which panes are on screen and where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneLayout {
    Locals,
    Display,
    LocalsDisplay,
    ThreadsFrames,
    Memory,
    All,
}

impl PaneLayout {
    pub const ALL: [PaneLayout; 6] = [
        PaneLayout::Locals,
        PaneLayout::Display,
        PaneLayout::LocalsDisplay,
        PaneLayout::ThreadsFrames,
        PaneLayout::Memory,
        PaneLayout::All,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PaneLayout::Locals => "locals",
            PaneLayout::Display => "display",
            PaneLayout::LocalsDisplay => "locals-display",
            PaneLayout::ThreadsFrames => "threads-frames",
            PaneLayout::Memory => "memory",
            PaneLayout::All => "all",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PaneLayout::ALL.into_iter().find(|l| l.name() == name)
    }

    pub fn next(self) -> Self {
        let i = PaneLayout::ALL.iter().position(|l| *l == self).unwrap_or(0);
        PaneLayout::ALL[(i + 1) % PaneLayout::ALL.len()]
    }

    /// Pane titles in focus order
    pub fn titles(self) -> &'static [&'static str] {
        match self {
            PaneLayout::Locals => &[panes::locals::TITLE],
            PaneLayout::Display => &[panes::display::TITLE],
            PaneLayout::LocalsDisplay => &[panes::locals::TITLE, panes::display::TITLE],
            PaneLayout::ThreadsFrames => &[
                panes::threads::TITLE,
                panes::frames::TITLE,
                panes::locals::TITLE,
            ],
            PaneLayout::Memory => &[panes::memory::TITLE, REGISTERS],
            PaneLayout::All => &[
                panes::locals::TITLE,
                panes::display::TITLE,
                panes::threads::TITLE,
                panes::frames::TITLE,
                panes::memory::TITLE,
                REGISTERS,
            ],
        }
    }

    /// Split `area` into one rectangle per title, same order as `titles`
    pub fn split(self, area: Rect) -> Vec<Rect> {
        let columns = |left: u16| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(left), Constraint::Percentage(100 - left)])
                .split(area)
        };
        let rows = |area: Rect, percentages: &[u16]| {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints(percentages.iter().map(|p| Constraint::Percentage(*p)))
                .split(area)
                .to_vec()
        };
        match self {
            PaneLayout::Locals | PaneLayout::Display => vec![area],
            PaneLayout::LocalsDisplay => columns(50).to_vec(),
            PaneLayout::ThreadsFrames => {
                let cols = columns(40);
                let mut areas = rows(cols[0], &[50, 50]);
                areas.push(cols[1]);
                areas
            }
            PaneLayout::Memory => rows(area, &[70, 30]),
            PaneLayout::All => {
                let cols = columns(55);
                let mut areas = rows(cols[0], &[60, 40]);
                areas.extend(rows(cols[1], &[20, 20, 35, 25]));
                areas
            }
        }
    }
}

/// The main application state
pub struct App {
    pub host: DemoHost,
    pub registry: WindowRegistry,
    config: Config,
    clipboard: Box<dyn Clipboard>,
    layout: PaneLayout,
    /// Index into the layout's titles
    focused: usize,
    regions: FxHashMap<&'static str, PaneRegion>,
    /// Inner pane rectangles from the last frame
    areas: Vec<(&'static str, Rect)>,
    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    pub fn new(host: DemoHost, config: Config, layout: PaneLayout) -> Self {
        let clipboard: Box<dyn Clipboard> = match config.clipboard {
            ClipboardMode::Osc52 => Box::new(Osc52Clipboard::stdout()),
            ClipboardMode::Off => Box::new(NoClipboard),
        };
        let mut app = App {
            host,
            registry: WindowRegistry::new(),
            config,
            clipboard,
            layout,
            focused: 0,
            regions: FxHashMap::default(),
            areas: Vec::new(),
            should_quit: false,
            status_message: String::from("Ready"),
        };
        app.apply_layout(layout);
        app
    }

    /// Use a different clipboard (e.g. an in-memory one under test)
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn layout(&self) -> PaneLayout {
        self.layout
    }

    pub fn focused_title(&self) -> &'static str {
        let titles = self.layout.titles();
        titles[self.focused.min(titles.len() - 1)]
    }

    pub fn region(&self, title: &str) -> Option<&PaneRegion> {
        self.regions.get(title)
    }

    /// Close panes that are not in `layout` and open the missing ones
    pub fn apply_layout(&mut self, layout: PaneLayout) {
        let wanted = layout.titles();
        let stale: Vec<&'static str> = self
            .regions
            .keys()
            .copied()
            .filter(|title| !wanted.contains(title))
            .collect();
        for title in stale {
            if let Some(region) = self.regions.remove(title) {
                region.close();
            }
            self.registry.unregister(title);
        }
        for &title in wanted {
            if !self.regions.contains_key(title) {
                let region = PaneRegion::new(0, 0);
                let window = self.open_window(title, Viewport::attach(region.clone()));
                self.regions.insert(title, region);
                self.registry.register(window);
            }
        }
        self.layout = layout;
        self.focused = 0;
        self.areas.clear();
        info!(layout = layout.name(), "layout applied");
        self.registry.refresh_all(&self.host);
    }

    fn open_window(&self, title: &'static str, viewport: Viewport) -> Box<dyn Window> {
        let cap = self.config.max_elements;
        match title {
            panes::locals::TITLE => Box::new(locals_window(viewport).with_max_elements(cap)),
            panes::display::TITLE => Box::new(display_window(viewport).with_max_elements(cap)),
            panes::threads::TITLE => Box::new(threads_window(viewport)),
            panes::frames::TITLE => Box::new(frames_window(viewport)),
            panes::memory::TITLE => Box::new(MemoryWindow::new(viewport)),
            _ => Box::new(CommandWindow::new(title, REGISTER_COMMANDS, viewport)),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key)
                    }
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let titles = self.layout.titles();
        let rects = self.layout.split(chunks[0]);
        let mut areas = Vec::with_capacity(titles.len());
        for (&title, &rect) in titles.iter().zip(rects.iter()) {
            let Some(region) = self.regions.get(title) else {
                continue;
            };
            let (width, height) = panes::inner_size(rect);
            let resized = self
                .registry
                .get(title)
                .is_some_and(|w| w.viewport().width() != width || w.viewport().height() != height);
            if resized {
                region.set_size(width, height);
                if let Some(window) = self.registry.get_mut(title) {
                    window.resized(&self.host);
                }
            }
            let focused = title == self.focused_title();
            panes::render_pane(frame, rect, region, focused);
            areas.push((
                title,
                Rect::new(rect.x + 1, rect.y + 1, width as u16, height as u16),
            ));
        }
        self.areas = areas;

        panes::render_status_bar(
            frame,
            chunks[1],
            self.layout.name(),
            self.host.steps() as usize,
            &self.status_message,
        );
    }

    /// The debugger stopped again; every window catches up
    pub fn step(&mut self) {
        self.host.step();
        let refreshed = self.registry.refresh_all(&self.host);
        self.status_message = format!("Stepped, {} windows refreshed", refreshed);
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let title = self.focused_title();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('n') | KeyCode::Char(' ') => self.step(),
            KeyCode::Char('l') => {
                let next = self.layout.next();
                self.apply_layout(next);
                self.status_message = format!("Layout {}", next.name());
            }
            KeyCode::Char('m') => self.follow_pin(),
            KeyCode::Tab => {
                self.focused = (self.focused + 1) % self.layout.titles().len();
            }
            KeyCode::BackTab => {
                let n = self.layout.titles().len();
                self.focused = (self.focused + n - 1) % n;
            }
            KeyCode::Up => self.registry.scroll(title, &self.host, -1, 0),
            KeyCode::Down => self.registry.scroll(title, &self.host, 1, 0),
            KeyCode::Left => self.registry.scroll(title, &self.host, 0, -1),
            KeyCode::Right => self.registry.scroll(title, &self.host, 0, 1),
            KeyCode::PageUp | KeyCode::PageDown => {
                let page = self
                    .registry
                    .get(title)
                    .map_or(1, |w| w.viewport().height().max(1)) as isize;
                let delta = if key.code == KeyCode::PageUp { -page } else { page };
                self.registry.scroll(title, &self.host, delta, 0);
            }
            _ => {}
        }
    }

    /// Point the memory window at the pinned local (`$lv`)
    fn follow_pin(&mut self) {
        if !self.registry.contains(panes::memory::TITLE) {
            self.apply_layout(PaneLayout::Memory);
        }
        let host = &self.host;
        let followed = self
            .registry
            .downcast_mut::<MemoryWindow>(panes::memory::TITLE)
            .map(|memory| {
                let followed = memory.follow_slot(host, panes::locals::PIN_SLOT);
                memory.refill(host);
                memory.redraw();
                followed
            })
            .unwrap_or(false);
        self.status_message = if followed {
            "Memory follows $lv".to_string()
        } else {
            "Nothing pinned: right-click a local first".to_string()
        };
    }

    /// Handle mouse events on the pane under the pointer
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let Some(&(title, inner)) = self
            .areas
            .iter()
            .find(|(_, r)| contains(r, mouse.column, mouse.row))
        else {
            return;
        };
        let x = (mouse.column - inner.x) as usize;
        let y = (mouse.row - inner.y) as usize;
        match mouse.kind {
            MouseEventKind::Down(button) => {
                if let Some(i) = self.layout.titles().iter().position(|t| *t == title) {
                    self.focused = i;
                }
                let outcome = self.registry.click(
                    title,
                    &mut self.host,
                    self.clipboard.as_mut(),
                    x,
                    y,
                    button,
                );
                debug!(title, x, y, ?button, ?outcome, "click");
                match outcome {
                    ClickOutcome::Handled => self.status_message = "Copied".to_string(),
                    ClickOutcome::RefreshAll => {
                        self.status_message = "Context switched".to_string()
                    }
                    ClickOutcome::Ignored | ClickOutcome::Redrawn => {}
                }
            }
            MouseEventKind::ScrollUp => self.registry.scroll(title, &self.host, -1, 0),
            MouseEventKind::ScrollDown => self.registry.scroll(title, &self.host, 1, 0),
            MouseEventKind::ScrollLeft => self.registry.scroll(title, &self.host, 0, -1),
            MouseEventKind::ScrollRight => self.registry.scroll(title, &self.host, 0, 1),
            _ => {}
        }
    }
}

fn contains(rect: &Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}
