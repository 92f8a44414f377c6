//! Selection-list windows
//!
//! A [`ListWindow`] shows one line per entry of a [`SelectionSource`] and
//! highlights the selected one. Unlike trees it keeps no per-entry state: a
//! click maps the line back to the entry's id, asks the source to select it
//! and then every window refreshes, since selecting a thread or frame
//! changes what every other window evaluates in.

use super::clipboard::Clipboard;
use super::diff::{RESET, SELECTED};
use super::viewport::Viewport;
use super::window::{ClickOutcome, Window};
use crate::errors::InspectError;
use crate::host::Host;
use crossterm::event::MouseButton;
use std::any::Any;
use tracing::{debug, warn};

/// One line of a selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Handed back to [`SelectionSource::select`]
    pub id: u64,
    /// Rendered before the highlight, e.g. `"3: "`
    pub prefix: String,
    pub text: String,
    pub selected: bool,
}

impl ListEntry {
    pub fn new(id: u64, prefix: impl Into<String>, text: impl Into<String>) -> Self {
        ListEntry {
            id,
            prefix: prefix.into(),
            text: text.into(),
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn render(&self) -> String {
        if self.selected {
            format!("{}{}{}{}", self.prefix, SELECTED, self.text, RESET)
        } else {
            format!("{}{}", self.prefix, self.text)
        }
    }
}

pub trait SelectionSource {
    fn entries(&self, host: &dyn Host) -> Vec<ListEntry>;

    fn select(&self, host: &mut dyn Host, id: u64) -> Result<(), InspectError>;
}

pub struct ListWindow<S> {
    title: String,
    source: S,
    viewport: Viewport,
    ids: Vec<u64>,
}

impl<S: SelectionSource> ListWindow<S> {
    pub fn new(title: &str, source: S, mut viewport: Viewport) -> Self {
        viewport.region_mut().set_title(title);
        ListWindow {
            title: title.to_string(),
            source,
            viewport,
            ids: Vec::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Select the entry on buffer line `line`
    pub fn select_line(&mut self, host: &mut dyn Host, line: usize) -> ClickOutcome {
        let Some(&id) = self.ids.get(line) else {
            return ClickOutcome::Ignored;
        };
        match self.source.select(host, id) {
            Ok(()) => {
                debug!(title = %self.title, id, "selected entry");
                ClickOutcome::RefreshAll
            }
            Err(e) => {
                warn!(title = %self.title, id, error = %e, "selection failed");
                ClickOutcome::Ignored
            }
        }
    }
}

impl<S: SelectionSource + 'static> Window for ListWindow<S> {
    fn title(&self) -> &str {
        &self.title
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn refill(&mut self, host: &dyn Host) {
        if !self.viewport.is_valid() {
            return;
        }
        let entries = self.source.entries(host);
        self.ids = entries.iter().map(|e| e.id).collect();
        self.viewport
            .set_lines(entries.iter().map(ListEntry::render).collect());
    }

    fn click(
        &mut self,
        host: &mut dyn Host,
        _clipboard: &mut dyn Clipboard,
        _x: usize,
        y: usize,
        button: MouseButton,
    ) -> ClickOutcome {
        if button != MouseButton::Left {
            return ClickOutcome::Ignored;
        }
        let line = y + self.viewport.line_offset();
        self.select_line(host, line)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Drop C++ template argument lists from a function name
///
/// `ns::f<int, std::vector<int>>` becomes `ns::f`. The angle brackets of
/// `operator<`, `operator<<`, `operator->` and friends are kept.
pub fn strip_template_args(name: &str) -> String {
    const OPERATOR: &str = "operator";
    let mut out = String::with_capacity(name.len());
    let mut level = 0usize;
    let mut rest = name;
    while let Some(c) = rest.chars().next() {
        if rest.starts_with(OPERATOR) && !ends_with_ident(&name[..name.len() - rest.len()]) {
            let after = &rest[OPERATOR.len()..];
            let op_len = after
                .find(|c: char| !"<>=-!".contains(c))
                .unwrap_or(after.len());
            if level == 0 {
                out.push_str(&rest[..OPERATOR.len() + op_len]);
            }
            rest = &after[op_len..];
            continue;
        }
        match c {
            '<' => level += 1,
            '>' => level = level.saturating_sub(1),
            _ if level == 0 => out.push(c),
            _ => {}
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn ends_with_ident(s: &str) -> bool {
    s.chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}
