//! Value-tree windows
//!
//! A [`TreeWindow`] renders the entries of a [`VariableSource`] as an
//! indented tree, one line per node, and keeps per-node state between
//! refills so that expansion survives refreshes and changed values stand out.
//!
//! # Node keys
//!
//! Every node gets a key: its parent's key and its own label joined by `:`.
//! Same-named siblings are told apart by a counter (`x`, `x:2`, `x:3`);
//! numbered entries use `<number>:<name>` instead. State is carried over by
//! key, so a node keeps its state as long as its path stays the same.
//!
//! # State carry-over
//!
//! Each refill builds a fresh table from the previous one:
//! - `expanded` is inherited verbatim
//! - the diff baseline is the previous display text on a normal refill, and
//!   the previous baseline on a toggle refill, so toggling never changes
//!   what is highlighted
//!
//! # Failures
//!
//! A node whose inspection fails at any point becomes an error leaf: the
//! lines and table entries it already produced are rolled back and a single
//! `name = <message>` line is rendered under the same key. Its siblings are
//! not affected.
//!
//! Pointer cycles are not detected. Nothing expands past one level of
//! indirection on its own, so a cyclic structure only grows as far as the
//! user keeps expanding it.

use super::clipboard::Clipboard;
use super::diff::{diff_color, Baseline, NodeFlags, DIM, PINNED, RESET};
use super::viewport::Viewport;
use super::window::{ClickOutcome, Window};
use crate::errors::InspectError;
use crate::host::Host;
use crate::inspect::format::{format_value, octal_escape, value_string, FormatOptions};
use crate::inspect::{
    Capabilities, ChildIter, CustomInspector, DisplayHint, InspectOptions, Inspector, NodeValue,
};
use crate::memory::{Value, ValueRef};
use crossterm::event::MouseButton;
use rustc_hash::FxHashMap;
use std::any::Any;
use tracing::{debug, warn};

/// One top-level item produced by a [`VariableSource`]
pub struct Entry<'a> {
    pub name: String,
    /// `None` renders a placeholder (or the error, if one is set)
    pub value: Option<NodeValue<'a>>,
    /// Declared but not yet initialised, or a disabled display
    pub undeclared: bool,
    pub argument: bool,
    /// Positive for numbered entries (display expressions)
    pub number: u32,
    pub raw: bool,
    pub format: Option<char>,
    pub error: Option<String>,
    /// Expanded the first time it is seen
    pub default_expand: bool,
}

impl<'a> Entry<'a> {
    pub fn new(name: impl Into<String>, value: NodeValue<'a>) -> Self {
        Entry {
            value: Some(value),
            ..Entry::empty(name)
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Entry {
            name: name.into(),
            value: None,
            undeclared: false,
            argument: false,
            number: 0,
            raw: false,
            format: None,
            error: None,
            default_expand: false,
        }
    }

    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Entry {
            error: Some(error.into()),
            ..Entry::empty(name)
        }
    }

    pub fn undeclared(mut self, undeclared: bool) -> Self {
        self.undeclared = undeclared;
        self
    }

    pub fn argument(mut self, argument: bool) -> Self {
        self.argument = argument;
        self
    }

    pub fn number(mut self, number: u32) -> Self {
        self.number = number;
        self
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn format(mut self, format: Option<char>) -> Self {
        self.format = format;
        self
    }

    pub fn default_expand(mut self, default_expand: bool) -> Self {
        self.default_expand = default_expand;
        self
    }
}

/// Supplies the top-level entries of a tree on every refill
pub trait VariableSource {
    fn entries<'h>(&self, host: &'h dyn Host) -> Vec<Entry<'h>>;
}

impl<F> VariableSource for F
where
    F: Fn(&dyn Host) -> Vec<Entry<'static>>,
{
    fn entries<'h>(&self, host: &'h dyn Host) -> Vec<Entry<'h>> {
        self(host)
    }
}

/// Diff baseline carried in the state table
#[derive(Debug, Clone, PartialEq, Eq)]
enum Prior {
    Absent,
    Seen(Option<String>),
}

impl Prior {
    fn as_baseline(&self) -> Baseline<'_> {
        match self {
            Prior::Absent => Baseline::Absent,
            Prior::Seen(text) => Baseline::Present(text.as_deref()),
        }
    }
}

#[derive(Debug, Clone)]
struct NodeState {
    expanded: Option<bool>,
    displayed: Option<String>,
    baseline: Prior,
    pinned: Option<ValueRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LineKey {
    key: String,
    depth: usize,
}

/// Parameters of one node
struct Node<'v> {
    label: String,
    /// Key before sibling disambiguation
    key: String,
    value: Option<NodeValue<'v>>,
    depth: usize,
    number: u32,
    default_expand: bool,
    flags: NodeFlags,
    options: InspectOptions,
    error: Option<String>,
}

impl<'v> Node<'v> {
    fn child(
        label: String,
        key: String,
        value: NodeValue<'v>,
        depth: usize,
        options: InspectOptions,
    ) -> Self {
        Node {
            label,
            key,
            value: Some(value),
            depth,
            number: 0,
            default_expand: false,
            flags: NodeFlags::default(),
            options,
            error: None,
        }
    }
}

/// A node being rendered, after its key and prior state are settled
struct At<'s> {
    key: &'s str,
    label: &'s str,
    depth: usize,
    spaces: &'s str,
    numstr: &'s str,
    flags: NodeFlags,
    options: InspectOptions,
    default_expand: bool,
    expanded: Option<bool>,
    baseline: &'s Prior,
}

/// Everything one refill builds
struct Pass<'h, 'p> {
    host: &'h dyn Host,
    previous: &'p FxHashMap<String, NodeState>,
    keep_prev: bool,
    max_elements: Option<usize>,
    pin_slot: &'p str,
    pin: Option<ValueRef>,
    current: FxHashMap<String, NodeState>,
    /// Keys in insertion order, for rollback
    order: Vec<String>,
    lines: Vec<String>,
    keys: Vec<Option<LineKey>>,
}

impl<'h, 'p> Pass<'h, 'p> {
    fn cap(&self) -> usize {
        self.max_elements.unwrap_or(usize::MAX)
    }

    fn node_key(&self, node: &Node<'_>) -> String {
        if node.number > 0 {
            return format!("{}:{}", node.number, node.key);
        }
        let mut key = node.key.clone();
        let mut count = 1;
        while self.current.contains_key(&key) {
            count += 1;
            key = format!("{}:{}", node.key, count);
        }
        key
    }

    fn push_line(&mut self, line: String, key: Option<&str>, depth: usize) {
        self.lines.push(line);
        self.keys.push(key.map(|key| LineKey {
            key: key.to_string(),
            depth,
        }));
    }

    fn add_node(&mut self, node: Node<'_>) {
        let key = self.node_key(&node);
        let (expanded, baseline) = match self.previous.get(&key) {
            Some(prev) if self.keep_prev => (prev.expanded, prev.baseline.clone()),
            Some(prev) => (prev.expanded, Prior::Seen(prev.displayed.clone())),
            None => (None, Prior::Absent),
        };
        self.current.insert(
            key.clone(),
            NodeState {
                expanded,
                displayed: None,
                baseline: baseline.clone(),
                pinned: None,
            },
        );
        self.order.push(key.clone());

        let Node {
            label,
            value,
            depth,
            number,
            default_expand,
            flags,
            options,
            error,
            ..
        } = node;
        let spaces = "  ".repeat(depth);
        let numstr = if number > 0 {
            format!("{}: ", number)
        } else {
            String::new()
        };
        let at = At {
            key: &key,
            label: &label,
            depth,
            spaces: &spaces,
            numstr: &numstr,
            flags,
            options,
            default_expand,
            expanded,
            baseline: &baseline,
        };

        match (value, error) {
            (Some(NodeValue::Missing(e)), _) => self.error_leaf(&at, &e.to_string()),
            (Some(NodeValue::Text(text)), _) => self.text_leaf(&at, text),
            (Some(value), _) => {
                let lines_mark = self.lines.len();
                let order_mark = self.order.len();
                if let Err(e) = self.add_inspected(&at, value) {
                    debug!(key = %key, error = %e, "node failed, rendering error leaf");
                    self.lines.truncate(lines_mark);
                    self.keys.truncate(lines_mark);
                    for stale in self.order.drain(order_mark..) {
                        self.current.remove(&stale);
                    }
                    if let Some(state) = self.current.get_mut(&key) {
                        state.displayed = None;
                        state.pinned = None;
                    }
                    self.error_leaf(&at, &e.to_string());
                }
            }
            (None, Some(error)) => self.error_leaf(&at, &error),
            (None, None) => {
                let coloring = diff_color(Baseline::Absent, None, flags, true);
                let line = format!("{}{}  {}", spaces, numstr, coloring.paint_name(&label));
                self.push_line(line, Some(&key), depth);
            }
        }
    }

    fn error_leaf(&mut self, at: &At<'_>, message: &str) {
        let coloring = diff_color(Baseline::Present(None), None, at.flags, false);
        let line = format!(
            "{}{}  {} = {}<{}>{}",
            at.spaces,
            at.numstr,
            coloring.paint_name(at.label),
            DIM,
            message,
            RESET
        );
        self.push_line(line, Some(at.key), at.depth);
    }

    fn text_leaf(&mut self, at: &At<'_>, text: String) {
        let coloring = diff_color(at.baseline.as_baseline(), Some(&text), at.flags, false);
        let mut rows = text.split('\n');
        let first = rows.next().unwrap_or_default();
        let line = format!(
            "{}{}  {} = {}",
            at.spaces,
            at.numstr,
            coloring.paint_name(at.label),
            coloring.paint_value(first)
        );
        self.push_line(line, Some(at.key), at.depth);
        for extra in rows {
            self.push_line(format!("{}    {}", at.spaces, extra), None, at.depth);
        }
        if let Some(state) = self.current.get_mut(at.key) {
            state.displayed = Some(text);
        }
    }

    fn add_inspected(&mut self, at: &At<'_>, value: NodeValue<'_>) -> Result<(), InspectError> {
        match value {
            NodeValue::Custom(custom) => self.add_with(at, &Inspector::Custom(custom)),
            NodeValue::Value(value) => {
                let value = strip_references(&value);
                if value.is_optimized_out() && !value.ty.is_record() {
                    return Err(InspectError::OptimizedOut);
                }
                let inspector = Inspector::for_value(value, self.host, at.options);
                self.add_with(at, &inspector)
            }
            NodeValue::Text(text) => {
                self.text_leaf(at, text);
                Ok(())
            }
            NodeValue::Missing(e) => Err(e),
        }
    }

    fn add_with(&mut self, at: &At<'_>, inspector: &Inspector<'_>) -> Result<(), InspectError> {
        let pin = inspector.address();
        let alias = match (&pin, &self.pin) {
            (Some(node), Some(pinned)) if node == pinned => {
                format!(" = {}${}{}", PINNED, self.pin_slot, RESET)
            }
            _ => String::new(),
        };

        let has_children = inspector.has_children();
        let mut expanded = at.expanded;
        if expanded.is_none() && has_children {
            expanded = Some(at.default_expand);
        }
        let marker = match (has_children, expanded) {
            (true, Some(true)) => "- ",
            (true, Some(false)) => "+ ",
            _ => "  ",
        };

        let annotation = inspector.type_annotation().unwrap_or_default();
        let text = inspector
            .to_display_string(self.host)?
            .map(|text| octal_escape(&text));
        let coloring = diff_color(at.baseline.as_baseline(), text.as_deref(), at.flags, false);
        let head = format!(
            "{}{}{}{}{}",
            at.spaces,
            at.numstr,
            marker,
            coloring.paint_name(at.label),
            annotation
        );
        match &text {
            Some(text) => {
                let mut rows = text.split('\n');
                let first = rows.next().unwrap_or_default();
                let line = format!("{} = {}{}", head, coloring.paint_value(first), alias);
                self.push_line(line, Some(at.key), at.depth);
                for extra in rows {
                    self.push_line(format!("{}    {}", at.spaces, extra), None, at.depth);
                }
            }
            None => self.push_line(format!("{}{}", head, alias), Some(at.key), at.depth),
        }
        if let Some(state) = self.current.get_mut(at.key) {
            state.expanded = expanded;
            state.displayed = text;
            state.pinned = pin;
        }

        if expanded != Some(true) || !has_children {
            return Ok(());
        }
        let children = inspector.children()?;
        let options = InspectOptions {
            dynamic_type: inspector.children_resolve_dynamic(),
            ..at.options
        };
        if inspector.display_hint() == Some(DisplayHint::Map) {
            return self.add_map_children(at, children, options);
        }
        let default_expand = inspector.children_default_expand();
        for child in children.take(self.cap()) {
            let child = child?;
            let mut node = Node::child(
                child.label,
                format!("{}:{}", at.key, child.key),
                child.value,
                at.depth + 1,
                options,
            );
            node.default_expand = default_expand;
            self.add_node(node);
        }
        Ok(())
    }

    /// Children alternate key, value. A key with single-line inline text
    /// labels its value `[text]`; otherwise both are shown as `key`/`value`.
    fn add_map_children(
        &mut self,
        at: &At<'_>,
        children: ChildIter<'_>,
        options: InspectOptions,
    ) -> Result<(), InspectError> {
        let mut children = children.take(self.cap().saturating_mul(2));
        while let Some(key_child) = children.next() {
            let key_child = key_child?;
            let inline = self.inline_key(&key_child.value, options)?;
            if inline.is_none() {
                self.add_node(Node::child(
                    "key".to_string(),
                    format!("{}:{}", at.key, key_child.key),
                    key_child.value,
                    at.depth + 1,
                    options,
                ));
            }
            let Some(value_child) = children.next() else {
                break;
            };
            let value_child = value_child?;
            let label = match inline {
                Some(text) => format!("[{}]", text),
                None => "value".to_string(),
            };
            self.add_node(Node::child(
                label,
                format!("{}:{}", at.key, value_child.key),
                value_child.value,
                at.depth + 1,
                options,
            ));
        }
        Ok(())
    }

    fn inline_key(
        &self,
        value: &NodeValue<'_>,
        options: InspectOptions,
    ) -> Result<Option<String>, InspectError> {
        let text = match value {
            NodeValue::Text(text) => Some(text.clone()),
            NodeValue::Missing(_) => None,
            NodeValue::Custom(custom) => printer_key(custom.as_ref(), self.host)?,
            NodeValue::Value(value) => {
                let value = strip_references(value);
                let printer = if options.raw {
                    None
                } else {
                    self.host.lookup_printer(value)
                };
                match printer {
                    Some(printer) => printer_key(printer.as_ref(), self.host)?,
                    None if value.ty.is_scalar_key() => Some(format_value(
                        value,
                        self.host,
                        FormatOptions::raw(options.format),
                    )?),
                    None => None,
                }
            }
        };
        Ok(text.filter(|text| !text.contains('\n')))
    }
}

/// Text of a printer that is a plain leaf, for use as a map key
fn printer_key(
    printer: &dyn CustomInspector,
    host: &dyn Host,
) -> Result<Option<String>, InspectError> {
    let caps = printer.capabilities();
    if !caps.contains(Capabilities::TO_STRING) || caps.contains(Capabilities::CHILDREN) {
        return Ok(None);
    }
    let hint = if caps.contains(Capabilities::DISPLAY_HINT) {
        printer.display_hint()
    } else {
        None
    };
    printer
        .to_display_string()?
        .map(|text| value_string(&text, hint, host))
        .transpose()
}

fn strip_references(value: &Value) -> &Value {
    let mut value = value;
    while let Some(target) = value.referenced_value() {
        value = target;
    }
    value
}

/// A tree-rendering window over a [`VariableSource`]
pub struct TreeWindow<S> {
    title: String,
    source: S,
    viewport: Viewport,
    /// Convenience slot right-clicks publish to
    pin_slot: String,
    max_elements: Option<usize>,
    previous: FxHashMap<String, NodeState>,
    line_keys: Vec<Option<LineKey>>,
}

impl<S: VariableSource> TreeWindow<S> {
    pub fn new(title: &str, pin_slot: &str, source: S, mut viewport: Viewport) -> Self {
        viewport.region_mut().set_title(title);
        TreeWindow {
            title: title.to_string(),
            source,
            viewport,
            pin_slot: pin_slot.to_string(),
            max_elements: None,
            previous: FxHashMap::default(),
            line_keys: Vec::new(),
        }
    }

    /// Cap on children listed per node; the rest are dropped silently
    pub fn with_max_elements(mut self, max_elements: Option<usize>) -> Self {
        self.max_elements = max_elements;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn pin_slot(&self) -> &str {
        &self.pin_slot
    }

    /// Rebuild the lines; `keep_prev` keeps diff highlighting as it was
    pub fn refill_with(&mut self, host: &dyn Host, keep_prev: bool) {
        if !self.viewport.is_valid() {
            return;
        }
        let entries = self.source.entries(host);
        let mut pass = Pass {
            host,
            previous: &self.previous,
            keep_prev,
            max_elements: self.max_elements,
            pin_slot: &self.pin_slot,
            pin: host.convenience(&self.pin_slot),
            current: FxHashMap::default(),
            order: Vec::new(),
            lines: Vec::new(),
            keys: Vec::new(),
        };
        for entry in entries {
            pass.add_node(Node {
                label: entry.name.clone(),
                key: entry.name,
                value: entry.value,
                depth: 0,
                number: entry.number,
                default_expand: entry.default_expand,
                flags: NodeFlags {
                    uninitialized: entry.undeclared,
                    argument: entry.argument,
                },
                options: InspectOptions {
                    raw: entry.raw,
                    format: entry.format,
                    dynamic_type: true,
                },
                error: entry.error,
            });
        }
        let Pass {
            current,
            lines,
            keys,
            ..
        } = pass;
        debug!(
            title = %self.title,
            lines = lines.len(),
            nodes = current.len(),
            keep_prev,
            "refilled tree"
        );
        self.previous = current;
        self.line_keys = keys;
        self.viewport.set_lines(lines);
    }

    /// Node key of a buffer line; continuation lines have none
    pub fn key_at(&self, line: usize) -> Option<&str> {
        self.line_keys
            .get(line)
            .and_then(Option::as_ref)
            .map(|lk| lk.key.as_str())
    }

    /// Keys of all node lines, top to bottom
    pub fn keys(&self) -> Vec<&str> {
        self.line_keys
            .iter()
            .flatten()
            .map(|lk| lk.key.as_str())
            .collect()
    }

    pub fn line_of(&self, key: &str) -> Option<usize> {
        self.line_keys
            .iter()
            .position(|lk| lk.as_ref().is_some_and(|lk| lk.key == key))
    }

    pub fn is_expanded(&self, key: &str) -> Option<bool> {
        self.previous.get(key).and_then(|state| state.expanded)
    }

    pub fn displayed(&self, key: &str) -> Option<&str> {
        self.previous
            .get(key)
            .and_then(|state| state.displayed.as_deref())
    }

    pub fn pinned(&self, key: &str) -> Option<&ValueRef> {
        self.previous.get(key).and_then(|state| state.pinned.as_ref())
    }

    /// Act on a click on buffer line `line`
    pub fn click_line(
        &mut self,
        host: &mut dyn Host,
        clipboard: &mut dyn Clipboard,
        line: usize,
        button: MouseButton,
    ) -> ClickOutcome {
        let Some(LineKey { key, depth }) = self.line_keys.get(line).cloned().flatten() else {
            return ClickOutcome::Ignored;
        };
        let Some(state) = self.previous.get(&key) else {
            return ClickOutcome::Ignored;
        };
        match button {
            MouseButton::Left => {
                let Some(expanded) = state.expanded else {
                    return ClickOutcome::Ignored;
                };
                if let Some(state) = self.previous.get_mut(&key) {
                    state.expanded = Some(!expanded);
                }
                self.refill_with(host, true);
                if !expanded {
                    self.reveal_subtree(&key);
                }
                self.viewport.paint();
                ClickOutcome::Redrawn
            }
            MouseButton::Right => {
                let Some(pin) = state.pinned.clone() else {
                    return ClickOutcome::Ignored;
                };
                debug!(slot = %self.pin_slot, key = %key, "pinning node");
                host.set_convenience(&self.pin_slot, pin);
                self.refill_with(host, true);
                self.viewport.paint();
                ClickOutcome::Redrawn
            }
            MouseButton::Middle => {
                let text = if state.expanded == Some(true) {
                    Some(self.descendant_texts(line, depth))
                } else {
                    state.displayed.clone()
                };
                let Some(text) = text else {
                    return ClickOutcome::Ignored;
                };
                if let Err(e) = clipboard.set(&text) {
                    warn!(error = %e, "copy to clipboard failed");
                }
                ClickOutcome::Handled
            }
        }
    }

    /// Display texts of every rendered descendant of the node on `line`
    fn descendant_texts(&self, line: usize, depth: usize) -> String {
        let mut texts = Vec::new();
        for lk in self.line_keys.iter().skip(line + 1) {
            match lk {
                None => continue,
                Some(lk) if lk.depth <= depth => break,
                Some(lk) => {
                    if let Some(text) = self.displayed(&lk.key) {
                        texts.push(text);
                    }
                }
            }
        }
        texts.join("\n")
    }

    /// Scroll so a freshly expanded subtree is visible without pushing its
    /// own line out of view
    fn reveal_subtree(&mut self, key: &str) {
        let Some(start) = self.line_of(key) else {
            return;
        };
        let depth = self.line_keys[start].as_ref().map_or(0, |lk| lk.depth);
        let mut end = start;
        for (i, lk) in self.line_keys.iter().enumerate().skip(start + 1) {
            match lk {
                Some(lk) if lk.depth <= depth => break,
                _ => end = i,
            }
        }
        let height = self.viewport.height();
        let offset = self.viewport.line_offset();
        if height > 0 && end >= offset + height {
            self.viewport.set_line_offset(start.min(end + 1 - height));
        }
    }
}

impl<S: VariableSource + 'static> Window for TreeWindow<S> {
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
        self.refill_with(host, false);
    }

    fn click(
        &mut self,
        host: &mut dyn Host,
        clipboard: &mut dyn Clipboard,
        _x: usize,
        y: usize,
        button: MouseButton,
    ) -> ClickOutcome {
        let line = y + self.viewport.line_offset();
        self.click_line(host, clipboard, line, button)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::custom::{StaticChild, StaticInspector};
    use crate::memory::{Contents, Type};
    use crate::ui::ansi::strip;
    use crate::ui::clipboard::MemoryClipboard;
    use crate::ui::region::PaneRegion;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct NoHost;
    impl Host for NoHost {}

    type Shared = Rc<RefCell<Vec<(String, Value)>>>;

    fn window(values: &Shared) -> TreeWindow<impl Fn(&dyn Host) -> Vec<Entry<'static>>> {
        let values = Rc::clone(values);
        let source = move |_: &dyn Host| -> Vec<Entry<'static>> {
            values
                .borrow()
                .iter()
                .map(|(name, v)| Entry::new(name.clone(), NodeValue::owned(v.clone())))
                .collect()
        };
        TreeWindow::new("locals", "lv", source, Viewport::attach(PaneRegion::new(80, 20)))
    }

    fn plain(w: &TreeWindow<impl VariableSource + 'static>) -> Vec<String> {
        w.viewport().lines().iter().map(|l| strip(l)).collect()
    }

    fn int(n: i64) -> Value {
        Value::int(&Type::int("int"), n)
    }

    #[test]
    fn test_duplicate_names_get_counters() {
        let values: Shared = Rc::new(RefCell::new(vec![
            ("x".into(), int(1)),
            ("x".into(), int(2)),
            ("x".into(), int(3)),
        ]));
        let mut w = window(&values);
        w.refill_with(&NoHost, false);
        assert_eq!(w.keys(), vec!["x", "x:2", "x:3"]);
        w.refill_with(&NoHost, false);
        assert_eq!(w.keys(), vec!["x", "x:2", "x:3"]);
    }

    #[test]
    fn test_new_then_unchanged_then_changed() {
        let values: Shared = Rc::new(RefCell::new(vec![("n".into(), int(1))]));
        let mut w = window(&values);
        w.refill_with(&NoHost, false);
        assert_eq!(w.viewport().lines()[0], "  \x1b[1;32mn\x1b[0m = 1");

        w.refill_with(&NoHost, false);
        assert_eq!(w.viewport().lines()[0], "  n = 1");

        values.borrow_mut()[0].1 = int(2);
        w.refill_with(&NoHost, false);
        assert_eq!(w.viewport().lines()[0], "  n = \x1b[1;31m2\x1b[0m");
    }

    #[test]
    fn test_optimized_out_scalar_is_error_leaf() {
        let values: Shared = Rc::new(RefCell::new(vec![(
            "gone".into(),
            Value::optimized_out(&Type::int("int")),
        )]));
        let mut w = window(&values);
        w.refill_with(&NoHost, false);
        assert_eq!(plain(&w), vec!["  gone = <optimized out>"]);
    }

    #[test]
    fn test_failing_printer_is_contained() {
        let source = |_: &dyn Host| -> Vec<Entry<'static>> {
            vec![
                Entry::new("a", NodeValue::text("1")),
                Entry::new(
                    "bad",
                    NodeValue::Custom(
                        StaticInspector::new()
                            .failing_text(InspectError::printer("boom"))
                            .boxed(),
                    ),
                ),
                Entry::new("b", NodeValue::text("2")),
            ]
        };
        let mut w = TreeWindow::new("t", "lv", source, Viewport::attach(PaneRegion::new(40, 5)));
        w.refill_with(&NoHost, false);
        assert_eq!(plain(&w), vec!["  a = 1", "  bad = <boom>", "  b = 2"]);
        assert_eq!(w.keys(), vec!["a", "bad", "b"]);
    }

    #[test]
    fn test_custom_children_expand_on_click() {
        let source = |_: &dyn Host| -> Vec<Entry<'static>> {
            let inspector = StaticInspector::new()
                .text("list")
                .child("[0]", StaticChild::Text("ok".into()))
                .child("[1]", StaticChild::Text("ok".into()));
            vec![Entry::new("l", NodeValue::Custom(inspector.boxed()))]
        };
        let mut w = TreeWindow::new("t", "lv", source, Viewport::attach(PaneRegion::new(40, 5)));
        w.refill_with(&NoHost, false);
        assert_eq!(plain(&w), vec!["+ l = list"]);
        w.click_line(&mut NoHost, &mut MemoryClipboard::default(), 0, MouseButton::Left);
        assert_eq!(plain(&w), vec!["- l = list", "    [0] = ok", "    [1] = ok"]);
    }

    #[test]
    fn test_default_expand_only_seeds_first_refill() {
        let source = |_: &dyn Host| -> Vec<Entry<'static>> {
            let inspector = StaticInspector::new()
                .child("[0]", StaticChild::Text("a".into()));
            vec![Entry::new("l", NodeValue::Custom(inspector.boxed())).default_expand(true)]
        };
        let mut w = TreeWindow::new("t", "lv", source, Viewport::attach(PaneRegion::new(40, 5)));
        w.refill_with(&NoHost, false);
        assert_eq!(plain(&w), vec!["- l", "    [0] = a"]);
        w.click_line(&mut NoHost, &mut MemoryClipboard::default(), 0, MouseButton::Left);
        w.refill_with(&NoHost, false);
        assert_eq!(plain(&w), vec!["+ l"]);
    }

    #[test]
    fn test_record_children_and_toggle() {
        let int_ty = Type::int("int");
        let ty = Type::record(
            "point",
            vec![
                crate::memory::Field::new("x", &int_ty),
                crate::memory::Field::new("y", &int_ty),
            ],
        );
        let p = Value::new(&ty, Contents::Struct(vec![int(1), int(2)]));
        let values: Shared = Rc::new(RefCell::new(vec![("p".into(), p)]));
        let mut w = window(&values);
        w.refill_with(&NoHost, false);
        assert_eq!(plain(&w), vec!["+ p"]);

        let mut clipboard = MemoryClipboard::default();
        let outcome = w.click_line(&mut NoHost, &mut clipboard, 0, MouseButton::Left);
        assert_eq!(outcome, ClickOutcome::Redrawn);
        assert_eq!(plain(&w), vec!["- p", "    x = 1", "    y = 2"]);
        assert_eq!(w.keys(), vec!["p", "p:x:1", "p:y:2"]);

        w.click_line(&mut NoHost, &mut clipboard, 0, MouseButton::Middle);
        assert_eq!(clipboard.last(), Some("1\n2"));
        w.click_line(&mut NoHost, &mut clipboard, 1, MouseButton::Middle);
        assert_eq!(clipboard.last(), Some("1"));
    }

    struct Flaky;

    impl CustomInspector for Flaky {
        fn capabilities(&self) -> Capabilities {
            Capabilities::TO_STRING | Capabilities::CHILDREN
        }

        fn to_display_string(&self) -> Result<Option<crate::inspect::DisplayText>, InspectError> {
            Ok(Some(crate::inspect::DisplayText::Text("flaky".into())))
        }

        fn children(&self) -> Result<ChildIter<'_>, InspectError> {
            Ok(Box::new(
                vec![
                    Ok(crate::inspect::Child::new("[0]", NodeValue::text("a"))),
                    Err(InspectError::printer("bad child")),
                ]
                .into_iter(),
            ))
        }
    }

    #[test]
    fn test_failing_child_rolls_back_partial_output() {
        let source = |_: &dyn Host| -> Vec<Entry<'static>> {
            vec![
                Entry::new("f", NodeValue::Custom(Box::new(Flaky))),
                Entry::new("after", NodeValue::text("1")),
            ]
        };
        let mut w = TreeWindow::new("t", "lv", source, Viewport::attach(PaneRegion::new(40, 5)));
        w.refill_with(&NoHost, false);
        assert_eq!(plain(&w), vec!["+ f = flaky", "  after = 1"]);

        let mut clipboard = MemoryClipboard::default();
        w.click_line(&mut NoHost, &mut clipboard, 0, MouseButton::Left);
        assert_eq!(plain(&w), vec!["  f = <bad child>", "  after = 1"]);
        assert_eq!(w.keys(), vec!["f", "after"]);

        // still expanded, so clicking the error line collapses it again
        w.click_line(&mut NoHost, &mut clipboard, 0, MouseButton::Left);
        assert_eq!(plain(&w), vec!["+ f = flaky", "  after = 1"]);
    }

    #[test]
    fn test_multiline_text_keeps_rows_aligned_with_keys() {
        let source = |_: &dyn Host| -> Vec<Entry<'static>> {
            vec![
                Entry::new("s", NodeValue::text("one\ntwo")),
                Entry::new("after", NodeValue::text("1")),
            ]
        };
        let region = PaneRegion::new(20, 5);
        let mut w = TreeWindow::new("t", "lv", source, Viewport::attach(region.clone()));
        w.refill_with(&NoHost, false);
        w.redraw();
        assert_eq!(plain(&w), vec!["  s = one", "    two", "  after = 1"]);
        assert_eq!(w.key_at(1), None);
        assert_eq!(w.key_at(2), Some("after"));
        assert_eq!(strip(&region.rows()[2]).trim_end(), "  after = 1");

        let mut clipboard = MemoryClipboard::default();
        let outcome = w.click(&mut NoHost, &mut clipboard, 0, 1, MouseButton::Middle);
        assert_eq!(outcome, ClickOutcome::Ignored);
        w.click(&mut NoHost, &mut clipboard, 0, 2, MouseButton::Middle);
        assert_eq!(clipboard.last(), Some("1"));
        w.click(&mut NoHost, &mut clipboard, 0, 0, MouseButton::Middle);
        assert_eq!(clipboard.last(), Some("one\ntwo"));
    }

    #[test]
    fn test_map_keys_without_inline_text_get_key_value_nodes() {
        let int_ty = Type::int("int");
        let ty = Type::record("point", vec![crate::memory::Field::new("x", &int_ty)]);
        let point = Value::new(&ty, Contents::Struct(vec![int(7)]));
        let source = move |_: &dyn Host| -> Vec<Entry<'static>> {
            let map = StaticInspector::new()
                .hint(DisplayHint::Map)
                .child("k0", StaticChild::Value(point.clone()))
                .child("v0", StaticChild::Value(int(1)))
                .child("k1", StaticChild::Text("two\nlines".into()))
                .child("v1", StaticChild::Value(int(2)));
            vec![Entry::new("m", NodeValue::Custom(Box::new(map))).default_expand(true)]
        };
        let mut w = TreeWindow::new("t", "lv", source, Viewport::attach(PaneRegion::new(40, 10)));
        w.refill_with(&NoHost, false);
        assert_eq!(
            plain(&w),
            vec![
                "- m",
                "  + key",
                "    value = 1",
                "    key = two",
                "      lines",
                "    value = 2",
            ]
        );
        assert_eq!(w.keys(), vec!["m", "m:k0", "m:v0", "m:k1", "m:v1"]);

        let mut clipboard = MemoryClipboard::default();
        w.click_line(&mut NoHost, &mut clipboard, 1, MouseButton::Left);
        assert_eq!(&plain(&w)[1..4], ["  - key", "      x = 7", "    value = 1"]);
    }
}
