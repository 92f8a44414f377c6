//! Display window: the auto-display expression list
//!
//! Each display expression becomes a numbered top-level node. Disabled ones
//! render as undeclared names, ones that cannot be evaluated here render as
//! bare names, and evaluation errors become error leaves. The `i` and `s`
//! formats are handled here rather than by the scalar formatter: `i` shows
//! the instruction at the value's address and `s` reads the value as a C
//! string.

use crate::errors::InspectError;
use crate::host::{DisplayExpr, Host};
use crate::inspect::format::parse_format_flags;
use crate::inspect::NodeValue;
use crate::memory::{Contents, Type, TypeKind, Value};
use crate::ui::tree::{Entry, TreeWindow, VariableSource};
use crate::ui::viewport::Viewport;

pub const TITLE: &str = "display";
pub const PIN_SLOT: &str = "dv";

pub struct DisplaySource;

impl VariableSource for DisplaySource {
    fn entries<'h>(&self, host: &'h dyn Host) -> Vec<Entry<'h>> {
        let live = host.has_thread();
        host.displays()
            .into_iter()
            .map(|display| display_entry(host, display, live))
            .collect()
    }
}

fn display_entry(host: &dyn Host, display: DisplayExpr, live: bool) -> Entry<'static> {
    let DisplayExpr {
        number,
        enabled,
        format,
        expression,
        in_scope,
    } = display;
    let entry = Entry::empty(expression.clone()).number(number);
    if !enabled {
        return entry.undeclared(true);
    }
    if !live || !in_scope {
        return entry;
    }
    let (raw, format) = format.as_deref().map_or((false, None), parse_format_flags);
    let value = match host.evaluate(&expression) {
        Ok(value) => value,
        Err(e) => return Entry::failed(expression, e.to_string()).number(number),
    };
    match format {
        Some('i') => {
            let instruction = value
                .as_pointer()
                .or_else(|| value.as_i64().map(|n| n as u64))
                .and_then(|address| host.disassemble(address));
            let value = match instruction {
                Some(text) => NodeValue::text(text),
                None => NodeValue::owned(value),
            };
            Entry::new(expression, value).number(number).raw(raw)
        }
        Some('s') => match as_c_string(&value) {
            Ok(pointer) => Entry::new(expression, NodeValue::owned(pointer))
                .number(number)
                .raw(raw),
            Err(e) => Entry::failed(expression, e.to_string()).number(number),
        },
        format => Entry::new(expression, NodeValue::owned(value))
            .number(number)
            .raw(raw)
            .format(format),
    }
}

/// Reinterpret `value` as a `char *`
fn as_c_string(value: &Value) -> Result<Value, InspectError> {
    let char_ptr = Type::pointer_to(&Type::char());
    let address = match (&value.ty.strip_typedefs().kind, &value.contents) {
        (TypeKind::Array { .. }, _) => value.address,
        (_, Contents::Pointer(address)) => Some(*address),
        (_, Contents::Int(n)) => Some(*n as u64),
        (_, Contents::UInt(n)) => Some(*n),
        _ => None,
    };
    address
        .map(|address| Value::pointer(&char_ptr, address))
        .ok_or_else(|| InspectError::Evaluation("Invalid cast.".to_string()))
}

pub type DisplayWindow = TreeWindow<DisplaySource>;

pub fn display_window(viewport: Viewport) -> DisplayWindow {
    TreeWindow::new(TITLE, PIN_SLOT, DisplaySource, viewport)
}
