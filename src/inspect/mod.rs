//! Value inspection protocol
//!
//! Every node of a value tree is looked at through an [`Inspector`], which
//! answers four questions about it: what text to show, how its children are
//! grouped ([`DisplayHint`]), what the children are, and where it lives.
//!
//! # Strategies
//!
//! - [`ArrayInspector`]: contiguous `[low, high]` index ranges, `"[i]"` labels
//! - [`RecordInspector`]: struct/union fields, base classes as `"<Base>"`
//! - [`PointerInspector`]: one synthetic `"[0]"` child holding the target
//! - [`ScalarInspector`]: leaves formatted by [`format`]
//! - custom: anything implementing [`CustomInspector`], usually supplied by a
//!   pretty printer; takes priority over the built-in strategies
//!
//! The strategy is picked once per node by [`Inspector::for_value`] and the
//! resulting [`Capabilities`] are what the renderer branches on.

pub mod array;
pub mod custom;
pub mod format;
pub mod pointer;
pub mod record;
pub mod scalar;

pub use array::ArrayInspector;
pub use custom::{PrinterRegistry, StaticInspector};
pub use pointer::PointerInspector;
pub use record::RecordInspector;
pub use scalar::ScalarInspector;

use crate::errors::InspectError;
use crate::host::Host;
use crate::memory::{TypeKind, Value, ValueRef};
use bitflags::bitflags;
use std::borrow::Cow;

bitflags! {
    /// Accessors an inspector actually supplies
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const TO_STRING    = 0b0001;
        const CHILDREN     = 0b0010;
        const DISPLAY_HINT = 0b0100;
        const ADDRESS      = 0b1000;
    }
}

/// How a node's children are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayHint {
    Array,
    /// Children alternate key, value, key, value...
    Map,
    /// The display text is a string and is shown quoted
    String,
}

/// What a custom inspector's `to_display_string` produced
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayText {
    Text(String),
    Value(Value),
}

/// A value handed to the tree renderer
pub enum NodeValue<'a> {
    /// Preformatted text, shown as-is
    Text(String),
    Value(Cow<'a, Value>),
    Custom(Box<dyn CustomInspector + 'a>),
    /// The value could not be produced (e.g. a failed dereference)
    Missing(InspectError),
}

impl<'a> NodeValue<'a> {
    pub fn owned(value: Value) -> NodeValue<'static> {
        NodeValue::Value(Cow::Owned(value))
    }

    pub fn borrowed(value: &'a Value) -> Self {
        NodeValue::Value(Cow::Borrowed(value))
    }

    pub fn text(text: impl Into<String>) -> NodeValue<'static> {
        NodeValue::Text(text.into())
    }
}

/// One child produced by an inspector
pub struct Child<'a> {
    pub label: String,
    /// Path segment appended to the parent's key
    pub key: String,
    pub value: NodeValue<'a>,
}

impl<'a> Child<'a> {
    pub fn new(label: impl Into<String>, value: NodeValue<'a>) -> Self {
        let label = label.into();
        Child {
            key: label.clone(),
            label,
            value,
        }
    }
}

/// Lazily produced children
pub type ChildIter<'a> = Box<dyn Iterator<Item = Result<Child<'a>, InspectError>> + 'a>;

/// A caller-supplied inspector
///
/// Implementors declare what they supply through
/// [`capabilities`](CustomInspector::capabilities); accessors that are not
/// declared are never called.
pub trait CustomInspector {
    fn capabilities(&self) -> Capabilities;

    fn to_display_string(&self) -> Result<Option<DisplayText>, InspectError> {
        Ok(None)
    }

    fn children(&self) -> Result<ChildIter<'_>, InspectError> {
        Ok(Box::new(std::iter::empty()))
    }

    fn display_hint(&self) -> Option<DisplayHint> {
        None
    }

    fn address(&self) -> Result<Option<ValueRef>, InspectError> {
        Ok(None)
    }
}

impl<T: CustomInspector + ?Sized> CustomInspector for &T {
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn to_display_string(&self) -> Result<Option<DisplayText>, InspectError> {
        (**self).to_display_string()
    }

    fn children(&self) -> Result<ChildIter<'_>, InspectError> {
        (**self).children()
    }

    fn display_hint(&self) -> Option<DisplayHint> {
        (**self).display_hint()
    }

    fn address(&self) -> Result<Option<ValueRef>, InspectError> {
        (**self).address()
    }
}

/// Per-node inspection flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InspectOptions {
    /// Bypass pretty printers
    pub raw: bool,
    /// Output format letter (`x`, `d`, `o`, ...)
    pub format: Option<char>,
    /// Resolve records to their most-derived runtime type
    pub dynamic_type: bool,
}

/// The strategy chosen for one node
pub enum Inspector<'a> {
    Array(ArrayInspector<'a>),
    Record(RecordInspector<'a>),
    Pointer(PointerInspector<'a>),
    Scalar(ScalarInspector<'a>),
    Custom(Box<dyn CustomInspector + 'a>),
}

impl<'a> Inspector<'a> {
    /// Pick a strategy for a raw value: a pretty printer if one claims it and
    /// `raw` is off, otherwise a built-in one chosen by shape
    pub fn for_value(value: &'a Value, host: &'a dyn Host, options: InspectOptions) -> Self {
        if !options.raw {
            if let Some(printer) = host.lookup_printer(value) {
                return Inspector::Custom(printer);
            }
        }
        Inspector::builtin(value, host, options)
    }

    /// Built-in strategy by the value's shape
    pub fn builtin(value: &'a Value, host: &'a dyn Host, options: InspectOptions) -> Self {
        match &value.ty.strip_typedefs().kind {
            TypeKind::Array { .. } => Inspector::Array(ArrayInspector::new(value, host)),
            TypeKind::Pointer(target)
                if !matches!(target.strip_typedefs().kind, TypeKind::Function) =>
            {
                Inspector::Pointer(PointerInspector::new(value, host, options))
            }
            TypeKind::Struct(_) | TypeKind::Union(_) => {
                Inspector::Record(RecordInspector::new(value, options))
            }
            _ => Inspector::Scalar(ScalarInspector::new(value, host, options)),
        }
    }

    pub fn custom(inspector: &'a dyn CustomInspector) -> Self {
        Inspector::Custom(Box::new(inspector))
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Inspector::Array(a) => a.capabilities(),
            Inspector::Record(_) => Capabilities::CHILDREN | Capabilities::ADDRESS,
            Inspector::Pointer(_) => {
                Capabilities::TO_STRING | Capabilities::CHILDREN | Capabilities::ADDRESS
            }
            Inspector::Scalar(_) => Capabilities::TO_STRING | Capabilities::ADDRESS,
            Inspector::Custom(c) => c.capabilities(),
        }
    }

    pub fn has_children(&self) -> bool {
        self.capabilities().contains(Capabilities::CHILDREN)
    }

    pub fn display_hint(&self) -> Option<DisplayHint> {
        match self {
            Inspector::Custom(c) if c.capabilities().contains(Capabilities::DISPLAY_HINT) => {
                c.display_hint()
            }
            _ => None,
        }
    }

    /// Display text, already formatted for the tree (not yet escaped)
    pub fn to_display_string(&self, host: &dyn Host) -> Result<Option<String>, InspectError> {
        match self {
            Inspector::Array(a) => a.to_display_string(),
            Inspector::Record(_) => Ok(None),
            Inspector::Pointer(p) => p.to_display_string().map(Some),
            Inspector::Scalar(s) => s.to_display_string().map(Some),
            Inspector::Custom(c) => {
                if !c.capabilities().contains(Capabilities::TO_STRING) {
                    return Ok(None);
                }
                match c.to_display_string()? {
                    Some(text) => format::value_string(&text, self.display_hint(), host).map(Some),
                    None => Ok(None),
                }
            }
        }
    }

    pub fn children(&self) -> Result<ChildIter<'_>, InspectError> {
        match self {
            Inspector::Array(a) => Ok(a.children()),
            Inspector::Record(r) => Ok(r.children()),
            Inspector::Pointer(p) => Ok(p.children()),
            Inspector::Scalar(_) => Ok(Box::new(std::iter::empty())),
            Inspector::Custom(c) if c.capabilities().contains(Capabilities::CHILDREN) => {
                c.children()
            }
            Inspector::Custom(_) => Ok(Box::new(std::iter::empty())),
        }
    }

    /// Where the inspected object lives; failures just mean "not pinnable"
    pub fn address(&self) -> Option<ValueRef> {
        match self {
            Inspector::Array(a) => a.value().reference(),
            Inspector::Record(r) => r.value().reference(),
            Inspector::Pointer(p) => p.value().reference(),
            Inspector::Scalar(s) => s.value().reference(),
            Inspector::Custom(c) if c.capabilities().contains(Capabilities::ADDRESS) => {
                c.address().ok().flatten()
            }
            Inspector::Custom(_) => None,
        }
    }

    /// Suffix appended to the node name, e.g. `" <Derived>"`
    pub fn type_annotation(&self) -> Option<String> {
        match self {
            Inspector::Record(r) => r.dynamic_name().map(|name| format!(" <{}>", name)),
            _ => None,
        }
    }

    /// Whether children start expanded the first time they are seen
    pub fn children_default_expand(&self) -> bool {
        match self {
            Inspector::Pointer(p) => p.is_single_indirection(),
            _ => false,
        }
    }

    /// Whether children resolve their dynamic type. Record members don't, so
    /// a resolved base-class sub-object is never re-resolved to the derived
    /// type it was reached from.
    pub fn children_resolve_dynamic(&self) -> bool {
        !matches!(self, Inspector::Record(_))
    }
}
