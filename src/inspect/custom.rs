//! Custom inspectors and the pretty-printer registry
//!
//! Hosts usually supply custom inspectors through a [`PrinterRegistry`]: a
//! list of named printer functions, each of which may claim a value by
//! returning an inspector for it. The first printer to claim a value wins.
//!
//! [`StaticInspector`] is a ready-made [`CustomInspector`] over owned data,
//! enough for most printers (and for tests).

use super::{Capabilities, Child, ChildIter, CustomInspector, DisplayHint, DisplayText, NodeValue};
use crate::errors::InspectError;
use crate::host::Host;
use crate::memory::{Value, ValueRef};

/// A printer function: claims a value by returning an inspector for it
pub type PrinterFn = Box<dyn Fn(&Value, &dyn Host) -> Option<Box<dyn CustomInspector>>>;

/// Named printers, consulted in registration order
#[derive(Default)]
pub struct PrinterRegistry {
    printers: Vec<(String, PrinterFn)>,
}

impl PrinterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a printer; a printer with the same name is replaced in place
    pub fn register<F>(&mut self, name: &str, printer: F)
    where
        F: Fn(&Value, &dyn Host) -> Option<Box<dyn CustomInspector>> + 'static,
    {
        if let Some(slot) = self.printers.iter_mut().find(|(n, _)| n == name) {
            slot.1 = Box::new(printer);
        } else {
            self.printers.push((name.to_string(), Box::new(printer)));
        }
    }

    pub fn lookup(&self, value: &Value, host: &dyn Host) -> Option<Box<dyn CustomInspector>> {
        self.printers
            .iter()
            .find_map(|(_, printer)| printer(value, host))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.printers.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.printers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }
}

/// A child of a [`StaticInspector`]
#[derive(Debug, Clone)]
pub enum StaticChild {
    Text(String),
    Value(Value),
    Inspector(StaticInspector),
    Error(InspectError),
}

/// A custom inspector over owned data
///
/// Only the accessors that were configured are advertised in
/// [`capabilities`](CustomInspector::capabilities).
#[derive(Debug, Clone, Default)]
pub struct StaticInspector {
    text: Option<Result<DisplayText, InspectError>>,
    children: Option<Vec<(String, StaticChild)>>,
    hint: Option<DisplayHint>,
    address: Option<ValueRef>,
}

impl StaticInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(Ok(DisplayText::Text(text.into())));
        self
    }

    /// Display text produced by formatting a value
    pub fn value_text(mut self, value: Value) -> Self {
        self.text = Some(Ok(DisplayText::Value(value)));
        self
    }

    /// Make `to_display_string` fail with `error`
    pub fn failing_text(mut self, error: InspectError) -> Self {
        self.text = Some(Err(error));
        self
    }

    /// Declare children even if none are added
    pub fn with_children(mut self) -> Self {
        self.children.get_or_insert_with(Vec::new);
        self
    }

    pub fn child(mut self, label: impl Into<String>, child: StaticChild) -> Self {
        self.children
            .get_or_insert_with(Vec::new)
            .push((label.into(), child));
        self
    }

    pub fn hint(mut self, hint: DisplayHint) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn address(mut self, address: ValueRef) -> Self {
        self.address = Some(address);
        self
    }

    pub fn boxed(self) -> Box<dyn CustomInspector> {
        Box::new(self)
    }
}

impl CustomInspector for StaticInspector {
    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::TO_STRING, self.text.is_some());
        caps.set(Capabilities::CHILDREN, self.children.is_some());
        caps.set(Capabilities::DISPLAY_HINT, self.hint.is_some());
        caps.set(Capabilities::ADDRESS, self.address.is_some());
        caps
    }

    fn to_display_string(&self) -> Result<Option<DisplayText>, InspectError> {
        self.text.clone().transpose()
    }

    fn children(&self) -> Result<ChildIter<'_>, InspectError> {
        let children = self.children.as_deref().unwrap_or(&[]);
        Ok(Box::new(children.iter().map(|(label, child)| {
            let value = match child {
                StaticChild::Text(s) => NodeValue::Text(s.clone()),
                StaticChild::Value(v) => NodeValue::borrowed(v),
                StaticChild::Inspector(i) => NodeValue::Custom(Box::new(i)),
                StaticChild::Error(e) => NodeValue::Missing(e.clone()),
            };
            Ok(Child::new(label.clone(), value))
        })))
    }

    fn display_hint(&self) -> Option<DisplayHint> {
        self.hint
    }

    fn address(&self) -> Result<Option<ValueRef>, InspectError> {
        Ok(self.address.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Type, TypeKind};

    struct NoHost;
    impl Host for NoHost {}

    #[test]
    fn test_capabilities_follow_configuration() {
        let leaf = StaticInspector::new().text("hello");
        assert_eq!(leaf.capabilities(), Capabilities::TO_STRING);

        let map = StaticInspector::new()
            .hint(DisplayHint::Map)
            .child("k", StaticChild::Text("a".into()))
            .child("v", StaticChild::Value(Value::int(&Type::int("int"), 1)));
        assert_eq!(
            map.capabilities(),
            Capabilities::CHILDREN | Capabilities::DISPLAY_HINT
        );
        assert_eq!(map.children().unwrap().count(), 2);
    }

    #[test]
    fn test_failing_text_surfaces_error() {
        let broken = StaticInspector::new().failing_text(InspectError::printer("boom"));
        assert_eq!(
            broken.to_display_string(),
            Err(InspectError::Printer("boom".into()))
        );
    }

    #[test]
    fn test_registry_first_claim_wins() {
        let mut registry = PrinterRegistry::new();
        registry.register("never", |_, _| None);
        registry.register("structs", |v, _| {
            matches!(v.ty.strip_typedefs().kind, TypeKind::Struct(_))
                .then(|| StaticInspector::new().text("first").boxed())
        });
        registry.register("everything", |_, _| {
            Some(StaticInspector::new().text("second").boxed())
        });
        assert_eq!(registry.len(), 3);

        let record = Value::new(&Type::record("S", vec![]), Default::default());
        let claimed = registry.lookup(&record, &NoHost).unwrap();
        assert_eq!(
            claimed.to_display_string().unwrap(),
            Some(DisplayText::Text("first".into()))
        );

        let int = Value::int(&Type::int("int"), 1);
        let claimed = registry.lookup(&int, &NoHost).unwrap();
        assert_eq!(
            claimed.to_display_string().unwrap(),
            Some(DisplayText::Text("second".into()))
        );
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = PrinterRegistry::new();
        registry.register("p", |_, _| None);
        registry.register("p", |_, _| Some(StaticInspector::new().boxed()));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["p"]);
        let int = Value::int(&Type::int("int"), 1);
        assert!(registry.lookup(&int, &NoHost).is_some());
    }
}
