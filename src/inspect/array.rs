//! Array strategy
//!
//! Children are the elements of the inclusive `[low, high]` range, labelled
//! `"[i]"`. Arrays of characters also have display text: the whole array
//! shown as one string.

use super::format::{format_value, FormatOptions};
use super::{Capabilities, Child, ChildIter, NodeValue};
use crate::errors::InspectError;
use crate::host::Host;
use crate::memory::{TypeKind, Value};

pub struct ArrayInspector<'a> {
    value: &'a Value,
    host: &'a dyn Host,
}

impl<'a> ArrayInspector<'a> {
    pub fn new(value: &'a Value, host: &'a dyn Host) -> Self {
        ArrayInspector { value, host }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Inclusive index bounds
    pub fn range(&self) -> (i64, i64) {
        match &self.value.ty.strip_typedefs().kind {
            TypeKind::Array { low, high, .. } => (*low, *high),
            _ => (0, -1),
        }
    }

    fn is_string(&self) -> bool {
        self.value
            .ty
            .target()
            .is_some_and(|element| element.is_char_like())
    }

    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::CHILDREN | Capabilities::ADDRESS;
        if self.is_string() {
            caps |= Capabilities::TO_STRING;
        }
        caps
    }

    pub fn to_display_string(&self) -> Result<Option<String>, InspectError> {
        if !self.is_string() {
            return Ok(None);
        }
        // format letters never apply to strings
        format_value(self.value, self.host, FormatOptions::raw(None)).map(Some)
    }

    pub fn children(&self) -> ChildIter<'_> {
        let (low, high) = self.range();
        let value = self.value;
        let element_ty = value.ty.target().cloned();
        Box::new((low..=high).map(move |i| {
            let child = match value.element(i) {
                Some(element) => NodeValue::borrowed(element),
                None => match &element_ty {
                    Some(ty) => NodeValue::owned(Value::optimized_out(ty)),
                    None => NodeValue::Missing(InspectError::NotAPointer),
                },
            };
            Ok(Child::new(format!("[{}]", i), child))
        }))
    }
}
