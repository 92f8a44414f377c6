//! Pointer strategy
//!
//! A pointer shows its own address (plus the pointed-to string for `char *`)
//! and has exactly one child, `"[0]"`, read through the host only when
//! children are actually requested. A failed read becomes that child's error
//! leaf; the pointer line itself still renders.

use super::format::{format_value, FormatOptions};
use super::{Child, ChildIter, InspectOptions, NodeValue};
use crate::errors::InspectError;
use crate::host::Host;
use crate::memory::{TypeKind, Value};

pub struct PointerInspector<'a> {
    value: &'a Value,
    host: &'a dyn Host,
    options: InspectOptions,
}

impl<'a> PointerInspector<'a> {
    pub fn new(value: &'a Value, host: &'a dyn Host, options: InspectOptions) -> Self {
        PointerInspector {
            value,
            host,
            options,
        }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn to_display_string(&self) -> Result<String, InspectError> {
        format_value(self.value, self.host, FormatOptions::raw(self.options.format))
    }

    pub fn children(&self) -> ChildIter<'_> {
        let target = match self.value.ty.target() {
            Some(t) if matches!(t.strip_typedefs().kind, TypeKind::Void) => {
                Err(InspectError::GenericPointer)
            }
            _ => self.host.dereference(self.value),
        };
        let child = match target {
            Ok(v) => NodeValue::owned(v),
            Err(e) => NodeValue::Missing(e),
        };
        Box::new(std::iter::once(Ok(Child::new("[0]", child))))
    }

    /// True unless the target is itself a pointer
    pub fn is_single_indirection(&self) -> bool {
        !self
            .value
            .ty
            .target()
            .is_some_and(|t| matches!(t.strip_typedefs().kind, TypeKind::Pointer(_)))
    }
}
