//! Record strategy
//!
//! Structs and unions list their non-static fields in declaration order.
//! Named fields are labelled by name, anonymous members `"[anonymous]"` and
//! base-class sub-objects `"<Base>"`. Keys carry the field's 1-based position
//! so two anonymous members never collide.
//!
//! With dynamic-type resolution on, a record whose runtime type differs from
//! its declared one is shown through the most-derived view instead.

use super::{Child, ChildIter, InspectOptions, NodeValue};
use crate::memory::{Field, TypeKind, Value};

pub struct RecordInspector<'a> {
    /// The value whose fields are listed (the derived view when resolved)
    value: &'a Value,
    dynamic_name: Option<String>,
}

impl<'a> RecordInspector<'a> {
    pub fn new(value: &'a Value, options: InspectOptions) -> Self {
        if options.dynamic_type {
            if let Some(derived) = resolve_dynamic(value) {
                return RecordInspector {
                    value: derived,
                    dynamic_name: Some(derived.ty.to_string()),
                };
            }
        }
        RecordInspector {
            value,
            dynamic_name: None,
        }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Runtime type name when it differs from the declared one
    pub fn dynamic_name(&self) -> Option<String> {
        self.dynamic_name.clone()
    }

    pub fn children(&self) -> ChildIter<'_> {
        let value = self.value;
        let fields: &'a [Field] = value.ty.fields().unwrap_or(&[]);
        Box::new(
            fields
                .iter()
                .enumerate()
                .filter(|(_, field)| !field.is_static)
                .enumerate()
                .map(move |(ordinal, (index, field))| {
                    let label = field_label(field);
                    let child = match value.field(index) {
                        Some(v) => NodeValue::borrowed(v),
                        None => NodeValue::owned(Value::optimized_out(&field.ty)),
                    };
                    Ok(Child {
                        key: format!("{}:{}", label, ordinal + 1),
                        label,
                        value: child,
                    })
                }),
        )
    }
}

fn field_label(field: &Field) -> String {
    match (&field.name, field.is_base_class) {
        (_, true) => format!("<{}>", field.ty),
        (Some(name), false) => name.clone(),
        (None, false) => "[anonymous]".to_string(),
    }
}

/// Only plain structs are resolved, and only when the runtime type is a
/// different type than the declared one
fn resolve_dynamic(value: &Value) -> Option<&Value> {
    if !matches!(value.ty.strip_typedefs().kind, TypeKind::Struct(_)) {
        return None;
    }
    value
        .dynamic
        .as_deref()
        .filter(|derived| derived.ty.strip_typedefs() != value.ty.strip_typedefs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Contents, Type};

    fn labels_and_keys(r: &RecordInspector<'_>) -> Vec<(String, String)> {
        r.children()
            .filter_map(Result::ok)
            .map(|c| (c.label, c.key))
            .collect()
    }

    #[test]
    fn test_field_labels_and_keys() {
        let int = Type::int("int");
        let base = Type::record("Base", vec![Field::new("id", &int)]);
        let mut hidden = Field::new("count", &int);
        hidden.is_static = true;
        let ty = Type::record(
            "Thing",
            vec![
                Field::base_class(&base),
                hidden,
                Field::new("x", &int),
                Field::anonymous(&int),
            ],
        );
        let v = Value::new(
            &ty,
            Contents::Struct(vec![
                Value::new(&base, Contents::Struct(vec![Value::int(&int, 1)])),
                Value::int(&int, 0),
                Value::int(&int, 2),
                Value::int(&int, 3),
            ]),
        );
        let r = RecordInspector::new(&v, InspectOptions::default());
        assert_eq!(
            labels_and_keys(&r),
            vec![
                ("<Base>".to_string(), "<Base>:1".to_string()),
                ("x".to_string(), "x:2".to_string()),
                ("[anonymous]".to_string(), "[anonymous]:3".to_string()),
            ]
        );
    }

    #[test]
    fn test_dynamic_type_only_when_requested() {
        let int = Type::int("int");
        let base = Type::record("Shape", vec![Field::new("id", &int)]);
        let derived_ty = Type::record(
            "Circle",
            vec![Field::base_class(&base), Field::new("radius", &int)],
        );
        let base_part = Value::new(&base, Contents::Struct(vec![Value::int(&int, 7)]));
        let derived = Value::new(
            &derived_ty,
            Contents::Struct(vec![base_part.clone(), Value::int(&int, 3)]),
        );
        let v = base_part.with_dynamic(derived);

        let plain = RecordInspector::new(&v, InspectOptions::default());
        assert_eq!(plain.dynamic_name(), None);
        assert_eq!(plain.children().count(), 1);

        let options = InspectOptions {
            dynamic_type: true,
            ..InspectOptions::default()
        };
        let resolved = RecordInspector::new(&v, options);
        assert_eq!(resolved.dynamic_name().as_deref(), Some("Circle"));
        assert_eq!(resolved.children().count(), 2);
    }
}
