//! Debuggee type descriptions
//!
//! A [`Type`] is what the host reports for a value: an optional name plus a
//! [`TypeKind`] describing its shape. The inspector layer only looks at the
//! shape after [`Type::strip_typedefs`], so typedef chains are transparent
//! everywhere except where a typedef name carries meaning (`wchar_t`).

use std::fmt;
use std::rc::Rc;

/// Shape of a debuggee type
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Int { signed: bool, size: usize },
    Char,
    Bool,
    Float,
    Complex,
    Enum(Vec<(String, i64)>),
    Pointer(Rc<Type>),
    Reference(Rc<Type>),
    /// Inclusive index range `low..=high`
    Array { element: Rc<Type>, low: i64, high: i64 },
    Struct(Vec<Field>),
    Union(Vec<Field>),
    Function,
    Typedef(Rc<Type>),
    Void,
}

/// A field of a struct or union
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// `None` for anonymous members
    pub name: Option<String>,
    pub ty: Rc<Type>,
    pub is_base_class: bool,
    /// Static members have no storage in the object and are never listed
    pub is_static: bool,
}

impl Field {
    pub fn new(name: &str, ty: &Rc<Type>) -> Self {
        Field {
            name: Some(name.to_string()),
            ty: Rc::clone(ty),
            is_base_class: false,
            is_static: false,
        }
    }

    pub fn anonymous(ty: &Rc<Type>) -> Self {
        Field {
            name: None,
            ty: Rc::clone(ty),
            is_base_class: false,
            is_static: false,
        }
    }

    pub fn base_class(ty: &Rc<Type>) -> Self {
        Field {
            name: ty.name.clone(),
            ty: Rc::clone(ty),
            is_base_class: true,
            is_static: false,
        }
    }
}

/// A debuggee type
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub name: Option<String>,
    pub kind: TypeKind,
}

impl Type {
    pub fn new(name: Option<&str>, kind: TypeKind) -> Rc<Type> {
        Rc::new(Type {
            name: name.map(str::to_string),
            kind,
        })
    }

    pub fn int(name: &str) -> Rc<Type> {
        Type::new(
            Some(name),
            TypeKind::Int {
                signed: true,
                size: 4,
            },
        )
    }

    pub fn unsigned(name: &str, size: usize) -> Rc<Type> {
        Type::new(Some(name), TypeKind::Int { signed: false, size })
    }

    pub fn char() -> Rc<Type> {
        Type::new(Some("char"), TypeKind::Char)
    }

    pub fn bool() -> Rc<Type> {
        Type::new(Some("bool"), TypeKind::Bool)
    }

    pub fn float(name: &str) -> Rc<Type> {
        Type::new(Some(name), TypeKind::Float)
    }

    pub fn void() -> Rc<Type> {
        Type::new(Some("void"), TypeKind::Void)
    }

    pub fn pointer_to(target: &Rc<Type>) -> Rc<Type> {
        Type::new(None, TypeKind::Pointer(Rc::clone(target)))
    }

    pub fn reference_to(target: &Rc<Type>) -> Rc<Type> {
        Type::new(None, TypeKind::Reference(Rc::clone(target)))
    }

    /// Zero-based array of `len` elements
    pub fn array_of(element: &Rc<Type>, len: usize) -> Rc<Type> {
        Type::new(
            None,
            TypeKind::Array {
                element: Rc::clone(element),
                low: 0,
                high: len as i64 - 1,
            },
        )
    }

    pub fn record(name: &str, fields: Vec<Field>) -> Rc<Type> {
        Type::new(Some(name), TypeKind::Struct(fields))
    }

    pub fn typedef(name: &str, target: &Rc<Type>) -> Rc<Type> {
        Type::new(Some(name), TypeKind::Typedef(Rc::clone(target)))
    }

    /// Follow typedefs down to the underlying type
    pub fn strip_typedefs(&self) -> &Type {
        let mut ty = self;
        while let TypeKind::Typedef(target) = &ty.kind {
            ty = target;
        }
        ty
    }

    /// True when this type is named `name` or is a typedef chain passing
    /// through a type named `name`
    pub fn is_typedef_of(&self, name: &str) -> bool {
        let mut ty = self;
        loop {
            if ty.name.as_deref() == Some(name) {
                return true;
            }
            match &ty.kind {
                TypeKind::Typedef(target) => ty = target,
                _ => return false,
            }
        }
    }

    /// Pointee, referent or element type
    pub fn target(&self) -> Option<&Rc<Type>> {
        match &self.strip_typedefs().kind {
            TypeKind::Pointer(t) | TypeKind::Reference(t) => Some(t),
            TypeKind::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&[Field]> {
        match &self.strip_typedefs().kind {
            TypeKind::Struct(fields) | TypeKind::Union(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn is_record(&self) -> bool {
        self.fields().is_some()
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.strip_typedefs().kind, TypeKind::Reference(_))
    }

    /// Character-like: `char` itself or anything typedef'd as `wchar_t`
    pub fn is_char_like(&self) -> bool {
        matches!(self.strip_typedefs().kind, TypeKind::Char) || self.is_typedef_of("wchar_t")
    }

    /// Types whose values print inline as a single number-like token
    pub fn is_scalar_key(&self) -> bool {
        matches!(
            self.strip_typedefs().kind,
            TypeKind::Enum(_)
                | TypeKind::Int { .. }
                | TypeKind::Char
                | TypeKind::Float
                | TypeKind::Bool
                | TypeKind::Complex
        )
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return f.write_str(name);
        }
        match &self.kind {
            TypeKind::Pointer(target) => write!(f, "{} *", target),
            TypeKind::Reference(target) => write!(f, "{} &", target),
            TypeKind::Array { element, low, high } => {
                write!(f, "{} [{}]", element, high - low + 1)
            }
            TypeKind::Struct(_) => f.write_str("struct {...}"),
            TypeKind::Union(_) => f.write_str("union {...}"),
            TypeKind::Enum(_) => f.write_str("enum {...}"),
            TypeKind::Function => f.write_str("void (void)"),
            TypeKind::Typedef(target) => write!(f, "{}", target),
            TypeKind::Int { .. } => f.write_str("int"),
            TypeKind::Char => f.write_str("char"),
            TypeKind::Bool => f.write_str("bool"),
            TypeKind::Float => f.write_str("double"),
            TypeKind::Complex => f.write_str("complex double"),
            TypeKind::Void => f.write_str("void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_typedefs_follows_chain() {
        let int = Type::int("int");
        let inner = Type::typedef("count_t", &int);
        let outer = Type::typedef("size_alias", &inner);

        assert_eq!(outer.strip_typedefs(), &*int);
        assert!(outer.is_typedef_of("count_t"));
        assert!(!outer.is_typedef_of("long"));
    }

    #[test]
    fn test_wchar_is_char_like() {
        let wchar = Type::typedef("wchar_t", &Type::int("int"));
        assert!(wchar.is_char_like());
        assert!(Type::char().is_char_like());
        assert!(!Type::int("int").is_char_like());
    }

    #[test]
    fn test_display_synthesizes_anonymous_names() {
        let p = Type::pointer_to(&Type::char());
        assert_eq!(p.to_string(), "char *");
        let a = Type::array_of(&Type::int("int"), 4);
        assert_eq!(a.to_string(), "int [4]");
    }
}
