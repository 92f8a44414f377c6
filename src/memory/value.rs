//! Runtime value representation
//!
//! This module defines [`Value`], a snapshot of one debuggee value as the host
//! evaluated it: its [`Type`], its [`Contents`], where it lives, and (for
//! polymorphic records) the most-derived view of the same object.
//!
//! # Contents
//!
//! - [`Contents::Int`] / [`Contents::UInt`]: integers and enums
//! - [`Contents::Char`]: a character code point
//! - [`Contents::Pointer`]: a raw address, dereferenced lazily through the host
//! - [`Contents::Reference`]: a reference already bound to its referent
//! - [`Contents::Array`] / [`Contents::Struct`]: aggregates, element or field order
//! - [`Contents::Unavailable`]: optimized out by the compiler
//!
//! Pointers hold only an address. The pointee is read through the host when
//! a node is expanded.

use super::types::{Type, TypeKind};
use super::Address;
use std::rc::Rc;

/// Raw contents of a value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Contents {
    Int(i64),
    UInt(u64),
    Char(u32),
    Bool(bool),
    Float(f64),
    Complex(f64, f64),
    Pointer(Address),
    Reference(Box<Value>),
    Array(Vec<Value>),
    Struct(Vec<Value>), // parallel to the type's fields
    Function(Address),
    #[default]
    Unavailable,
}

/// A typed debuggee value
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub ty: Rc<Type>,
    pub contents: Contents,
    /// Where the value lives, if it is an lvalue
    pub address: Option<Address>,
    /// Most-derived view when the runtime type differs from `ty`
    pub dynamic: Option<Box<Value>>,
}

/// A typed address, the thing a pin refers to
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRef {
    pub address: Address,
    pub ty: Rc<Type>,
}

impl Value {
    pub fn new(ty: &Rc<Type>, contents: Contents) -> Self {
        Value {
            ty: Rc::clone(ty),
            contents,
            address: None,
            dynamic: None,
        }
    }

    pub fn int(ty: &Rc<Type>, n: i64) -> Self {
        Value::new(ty, Contents::Int(n))
    }

    pub fn char(c: char) -> Self {
        Value::new(&Type::char(), Contents::Char(c as u32))
    }

    pub fn pointer(ty: &Rc<Type>, address: Address) -> Self {
        Value::new(ty, Contents::Pointer(address))
    }

    pub fn optimized_out(ty: &Rc<Type>) -> Self {
        Value::new(ty, Contents::Unavailable)
    }

    /// NUL-terminated char array holding `text`
    pub fn c_string(text: &str, capacity: usize) -> Self {
        let ty = Type::array_of(&Type::char(), capacity);
        let mut chars: Vec<Value> = text.chars().take(capacity).map(Value::char).collect();
        while chars.len() < capacity {
            chars.push(Value::char('\0'));
        }
        Value::new(&ty, Contents::Array(chars))
    }

    /// Place this value at `address`
    pub fn at(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Attach the most-derived view of a polymorphic record
    pub fn with_dynamic(mut self, derived: Value) -> Self {
        self.dynamic = Some(Box::new(derived));
        self
    }

    /// True if the compiler dropped this value, or any part of a record
    pub fn is_optimized_out(&self) -> bool {
        match &self.contents {
            Contents::Unavailable => true,
            Contents::Struct(fields) => fields.iter().any(Value::is_optimized_out),
            _ => false,
        }
    }

    /// The referent, if this value is a reference
    pub fn referenced_value(&self) -> Option<&Value> {
        match &self.contents {
            Contents::Reference(target) => Some(target),
            _ => None,
        }
    }

    pub fn as_pointer(&self) -> Option<Address> {
        match self.contents {
            Contents::Pointer(addr) | Contents::Function(addr) => Some(addr),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.contents {
            Contents::Int(n) => Some(n),
            Contents::UInt(n) => Some(n as i64),
            Contents::Char(c) => Some(c as i64),
            Contents::Bool(b) => Some(b as i64),
            Contents::Pointer(a) | Contents::Function(a) => Some(a as i64),
            _ => None,
        }
    }

    /// Array element by source-level index (honouring a non-zero low bound)
    pub fn element(&self, index: i64) -> Option<&Value> {
        let low = match &self.ty.strip_typedefs().kind {
            TypeKind::Array { low, .. } => *low,
            _ => 0,
        };
        match &self.contents {
            Contents::Array(elements) => usize::try_from(index - low)
                .ok()
                .and_then(|i| elements.get(i)),
            _ => None,
        }
    }

    /// Field by position in the type's field list
    pub fn field(&self, index: usize) -> Option<&Value> {
        match &self.contents {
            Contents::Struct(fields) => fields.get(index),
            _ => None,
        }
    }

    /// A typed reference to this value's storage
    pub fn reference(&self) -> Option<ValueRef> {
        self.address.map(|address| ValueRef {
            address,
            ty: Rc::clone(&self.ty),
        })
    }
}
