//! Debuggee value model
//!
//! This module provides the data the host hands to the renderers:
//! - [`types`]: type descriptions ([`Type`], [`TypeKind`], [`Field`])
//! - [`value`]: evaluated values ([`Value`], [`Contents`], [`ValueRef`])
//!
//! Nothing here reads memory. Pointer targets, C strings and raw bytes are
//! fetched on demand through the [`Host`](crate::host::Host) collaborator.

pub mod types;
pub mod value;

pub use types::{Field, Type, TypeKind};
pub use value::{Contents, Value, ValueRef};

/// Debuggee address (64-bit)
pub type Address = u64;
