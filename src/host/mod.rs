//! Host debugger collaborator
//!
//! The renderers never read debuggee memory or walk frames themselves. They
//! ask a [`Host`] for everything: pointer targets, strings, raw bytes,
//! pretty printers, the thread/frame context, and the named convenience
//! slots that pins are published to.
//!
//! Every method has a conservative default so a host implements only what it
//! supports. [`demo`] contains a simulated debuggee used by the binary.

pub mod demo;

use crate::errors::InspectError;
use crate::inspect::CustomInspector;
use crate::memory::{Address, Value, ValueRef};

/// A thread as listed by the threads window
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadInfo {
    pub num: u32,
    /// Kernel thread id
    pub lwp: u64,
    /// Function of the newest frame, if known
    pub function: Option<String>,
    pub pc: Address,
    pub selected: bool,
}

/// A frame of the selected thread, newest first
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInfo {
    pub level: usize,
    pub function: Option<String>,
    pub pc: Address,
    pub selected: bool,
}

/// A symbol visible in a lexical block
#[derive(Debug, Clone)]
pub struct ScopeSymbol {
    pub name: String,
    pub is_argument: bool,
    /// Declaration line, 0 if unknown
    pub line: u32,
    pub value: Result<Value, InspectError>,
}

/// One lexical block, innermost first in [`FrameScope::blocks`]
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub symbols: Vec<ScopeSymbol>,
    /// The outermost block of a function body
    pub is_function: bool,
    /// File-level scope, never listed as locals
    pub is_global: bool,
}

/// The selected frame's lexical scope
#[derive(Debug, Clone, Default)]
pub struct FrameScope {
    /// Line the frame is stopped at
    pub line: u32,
    pub blocks: Vec<Block>,
}

/// One entry of the auto-display list
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayExpr {
    pub number: u32,
    pub enabled: bool,
    /// Format flags as typed after `/`, e.g. `"x"` or `"rx"`
    pub format: Option<String>,
    pub expression: String,
    /// False when the expression cannot be evaluated in the current context
    pub in_scope: bool,
}

/// Services the renderers consume from the debugger
pub trait Host {
    /// Read the value a pointer points to
    fn dereference(&self, pointer: &Value) -> Result<Value, InspectError> {
        match pointer.as_pointer() {
            Some(address) => Err(InspectError::MemoryAccess { address }),
            None => Err(InspectError::NotAPointer),
        }
    }

    /// Read a NUL-terminated string
    fn read_string(&self, address: Address) -> Result<String, InspectError> {
        Err(InspectError::MemoryAccess { address })
    }

    fn read_memory(&self, address: Address, _len: usize) -> Result<Vec<u8>, InspectError> {
        Err(InspectError::MemoryAccess { address })
    }

    fn pointer_size(&self) -> usize {
        8
    }

    /// Name of the function containing `address`
    fn symbol_at(&self, _address: Address) -> Option<String> {
        None
    }

    /// Pretty printer claiming `value`, if any
    fn lookup_printer(&self, _value: &Value) -> Option<Box<dyn CustomInspector>> {
        None
    }

    fn convenience(&self, _name: &str) -> Option<ValueRef> {
        None
    }

    fn set_convenience(&mut self, _name: &str, _value: ValueRef) {}

    /// All threads of the selected inferior
    fn threads(&self) -> Vec<ThreadInfo> {
        Vec::new()
    }

    /// Whether a live thread is selected
    fn has_thread(&self) -> bool {
        self.threads().iter().any(|t| t.selected)
    }

    fn select_thread(&mut self, _num: u32) -> Result<(), InspectError> {
        Err(InspectError::NoThread)
    }

    /// Frames of the selected thread, newest first
    fn frames(&self) -> Vec<FrameInfo> {
        Vec::new()
    }

    fn select_frame(&mut self, _level: usize) -> Result<(), InspectError> {
        Err(InspectError::NoThread)
    }

    /// Scope of the selected frame; `None` without a live thread
    fn frame_scope(&self) -> Option<FrameScope> {
        None
    }

    fn displays(&self) -> Vec<DisplayExpr> {
        Vec::new()
    }

    fn evaluate(&self, expression: &str) -> Result<Value, InspectError> {
        Err(InspectError::UnknownSymbol(expression.to_string()))
    }

    /// One disassembled instruction at `address`
    fn disassemble(&self, _address: Address) -> Option<String> {
        None
    }

    /// Run a CLI command and capture its (possibly styled) output
    fn execute(&self, command: &str) -> Result<String, InspectError> {
        Err(InspectError::UnknownCommand(command.to_string()))
    }
}
