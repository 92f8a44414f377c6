//! Error types
//!
//! [`InspectError`] is every failure a single tree node can hit while it is
//! being inspected. It never escapes the node: the renderer shows its
//! `Display` text inline as `<message>` and carries on with the siblings.

use crate::memory::Address;
use thiserror::Error;

/// Failure while evaluating, dereferencing or formatting one value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InspectError {
    #[error("Cannot access memory at address {address:#x}")]
    MemoryAccess { address: Address },

    #[error("Attempt to take contents of a non-pointer value.")]
    NotAPointer,

    /// `void *` and friends have no pointee type
    #[error("Attempt to take contents of a generic pointer.")]
    GenericPointer,

    /// Non-record value the compiler dropped
    #[error("optimized out")]
    OptimizedOut,

    #[error("No symbol \"{0}\" in current context.")]
    UnknownSymbol(String),

    #[error("Undefined output format \"{0}\".")]
    BadFormat(char),

    #[error("Undefined command: \"{0}\".")]
    UnknownCommand(String),

    #[error("No thread selected.")]
    NoThread,

    /// Host-reported evaluation failure, shown verbatim
    #[error("{0}")]
    Evaluation(String),

    /// A pretty printer failed
    #[error("{0}")]
    Printer(String),
}

impl InspectError {
    pub fn printer(message: impl Into<String>) -> Self {
        InspectError::Printer(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            InspectError::MemoryAccess { address: 0x10 }.to_string(),
            "Cannot access memory at address 0x10"
        );
        assert_eq!(
            InspectError::UnknownSymbol("foo".into()).to_string(),
            "No symbol \"foo\" in current context."
        );
        assert_eq!(InspectError::printer("boom").to_string(), "boom");
    }
}
