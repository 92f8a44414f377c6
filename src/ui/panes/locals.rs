//! Locals window: the selected frame's variables

use crate::host::Host;
use crate::inspect::NodeValue;
use crate::ui::tree::{Entry, TreeWindow, VariableSource};
use crate::ui::viewport::Viewport;

pub const TITLE: &str = "locals";
pub const PIN_SLOT: &str = "lv";

/// Variables of every block from the innermost one out to the function body
pub struct LocalsSource;

impl VariableSource for LocalsSource {
    fn entries<'h>(&self, host: &'h dyn Host) -> Vec<Entry<'h>> {
        let Some(scope) = host.frame_scope() else {
            return Vec::new();
        };
        let mut entries = Vec::new();
        for block in scope.blocks {
            if !block.is_global {
                for symbol in block.symbols {
                    // declared further down and not reached yet
                    let undeclared =
                        !symbol.is_argument && symbol.line > 0 && scope.line <= symbol.line;
                    let entry = match symbol.value {
                        Ok(value) => Entry::new(symbol.name, NodeValue::owned(value)),
                        Err(e) => Entry::failed(symbol.name, e.to_string()),
                    };
                    entries.push(entry.undeclared(undeclared).argument(symbol.is_argument));
                }
            }
            if block.is_function {
                break;
            }
        }
        entries
    }
}

pub type LocalsWindow = TreeWindow<LocalsSource>;

pub fn locals_window(viewport: Viewport) -> LocalsWindow {
    TreeWindow::new(TITLE, PIN_SLOT, LocalsSource, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InspectError;
    use crate::host::{Block, FrameScope, ScopeSymbol};
    use crate::memory::{Type, Value};

    struct ScopeHost(FrameScope);

    impl Host for ScopeHost {
        fn frame_scope(&self) -> Option<FrameScope> {
            Some(self.0.clone())
        }
    }

    fn symbol(name: &str, line: u32, is_argument: bool) -> ScopeSymbol {
        ScopeSymbol {
            name: name.to_string(),
            is_argument,
            line,
            value: Ok(Value::int(&Type::int("int"), 1)),
        }
    }

    #[test]
    fn test_walks_out_to_the_function_block() {
        let host = ScopeHost(FrameScope {
            line: 10,
            blocks: vec![
                Block {
                    symbols: vec![symbol("i", 9, false), symbol("later", 12, false)],
                    ..Block::default()
                },
                Block {
                    symbols: vec![symbol("argc", 3, true), symbol("total", 10, false)],
                    is_function: true,
                    ..Block::default()
                },
                Block {
                    symbols: vec![symbol("global", 1, false)],
                    is_global: true,
                    ..Block::default()
                },
            ],
        });
        let entries = LocalsSource.entries(&host);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["i", "later", "argc", "total"]);
        let undeclared: Vec<bool> = entries.iter().map(|e| e.undeclared).collect();
        assert_eq!(undeclared, vec![false, true, false, true]);
        assert!(entries[2].argument);
    }

    #[test]
    fn test_unreadable_symbol_becomes_error_entry() {
        let host = ScopeHost(FrameScope {
            line: 5,
            blocks: vec![Block {
                symbols: vec![ScopeSymbol {
                    name: "p".into(),
                    is_argument: false,
                    line: 0,
                    value: Err(InspectError::MemoryAccess { address: 0x8 }),
                }],
                is_function: true,
                ..Block::default()
            }],
        });
        let entries = LocalsSource.entries(&host);
        assert_eq!(
            entries[0].error.as_deref(),
            Some("Cannot access memory at address 0x8")
        );
    }

    #[test]
    fn test_no_frame_no_entries() {
        struct NoHost;
        impl Host for NoHost {}
        assert!(LocalsSource.entries(&NoHost).is_empty());
    }
}
