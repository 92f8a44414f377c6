//! Change highlighting
//!
//! Each rendered node compares its display text with a baseline carried over
//! from the previous refill. The outcome colors the name and the value
//! independently: a name can be "argument" colored while its value is
//! "changed" colored on the same line.

pub const RESET: &str = "\x1b[0m";
pub const DIM: &str = "\x1b[1;30m";
pub const NEW: &str = "\x1b[1;32m";
pub const CHANGED: &str = "\x1b[1;31m";
pub const ARGUMENT: &str = "\x1b[1;35m";
pub const UNINITIALIZED: &str = "\x1b[33m";
pub const PINNED: &str = "\x1b[1;36m";
pub const SELECTED: &str = "\x1b[1;37m";

/// What the previous refill knew about a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline<'a> {
    /// The node did not exist
    Absent,
    /// The node existed, with this display text (`None` if it had none)
    Present(Option<&'a str>),
}

/// Per-node flags that override the name color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeFlags {
    pub uninitialized: bool,
    pub argument: bool,
}

/// Markers for the name and value of one line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coloring {
    pub name: Option<&'static str>,
    pub value: Option<&'static str>,
}

impl Coloring {
    pub fn paint_name(&self, name: &str) -> String {
        wrap(self.name, name)
    }

    pub fn paint_value(&self, value: &str) -> String {
        wrap(self.value, value)
    }
}

fn wrap(marker: Option<&str>, text: &str) -> String {
    match marker {
        Some(m) => format!("{}{}{}", m, text, RESET),
        None => text.to_string(),
    }
}

/// Colors for a node given its baseline and current text
///
/// `empty` marks a placeholder line with no value at all.
pub fn diff_color(
    baseline: Baseline<'_>,
    current: Option<&str>,
    flags: NodeFlags,
    empty: bool,
) -> Coloring {
    let mut coloring = Coloring::default();
    if empty {
        coloring.name = Some(DIM);
    } else {
        match baseline {
            Baseline::Absent => coloring.name = Some(NEW),
            Baseline::Present(previous) if previous != current => coloring.value = Some(CHANGED),
            Baseline::Present(_) => {}
        }
    }
    if flags.argument {
        coloring.name = Some(ARGUMENT);
    } else if flags.uninitialized {
        coloring.name = Some(UNINITIALIZED);
    }
    coloring
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: NodeFlags = NodeFlags {
        uninitialized: false,
        argument: false,
    };

    #[test]
    fn test_new_node_colors_name() {
        let c = diff_color(Baseline::Absent, Some("1"), PLAIN, false);
        assert_eq!(c.name, Some(NEW));
        assert_eq!(c.value, None);
    }

    #[test]
    fn test_changed_value_colors_value_only() {
        let c = diff_color(Baseline::Present(Some("1")), Some("2"), PLAIN, false);
        assert_eq!(c, Coloring { name: None, value: Some(CHANGED) });
        let same = diff_color(Baseline::Present(Some("2")), Some("2"), PLAIN, false);
        assert_eq!(same, Coloring::default());
    }

    #[test]
    fn test_argument_and_changed_coexist() {
        let flags = NodeFlags {
            argument: true,
            uninitialized: true,
        };
        let c = diff_color(Baseline::Present(Some("1")), Some("2"), flags, false);
        assert_eq!(c.name, Some(ARGUMENT));
        assert_eq!(c.value, Some(CHANGED));
    }

    #[test]
    fn test_empty_placeholder_is_dim_unless_flagged() {
        let c = diff_color(Baseline::Absent, None, PLAIN, true);
        assert_eq!(c.name, Some(DIM));
        let flags = NodeFlags {
            uninitialized: true,
            argument: false,
        };
        let c = diff_color(Baseline::Absent, None, flags, true);
        assert_eq!(c.name, Some(UNINITIALIZED));
        assert_eq!(c.paint_name("x"), "\x1b[33mx\x1b[0m");
    }
}
