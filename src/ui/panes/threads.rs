//! Threads window
//!
//! Lists the inferior's threads newest first as `num: [lwp] name`, the
//! selected one highlighted. A click switches to that thread.

use crate::errors::InspectError;
use crate::host::{Host, ThreadInfo};
use crate::ui::list::{strip_template_args, ListEntry, ListWindow, SelectionSource};
use crate::ui::viewport::Viewport;

pub const TITLE: &str = "threads";

pub struct ThreadsSource;

impl SelectionSource for ThreadsSource {
    fn entries(&self, host: &dyn Host) -> Vec<ListEntry> {
        host.threads().iter().rev().map(thread_entry).collect()
    }

    fn select(&self, host: &mut dyn Host, id: u64) -> Result<(), InspectError> {
        let num = u32::try_from(id).map_err(|_| InspectError::NoThread)?;
        host.select_thread(num)
    }
}

fn thread_entry(thread: &ThreadInfo) -> ListEntry {
    let name = match &thread.function {
        Some(function) => strip_template_args(function),
        None => format!("{:#x}", thread.pc),
    };
    ListEntry::new(
        u64::from(thread.num),
        format!("{}: ", thread.num),
        format!("[{}] {}", thread.lwp, name),
    )
    .selected(thread.selected)
}

pub type ThreadsWindow = ListWindow<ThreadsSource>;

pub fn threads_window(viewport: Viewport) -> ThreadsWindow {
    ListWindow::new(TITLE, ThreadsSource, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ansi::strip;

    struct TwoThreads {
        selected: u32,
    }

    impl Host for TwoThreads {
        fn threads(&self) -> Vec<ThreadInfo> {
            vec![
                ThreadInfo {
                    num: 1,
                    lwp: 4001,
                    function: Some("std::sort<int*>".into()),
                    pc: 0x1000,
                    selected: self.selected == 1,
                },
                ThreadInfo {
                    num: 2,
                    lwp: 4002,
                    function: None,
                    pc: 0x2abc,
                    selected: self.selected == 2,
                },
            ]
        }

        fn select_thread(&mut self, num: u32) -> Result<(), InspectError> {
            self.selected = num;
            Ok(())
        }
    }

    #[test]
    fn test_threads_newest_first() {
        let entries = ThreadsSource.entries(&TwoThreads { selected: 1 });
        let lines: Vec<String> = entries
            .iter()
            .map(|e| strip(&format!("{}{}", e.prefix, e.text)))
            .collect();
        assert_eq!(lines, vec!["2: [4002] 0x2abc", "1: [4001] std::sort"]);
        assert!(entries[1].selected);
    }

    #[test]
    fn test_select_switches_thread() {
        let mut host = TwoThreads { selected: 1 };
        ThreadsSource.select(&mut host, 2).unwrap();
        assert_eq!(host.selected, 2);
    }
}
