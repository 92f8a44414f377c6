//! Frames window: the selected thread's backtrace

use crate::errors::InspectError;
use crate::host::{FrameInfo, Host};
use crate::ui::list::{strip_template_args, ListEntry, ListWindow, SelectionSource};
use crate::ui::viewport::Viewport;

pub const TITLE: &str = "frames";

pub struct FramesSource;

impl SelectionSource for FramesSource {
    fn entries(&self, host: &dyn Host) -> Vec<ListEntry> {
        host.frames().iter().map(frame_entry).collect()
    }

    fn select(&self, host: &mut dyn Host, id: u64) -> Result<(), InspectError> {
        let level = usize::try_from(id).map_err(|_| InspectError::NoThread)?;
        host.select_frame(level)
    }
}

fn frame_entry(frame: &FrameInfo) -> ListEntry {
    let name = match &frame.function {
        Some(function) => strip_template_args(function),
        None => format!("{:#x}", frame.pc),
    };
    ListEntry::new(frame.level as u64, format!("#{:<2} ", frame.level), name)
        .selected(frame.selected)
}

pub type FramesWindow = ListWindow<FramesSource>;

pub fn frames_window(viewport: Viewport) -> FramesWindow {
    ListWindow::new(TITLE, FramesSource, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_lines() {
        let entry = frame_entry(&FrameInfo {
            level: 3,
            function: Some("Box<T>::get".into()),
            pc: 0x10,
            selected: true,
        });
        assert_eq!(entry.prefix, "#3  ");
        assert_eq!(entry.text, "Box::get");
        assert!(entry.selected);

        let unnamed = frame_entry(&FrameInfo {
            level: 12,
            function: None,
            pc: 0xdead,
            selected: false,
        });
        assert_eq!(unnamed.prefix, "#12 ");
        assert_eq!(unnamed.text, "0xdead");
    }
}
