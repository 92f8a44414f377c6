//! Memory window: a hex dump following a movable pointer
//!
//! Each row shows 16 bytes as the address, eight 2-byte groups and the
//! printable characters. The window always dumps exactly as many rows as it
//! is tall, so scrolling moves the pointer instead of the line offset.

use crate::host::Host;
use crate::memory::Address;
use crate::ui::viewport::Viewport;
use crate::ui::window::Window;
use std::any::Any;
use std::fmt::Write as _;
use tracing::debug;

pub const TITLE: &str = "memory";

const ROW_BYTES: usize = 16;

pub struct MemoryWindow {
    viewport: Viewport,
    pointer: Address,
}

impl MemoryWindow {
    pub fn new(mut viewport: Viewport) -> Self {
        viewport.region_mut().set_title(TITLE);
        MemoryWindow {
            viewport,
            pointer: 0,
        }
    }

    pub fn pointer(&self) -> Address {
        self.pointer
    }

    /// Start the dump at `pointer`; takes effect on the next refill
    pub fn set_pointer(&mut self, pointer: Address) {
        debug!(pointer = format_args!("{:#x}", pointer), "memory pointer moved");
        self.pointer = pointer;
    }

    /// Point at whatever the convenience slot `slot` holds
    pub fn follow_slot(&mut self, host: &dyn Host, slot: &str) -> bool {
        match host.convenience(slot) {
            Some(pinned) => {
                self.set_pointer(pinned.address);
                true
            }
            None => false,
        }
    }
}

/// One dump row for `bytes` (at most 16) starting at `address`
pub fn dump_row(address: Address, bytes: &[u8], pointer_size: usize) -> String {
    let mut row = format!("0x{:0width$x}  ", address, width = pointer_size * 2);
    let groups: Vec<String> = bytes
        .chunks(2)
        .map(|pair| pair.iter().map(|b| format!("{:02x}", b)).collect())
        .collect();
    row.push_str(&groups.join(" "));
    row.push_str("  ");
    for &b in bytes {
        let c = if (0x20..0x7f).contains(&b) { b as char } else { '.' };
        let _ = write!(row, "{}", c);
    }
    row
}

impl Window for MemoryWindow {
    fn title(&self) -> &str {
        TITLE
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn refill(&mut self, host: &dyn Host) {
        if !self.viewport.is_valid() {
            return;
        }
        let rows = self.viewport.height();
        let lines = match host.read_memory(self.pointer, ROW_BYTES * rows) {
            Ok(bytes) => bytes
                .chunks(ROW_BYTES)
                .enumerate()
                .map(|(i, chunk)| {
                    let address = self.pointer.wrapping_add((i * ROW_BYTES) as u64);
                    dump_row(address, chunk, host.pointer_size())
                })
                .collect(),
            Err(e) => vec![e.to_string()],
        };
        self.viewport.set_lines(lines);
    }

    // the dump is as long as the pane is tall
    fn resized(&mut self, host: &dyn Host) {
        self.refill(host);
        self.redraw();
    }

    fn vscroll(&mut self, host: &dyn Host, delta: isize) {
        let step = delta.saturating_mul(ROW_BYTES as isize) as i64;
        self.pointer = self.pointer.saturating_add_signed(step);
        self.refill(host);
        self.redraw();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InspectError;
    use crate::ui::region::PaneRegion;

    struct Bytes;

    impl Host for Bytes {
        fn read_memory(&self, address: Address, len: usize) -> Result<Vec<u8>, InspectError> {
            if address >= 0x1000 {
                return Err(InspectError::MemoryAccess { address });
            }
            Ok((0..len).map(|i| (address as usize + i) as u8).collect())
        }
    }

    #[test]
    fn test_dump_row_layout() {
        let bytes: Vec<u8> = b"Hello, world!\n\x00\xff".to_vec();
        assert_eq!(
            dump_row(0x10, &bytes, 8),
            "0x0000000000000010  4865 6c6c 6f2c 2077 6f72 6c64 210a 00ff  Hello, world!..."
        );
    }

    #[test]
    fn test_scroll_moves_pointer_and_clamps_at_zero() {
        let region = PaneRegion::new(80, 2);
        let mut w = MemoryWindow::new(Viewport::attach(region.clone()));
        w.set_pointer(0x20);
        w.refill(&Bytes);
        assert_eq!(w.viewport().lines().len(), 2);
        w.vscroll(&Bytes, 1);
        assert_eq!(w.pointer(), 0x30);
        assert!(region.rows()[0].starts_with("0x0000000000000030"));
        w.vscroll(&Bytes, -10);
        assert_eq!(w.pointer(), 0);
    }

    #[test]
    fn test_read_error_is_one_line() {
        let mut w = MemoryWindow::new(Viewport::attach(PaneRegion::new(80, 4)));
        w.set_pointer(0x2000);
        w.refill(&Bytes);
        assert_eq!(
            w.viewport().lines(),
            ["Cannot access memory at address 0x2000".to_string()]
        );
    }
}
