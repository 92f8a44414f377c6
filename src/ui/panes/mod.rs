//! Concrete windows and pane rendering
//!
//! # Windows
//!
//! - [`locals`]: value tree of the selected frame's variables
//! - [`display`]: value tree of the numbered display expressions
//! - [`threads`] / [`frames`]: selection lists that switch context
//! - [`memory`]: hex dump following a movable pointer
//! - [`command`]: output of host commands
//!
//! # Rendering
//!
//! Windows paint into [`PaneRegion`](crate::ui::region::PaneRegion)s;
//! [`render`] draws those into the ratatui frame and [`status`] draws the
//! bottom bar.

pub mod command;
pub mod display;
pub mod frames;
pub mod locals;
pub mod memory;
pub mod render;
pub mod status;
pub mod threads;

pub use command::CommandWindow;
pub use display::{display_window, DisplayWindow};
pub use frames::{frames_window, FramesWindow};
pub use locals::{locals_window, LocalsWindow};
pub use memory::MemoryWindow;
pub use render::{inner_size, render_pane};
pub use status::render_status_bar;
pub use threads::{threads_window, ThreadsWindow};
