//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into layers:
//!
//! - **[`region`] / [`viewport`]**: the rectangle a window draws into and the
//!   scrollable, column-clipped view of its lines (styling travels inline as
//!   SGR markers, handled by [`ansi`])
//! - **[`window`] / [`registry`]**: the window contract and the registry that
//!   refreshes every live window after each stop
//! - **[`tree`] / [`list`]**: the value-tree and selection-list renderers,
//!   with [`diff`] deciding how changed values are coloured
//! - **[`panes`]**: the concrete windows and their ratatui rendering
//! - **[`app`]**: event loop, layouts, focus and mouse routing
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`DemoHost`](crate::host::demo::DemoHost) and call [`App::run`] to start
//! the event loop.
//!
//! [`App::run`]: app::App::run

pub mod ansi;
pub mod app;
pub mod clipboard;
pub mod diff;
pub mod list;
pub mod panes;
pub mod region;
pub mod registry;
pub mod theme;
pub mod tree;
pub mod viewport;
pub mod window;

pub use app::{App, PaneLayout};
