//! # Introduction
//!
//! varpane renders a debugger's view of a stopped program as auto-refreshing
//! terminal panes: trees of local variables and display expressions that
//! expand on click and highlight what changed since the last stop, lists of
//! threads and frames that switch the evaluation context, a memory dump and
//! raw command output.
//!
//! ## Pipeline
//!
//! ```text
//! Host → Value → Inspector → TreeWindow/ListWindow → Viewport → Region → ratatui
//! ```
//!
//! 1. [`host`]: the debugger collaborator. Everything the renderers know
//!    about the program comes through the [`host::Host`] trait.
//! 2. [`memory`]: typed value snapshots ([`memory::Value`], [`memory::Type`]).
//! 3. [`inspect`]: picks an inspection strategy per value (array, record,
//!    pointer, scalar or a pretty printer) and formats leaves.
//! 4. [`ui`]: the renderers, the window registry that refreshes them after
//!    every stop, and the ratatui front end.
//!
//! [`config`] and [`logging`] hold the environment-driven setup used by the
//! `varpane` binary, which runs everything against a simulated debuggee.

pub mod config;
pub mod errors;
pub mod host;
pub mod inspect;
pub mod logging;
pub mod memory;
pub mod ui;
