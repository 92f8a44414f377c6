//! Clipboard sinks for middle-click copies
//!
//! The terminal owns the real clipboard, so the default sink asks the
//! terminal to set it with an OSC 52 sequence (`ESC ] 52 ; c ; <base64> BEL`).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{self, Stdout, Write};

/// Destination for copied text
pub trait Clipboard {
    fn set(&mut self, contents: &str) -> io::Result<()>;
}

/// OSC 52 clipboard writing to a terminal stream
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<Stdout> {
    pub fn stdout() -> Self {
        Osc52Clipboard { out: io::stdout() }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Osc52Clipboard { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set(&mut self, contents: &str) -> io::Result<()> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(contents))?;
        self.out.flush()
    }
}

/// Drops everything; used when copying is turned off
#[derive(Debug, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn set(&mut self, contents: &str) -> io::Result<()> {
        tracing::debug!(len = contents.len(), "clipboard disabled, copy dropped");
        Ok(())
    }
}

/// Keeps copies in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Vec<String>,
}

impl MemoryClipboard {
    pub fn last(&self) -> Option<&str> {
        self.contents.last().map(String::as_str)
    }
}

impl Clipboard for MemoryClipboard {
    fn set(&mut self, contents: &str) -> io::Result<()> {
        self.contents.push(contents.to_string());
        Ok(())
    }
}
