//! Terminal side effects of a column drag

use std::fmt;
use std::io;

use crossterm::{execute, Command};
use tracing::warn;

use crate::table::DragSurface;

/// OSC 22: set the mouse pointer shape by its CSS cursor name.
///
/// Terminals without pointer-shape support ignore the sequence; the `┃`
/// header marker still shows which column is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPointerShape(pub &'static str);

impl Command for SetPointerShape {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b]22;{}\x1b\\", self.0)
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Shows a column-resize pointer while a column is being dragged
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSurface;

impl DragSurface for TerminalSurface {
    fn engage(&self) {
        if let Err(e) = execute!(io::stdout(), SetPointerShape("col-resize")) {
            warn!("Failed to set drag pointer: {}", e);
        }
    }

    fn release(&self) {
        if let Err(e) = execute!(io::stdout(), SetPointerShape("default")) {
            warn!("Failed to restore pointer: {}", e);
        }
    }
}
