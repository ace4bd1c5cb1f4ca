//! Mouse-driven column resizing
//!
//! [`ResizeController`] is a two-state machine: idle, or resizing one column
//! from a recorded baseline. While resizing it holds a [`SurfaceLease`] on the
//! [`DragSurface`], so the global drag affordance is released on every way out
//! of the resizing state: pointer-up, a new drag, or the controller being
//! dropped mid-drag when its page goes away.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::column::{ColumnKey, ColumnSpec};

/// Narrowest width a column can be dragged to, in terminal cells
pub const DEFAULT_MIN_WIDTH: u16 = 4;

/// Current width of every column, never below the floor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidths {
    widths: HashMap<ColumnKey, u16>,
    min: u16,
}

impl ColumnWidths {
    /// Seed widths from the column table's defaults
    pub fn from_columns<R>(columns: &[ColumnSpec<R>], min: u16) -> Self {
        let widths = columns
            .iter()
            .map(|column| (column.key, column.width.max(min)))
            .collect();
        Self { widths, min }
    }

    /// Width of `key`; columns never seeded report the floor
    pub fn get(&self, key: ColumnKey) -> u16 {
        self.widths.get(&key).copied().unwrap_or(self.min)
    }

    pub fn set(&mut self, key: ColumnKey, width: u16) {
        self.widths.insert(key, width.max(self.min));
    }

    pub fn min_width(&self) -> u16 {
        self.min
    }
}

/// Global side effects that accompany a drag
pub trait DragSurface: Send + Sync {
    /// Force the resize affordance and suppress selection
    fn engage(&self);
    /// Undo everything `engage` changed
    fn release(&self);
}

/// Surface for headless use; a drag has no visible side effects
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSurface;

impl DragSurface for NoopSurface {
    fn engage(&self) {}
    fn release(&self) {}
}

/// Keeps a [`DragSurface`] engaged for as long as it lives
pub struct SurfaceLease {
    surface: Arc<dyn DragSurface>,
}

impl SurfaceLease {
    fn acquire(surface: &Arc<dyn DragSurface>) -> Self {
        surface.engage();
        Self {
            surface: Arc::clone(surface),
        }
    }
}

impl Drop for SurfaceLease {
    fn drop(&mut self) {
        self.surface.release();
    }
}

/// Baseline recorded when a drag starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub column: ColumnKey,
    pub start_x: u16,
    pub start_width: u16,
}

/// Whether an input event was taken by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// The event must not reach any other handler, such as a header click
    Consumed,
    Ignored,
}

enum ResizeState {
    Idle,
    Resizing {
        session: DragSession,
        _lease: SurfaceLease,
    },
}

pub struct ResizeController {
    widths: ColumnWidths,
    surface: Arc<dyn DragSurface>,
    state: ResizeState,
}

impl fmt::Debug for ResizeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeController")
            .field("widths", &self.widths)
            .field("session", &self.session())
            .finish()
    }
}

impl ResizeController {
    pub fn new(widths: ColumnWidths, surface: Arc<dyn DragSurface>) -> Self {
        Self {
            widths,
            surface,
            state: ResizeState::Idle,
        }
    }

    pub fn widths(&self) -> &ColumnWidths {
        &self.widths
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            ResizeState::Idle => None,
            ResizeState::Resizing { session, .. } => Some(session),
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.session().is_some()
    }

    /// Pointer-down on `column`'s resize handle.
    ///
    /// Always consumes the press. A drag already in progress is ended first.
    pub fn begin(&mut self, column: ColumnKey, pointer_x: u16) -> EventDisposition {
        self.state = ResizeState::Idle;

        let session = DragSession {
            column,
            start_x: pointer_x,
            start_width: self.widths.get(column),
        };
        debug!(
            column = %column,
            start_x = pointer_x,
            start_width = session.start_width,
            "Column resize started"
        );
        self.state = ResizeState::Resizing {
            session,
            _lease: SurfaceLease::acquire(&self.surface),
        };
        EventDisposition::Consumed
    }

    /// Pointer-move while dragging; returns `false` when idle
    pub fn drag_to(&mut self, pointer_x: u16) -> bool {
        let session = match &self.state {
            ResizeState::Idle => return false,
            ResizeState::Resizing { session, .. } => *session,
        };
        let width = resized_width(
            session.start_width,
            session.start_x,
            pointer_x,
            self.widths.min_width(),
        );
        self.widths.set(session.column, width);
        true
    }

    /// Pointer-up anywhere; returns `false` when no drag was active
    pub fn end(&mut self) -> bool {
        match std::mem::replace(&mut self.state, ResizeState::Idle) {
            ResizeState::Idle => false,
            ResizeState::Resizing { session, .. } => {
                debug!(
                    column = %session.column,
                    width = self.widths.get(session.column),
                    "Column resize finished"
                );
                true
            }
        }
    }
}

/// `max(min, start_width + (x - start_x))`, saturating at the cell range
pub fn resized_width(start_width: u16, start_x: u16, x: u16, min: u16) -> u16 {
    let delta = i32::from(x) - i32::from(start_x);
    let width = (i32::from(start_width) + delta).max(i32::from(min));
    u16::try_from(width).unwrap_or(u16::MAX)
}
