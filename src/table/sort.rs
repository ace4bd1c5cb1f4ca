//! Stable single-column sorting

use std::cmp::Ordering;

use super::column::{find, ColumnKey, ColumnSpec, SortValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Header indicator
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Active sort column and direction; no active column means input order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub active: Option<ColumnKey>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(column: ColumnKey, direction: SortDirection) -> Self {
        Self {
            active: Some(column),
            direction,
        }
    }

    /// Header click: a new column starts ascending, the active one flips.
    pub fn toggle(&mut self, column: ColumnKey) {
        if self.active == Some(column) {
            self.direction = self.direction.flip();
        } else {
            *self = Self::by(column, SortDirection::Asc);
        }
    }

    /// Return to unsorted; toggling never does this on its own.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Direction shown on `column`'s header, if it is the active column
    pub fn direction_for(&self, column: ColumnKey) -> Option<SortDirection> {
        (self.active == Some(column)).then_some(self.direction)
    }
}

/// Order `rows` (indices into `records`) by the active column.
///
/// Always returns a new vector. Without an active sortable column the input
/// order is kept; equal keys keep their relative order in both directions.
pub fn sort<R>(
    records: &[R],
    rows: &[usize],
    state: &SortState,
    columns: &[ColumnSpec<R>],
) -> Vec<usize> {
    let projector = state
        .active
        .and_then(|key| find(columns, key))
        .and_then(|column| column.sort);
    let Some(project) = projector else {
        return rows.to_vec();
    };

    let mut keyed: Vec<(SortValue, usize)> = rows
        .iter()
        .filter_map(|&row| records.get(row).map(|record| (project(record), row)))
        .collect();
    keyed.sort_by(|a, b| state.direction.apply(a.0.compare(&b.0)));
    keyed.into_iter().map(|(_, row)| row).collect()
}
