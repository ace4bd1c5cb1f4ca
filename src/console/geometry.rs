//! Screen positions of table headers and the page bar, for mouse hit testing
//!
//! Columns are drawn left to right at their current widths with a one-cell
//! `│` separator after each. The separator is the column's resize handle; the
//! cells before it are the sortable label.

use unicode_width::UnicodeWidthStr;

use crate::table::{ColumnKey, ColumnSpec, ColumnWidths, PageItem, TableView};

/// Where a column sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlot {
    pub key: ColumnKey,
    pub x: u16,
    pub width: u16,
}

impl ColumnSlot {
    pub fn handle_x(&self) -> u16 {
        self.x.saturating_add(self.width)
    }
}

/// Lay the columns out from `origin_x`
pub fn layout_columns<R>(columns: &[ColumnSpec<R>], widths: &ColumnWidths, origin_x: u16) -> Vec<ColumnSlot> {
    let mut x = origin_x;
    columns
        .iter()
        .map(|column| {
            let slot = ColumnSlot {
                key: column.key,
                x,
                width: widths.get(column.key),
            };
            x = slot.handle_x().saturating_add(1);
            slot
        })
        .collect()
}

/// Part of the header under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHit {
    Label(ColumnKey),
    Handle(ColumnKey),
}

pub fn hit_header(slots: &[ColumnSlot], x: u16) -> Option<HeaderHit> {
    slots.iter().find_map(|slot| {
        if x == slot.handle_x() {
            Some(HeaderHit::Handle(slot.key))
        } else if x >= slot.x && x < slot.handle_x() {
            Some(HeaderHit::Label(slot.key))
        } else {
            None
        }
    })
}

/// Navigation target of a page bar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    First,
    Prev,
    Page(usize),
    Next,
    Last,
}

impl PageTarget {
    pub fn apply<R>(self, view: &mut TableView<R>) {
        match self {
            PageTarget::First => view.first_page(),
            PageTarget::Prev => view.prev_page(),
            PageTarget::Page(page) => view.jump_to(page),
            PageTarget::Next => view.next_page(),
            PageTarget::Last => view.last_page(),
        }
    }
}

/// One entry of the rendered page bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarEntry {
    pub label: String,
    /// `None` for the ellipsis, which is not clickable
    pub target: Option<PageTarget>,
    pub enabled: bool,
    pub current: bool,
}

impl BarEntry {
    fn nav(label: &str, target: PageTarget, enabled: bool) -> Self {
        Self {
            label: label.to_string(),
            target: Some(target),
            enabled,
            current: false,
        }
    }
}

/// `« ‹ 1 2 3 4 … 10 › »` for the given position
pub fn page_bar(items: &[PageItem], current: usize, total: usize) -> Vec<BarEntry> {
    let has_prev = current > 1;
    let has_next = current < total;

    let mut entries = vec![
        BarEntry::nav("«", PageTarget::First, has_prev),
        BarEntry::nav("‹", PageTarget::Prev, has_prev),
    ];
    entries.extend(items.iter().map(|item| match item {
        PageItem::Page(n) => BarEntry {
            label: n.to_string(),
            target: Some(PageTarget::Page(*n)),
            // a lone page has nowhere to go
            enabled: total > 1,
            current: *n == current,
        },
        PageItem::Ellipsis => BarEntry {
            label: item.to_string(),
            target: None,
            enabled: false,
            current: false,
        },
    }));
    entries.push(BarEntry::nav("›", PageTarget::Next, has_next));
    entries.push(BarEntry::nav("»", PageTarget::Last, has_next));
    entries
}

/// Entry under `x` when the bar is drawn from `origin_x`, entries one cell apart
pub fn hit_page_bar(entries: &[BarEntry], origin_x: u16, x: u16) -> Option<PageTarget> {
    let mut start = origin_x;
    for entry in entries {
        let width = u16::try_from(entry.label.width()).unwrap_or(u16::MAX);
        let end = start.saturating_add(width);
        if x >= start && x < end {
            return entry.target.filter(|_| entry.enabled);
        }
        start = end.saturating_add(1);
    }
    None
}
