//! Page windows and page-number bars

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Allowed rows-per-page choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("page size must be one of 10, 25, 50 or 100, got {0}")]
pub struct InvalidPageSize(pub String);

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }

    /// Next larger size, wrapping back to the smallest
    pub fn next(self) -> Self {
        match self {
            PageSize::Ten => PageSize::TwentyFive,
            PageSize::TwentyFive => PageSize::Fifty,
            PageSize::Fifty => PageSize::Hundred,
            PageSize::Hundred => PageSize::Ten,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| InvalidPageSize(value.to_string()))
    }
}

impl FromStr for PageSize {
    type Err = InvalidPageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(|value| PageSize::try_from(value).ok())
            .ok_or_else(|| InvalidPageSize(s.to_string()))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Number of pages for `count` rows; never less than one
pub fn total_pages(count: usize, size: PageSize) -> usize {
    count.div_ceil(size.get()).max(1)
}

/// Current page (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    size: PageSize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl PageState {
    pub fn new(size: PageSize) -> Self {
        Self { current: 1, size }
    }

    /// State at an arbitrary page, without clamping against a total
    pub fn at(current: usize, size: PageSize) -> Self {
        Self {
            current: current.max(1),
            size,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    /// Change the page size and go back to the first page
    pub fn set_size(&mut self, size: PageSize) {
        self.size = size;
        self.current = 1;
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    pub fn jump_to(&mut self, page: usize, total: usize) {
        self.current = page.clamp(1, total.max(1));
    }

    pub fn first(&mut self) {
        self.current = 1;
    }

    pub fn prev(&mut self, total: usize) {
        self.jump_to(self.current.saturating_sub(1), total);
    }

    pub fn next(&mut self, total: usize) {
        self.jump_to(self.current.saturating_add(1), total);
    }

    pub fn last(&mut self, total: usize) {
        self.jump_to(total, total);
    }

    /// Pull the current page back into `[1, total]`
    pub fn clamp(&mut self, total: usize) {
        self.jump_to(self.current, total);
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.current < total
    }
}

/// Rows visible on the current page; empty when the page is out of range
pub fn paginate<'a, T>(rows: &'a [T], page: &PageState) -> &'a [T] {
    let size = page.size().get();
    let start = page.current().saturating_sub(1).saturating_mul(size);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(rows.len());
    &rows[start..end]
}

/// Entry of a page-number bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("…"),
        }
    }
}

/// Page-number bar for `current` of `total` pages.
///
/// Up to five pages are listed in full. Beyond that the first and last pages
/// are always shown, with a window around the current page and ellipses for
/// the gaps.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    let total = total.max(1);
    if total <= 5 {
        return (1..=total).map(Page).collect();
    }

    if current <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(total)]
    } else if current >= total - 2 {
        let mut items = vec![Page(1), Ellipsis];
        items.extend((total - 3..=total).map(Page));
        items
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(total),
        ]
    }
}
