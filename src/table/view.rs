//! Filter → sort → page pipeline over one resource collection

use std::sync::Arc;

use tracing::trace;

use super::column::{find, ColumnKey, ColumnSpec};
use super::paginate::{page_numbers, paginate, total_pages, PageItem, PageSize, PageState};
use super::resize::{ColumnWidths, DragSurface, ResizeController, DEFAULT_MIN_WIDTH};
use super::search::{filter, SearchQuery};
use super::sort::{sort, SortState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Filter,
    Sort,
}

/// Table state for one mounted list: records plus query, sort, page and widths.
///
/// Derived rows are kept as indices into `records`. Changing the records or
/// the query re-runs every stage, changing the sort re-runs sort onwards, and
/// moving between pages only re-slices the sorted rows.
pub struct TableView<R: 'static> {
    columns: &'static [ColumnSpec<R>],
    records: Vec<R>,
    query: SearchQuery,
    sort: SortState,
    page: PageState,
    resize: ResizeController,
    filtered: Vec<usize>,
    sorted: Vec<usize>,
}

impl<R: 'static> TableView<R> {
    pub fn new(
        columns: &'static [ColumnSpec<R>],
        page_size: PageSize,
        surface: Arc<dyn DragSurface>,
    ) -> Self {
        let widths = ColumnWidths::from_columns(columns, DEFAULT_MIN_WIDTH);
        Self {
            columns,
            records: Vec::new(),
            query: SearchQuery::default(),
            sort: SortState::default(),
            page: PageState::new(page_size),
            resize: ResizeController::new(widths, surface),
            filtered: Vec::new(),
            sorted: Vec::new(),
        }
    }

    pub fn columns(&self) -> &'static [ColumnSpec<R>] {
        self.columns
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Replace the collection wholesale, as after a fetch
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.refresh(Stage::Filter);
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn set_query(&mut self, raw: &str) {
        let query = SearchQuery::new(raw);
        if query == self.query {
            return;
        }
        self.query = query;
        self.refresh(Stage::Filter);
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Header click on `column`; unsortable columns are left alone
    pub fn toggle_sort(&mut self, column: ColumnKey) -> bool {
        if !find(self.columns, column).is_some_and(ColumnSpec::is_sortable) {
            return false;
        }
        self.sort.toggle(column);
        self.page.reset();
        self.refresh(Stage::Sort);
        true
    }

    pub fn set_sort(&mut self, state: SortState) {
        self.sort = state;
        self.page.reset();
        self.refresh(Stage::Sort);
    }

    pub fn reset_sort(&mut self) {
        self.set_sort(SortState::default());
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.page.set_size(size);
        self.refresh(Stage::Filter);
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page.size())
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn first_page(&mut self) {
        self.page.first();
    }

    pub fn prev_page(&mut self) {
        let total = self.total_pages();
        self.page.prev(total);
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        self.page.next(total);
    }

    pub fn last_page(&mut self) {
        let total = self.total_pages();
        self.page.last(total);
    }

    pub fn jump_to(&mut self, page: usize) {
        let total = self.total_pages();
        self.page.jump_to(page, total);
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        page_numbers(self.page.current(), self.total_pages())
    }

    /// Records on the current page, in display order
    pub fn visible_rows(&self) -> Vec<&R> {
        paginate(&self.sorted, &self.page)
            .iter()
            .filter_map(|&index| self.records.get(index))
            .collect()
    }

    /// Record at `row` of the current page
    pub fn visible_row(&self, row: usize) -> Option<&R> {
        paginate(&self.sorted, &self.page)
            .get(row)
            .and_then(|&index| self.records.get(index))
    }

    pub fn visible_len(&self) -> usize {
        paginate(&self.sorted, &self.page).len()
    }

    pub fn widths(&self) -> &ColumnWidths {
        self.resize.widths()
    }

    pub fn resize(&self) -> &ResizeController {
        &self.resize
    }

    pub fn resize_mut(&mut self) -> &mut ResizeController {
        &mut self.resize
    }

    fn refresh(&mut self, from: Stage) {
        if from == Stage::Filter {
            let previous = self.filtered.len();
            self.filtered = filter(&self.records, &self.query, self.columns);
            if self.filtered.len() != previous {
                self.page.reset();
            }
        }
        self.sorted = sort(&self.records, &self.filtered, &self.sort, self.columns);
        self.page.clamp(self.total_pages());
        trace!(
            stage = ?from,
            records = self.records.len(),
            filtered = self.filtered.len(),
            page = self.page.current(),
            "Table view recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::{member, Member, MEMBER_COLUMNS};
    use crate::table::resize::NoopSurface;
    use crate::table::sort::SortDirection;

    fn view_with(records: Vec<Member>, size: PageSize) -> TableView<Member> {
        let mut view = TableView::new(&MEMBER_COLUMNS, size, Arc::new(NoopSurface));
        view.set_records(records);
        view
    }

    fn numbered(count: i64) -> Vec<Member> {
        (1..=count)
            .map(|id| member(id, &format!("member {}", id), None, id % 2 == 0))
            .collect()
    }

    fn visible_ids(view: &TableView<Member>) -> Vec<i64> {
        view.visible_rows().iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_page_clamp_and_size_change() {
        let mut view = view_with(numbered(25), PageSize::Ten);
        assert_eq!(view.total_pages(), 3);

        view.jump_to(5);
        assert_eq!(view.page().current(), 3);
        assert_eq!(visible_ids(&view), (21..=25).collect::<Vec<_>>());

        view.set_page_size(PageSize::TwentyFive);
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.page().current(), 1);
        assert_eq!(view.visible_len(), 25);
    }

    #[test]
    fn test_query_change_resets_page() {
        let mut view = view_with(numbered(30), PageSize::Ten);
        view.last_page();
        assert_eq!(view.page().current(), 3);

        view.set_query("member 1");
        // "member 1" and "member 10".."member 19"
        assert_eq!(view.filtered_len(), 11);
        assert_eq!(view.page().current(), 1);
    }

    #[test]
    fn test_sort_change_resets_page() {
        let mut view = view_with(numbered(30), PageSize::Ten);
        view.next_page();
        assert!(view.toggle_sort(ColumnKey("id")));
        assert_eq!(view.page().current(), 1);

        view.next_page();
        assert!(view.toggle_sort(ColumnKey("id")));
        assert_eq!(view.sort_state().direction, SortDirection::Desc);
        assert_eq!(view.page().current(), 1);
        assert_eq!(visible_ids(&view)[0], 30);
    }

    #[test]
    fn test_unsortable_header_is_ignored() {
        let mut view = view_with(numbered(12), PageSize::Ten);
        view.next_page();
        assert!(!view.toggle_sort(ColumnKey("email")));
        assert_eq!(view.sort_state(), SortState::default());
        assert_eq!(view.page().current(), 2);
    }

    #[test]
    fn test_paging_only_reslices() {
        let mut view = view_with(numbered(12), PageSize::Ten);
        view.set_sort(SortState::by(ColumnKey("id"), SortDirection::Desc));
        view.next_page();
        assert_eq!(visible_ids(&view), vec![2, 1]);
        view.prev_page();
        view.prev_page();
        assert_eq!(view.page().current(), 1);
        assert_eq!(view.visible_row(0).map(|m| m.id), Some(12));
        assert!(view.visible_row(10).is_none());
    }

    #[test]
    fn test_empty_collection_has_single_page() {
        let mut view = view_with(Vec::new(), PageSize::Ten);
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.page_numbers(), vec![PageItem::Page(1)]);
        view.next_page();
        view.last_page();
        assert_eq!(view.page().current(), 1);
        assert!(view.visible_rows().is_empty());
    }

    #[test]
    fn test_shrinking_refetch_clamps_page() {
        let mut view = view_with(numbered(40), PageSize::Ten);
        view.last_page();
        view.set_records(numbered(15));
        assert_eq!(view.page().current(), 1);
        assert_eq!(view.total_pages(), 2);
    }

    #[test]
    fn test_sort_survives_new_records() {
        let mut view = view_with(numbered(3), PageSize::Ten);
        view.toggle_sort(ColumnKey("id"));
        view.toggle_sort(ColumnKey("id"));
        view.set_records(numbered(5));
        assert_eq!(visible_ids(&view), vec![5, 4, 3, 2, 1]);
    }
}
