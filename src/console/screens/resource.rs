//! Resource list screen: search box, sortable and resizable table, page bar

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use crate::api::ResourceApi;
use crate::console::geometry::{
    hit_header, hit_page_bar, layout_columns, page_bar, BarEntry, ColumnSlot, HeaderHit,
};
use crate::console::traits::{Navigable, Panel, ScreenAction};
use crate::console::ui::{centered_rect, fit_width, InputField, Styles};
use crate::i18n::Translate;
use crate::models::{Record, RecordId, Resource};
use crate::page::{FetchStatus, ListPage, Notice, RowAction, RowActionKind};
use crate::table::{ColumnKey, DragSurface, EventDisposition, PageSize};

const HELP: &str = "Resource List:\n\
    ↑/↓ - Select row\n\
    ←/→ or PgUp/PgDn - Previous/next page\n\
    Home/End - First/last page\n\
    / - Search (Enter/Esc to leave the search box)\n\
    1-9 - Sort by column (again to flip direction)\n\
    x - Clear sorting\n\
    p - Cycle page size\n\
    Enter/v - View record\n\
    e - Edit record\n\
    d/Delete - Delete record\n\
    r - Reload (retry after an error)\n\
    Mouse: click a header to sort, drag a │ separator to resize,\n\
    click a row to select it, click the page bar to navigate\n\
    ESC - Clear search, then back to menu";

/// Record opened from a row action
struct RecordDetail {
    kind: RowActionKind,
    id: RecordId,
    body: String,
}

/// Screen positions recorded during the last draw
#[derive(Default)]
struct HitAreas {
    header_y: Option<u16>,
    columns: Vec<ColumnSlot>,
    body: Rect,
    search: Rect,
    bar: Option<(u16, u16, Vec<BarEntry>)>,
}

pub struct ResourceScreen<R: Record> {
    resource: Resource,
    title: String,
    headers: HashMap<ColumnKey, String>,
    api: Box<dyn ResourceApi<R>>,
    page: ListPage<R>,
    search: InputField,
    searching: bool,
    row_state: ListState,
    confirm_delete: Option<RecordId>,
    detail: Option<RecordDetail>,
    pressed_header: Option<ColumnKey>,
    hit: HitAreas,
}

impl<R: Record> ResourceScreen<R> {
    pub fn new(
        resource: Resource,
        api: Box<dyn ResourceApi<R>>,
        translate: &dyn Translate,
        page_size: PageSize,
        surface: std::sync::Arc<dyn DragSurface>,
    ) -> Self {
        let headers = R::columns()
            .iter()
            .map(|column| (column.key, translate.translate(column.label)))
            .collect();

        Self {
            resource,
            title: translate.translate(resource.title_key()),
            headers,
            api,
            page: ListPage::new(page_size, surface),
            search: InputField::new("Search (/)").with_placeholder("Type / to filter every column"),
            searching: false,
            row_state: ListState::default(),
            confirm_delete: None,
            detail: None,
            pressed_header: None,
            hit: HitAreas::default(),
        }
    }

    pub fn page(&self) -> &ListPage<R> {
        &self.page
    }

    /// Keep the selected row inside the current page
    fn sync_selection(&mut self) {
        let count = self.get_item_count();
        let selected = match self.row_state.selected() {
            _ if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => Some(0),
        };
        self.row_state.select(selected);
    }

    fn after_page_change(&mut self) {
        self.row_state.select(None);
        self.sync_selection();
    }

    fn set_searching(&mut self, searching: bool) {
        self.searching = searching;
        self.search.set_focus(searching);
    }

    fn apply_query(&mut self) {
        let query = self.search.value.clone();
        self.page.view_mut().set_query(&query);
        self.after_page_change();
    }

    fn toggle_sort(&mut self, key: ColumnKey) -> ScreenAction {
        if self.page.view_mut().toggle_sort(key) {
            self.after_page_change();
            ScreenAction::None
        } else {
            ScreenAction::SetStatus(format!("{} is not sortable", self.header(key)))
        }
    }

    fn header(&self, key: ColumnKey) -> &str {
        self.headers
            .get(&key)
            .map(String::as_str)
            .unwrap_or(key.as_str())
    }

    /// Dispatch a row action for the selected row
    fn row_action(&mut self, kind: RowActionKind) -> ScreenAction {
        let Some(row) = self.row_state.selected() else {
            return ScreenAction::None;
        };
        match self.page.action_for(row, kind) {
            Some(RowAction::View(id)) => self.open_detail(RowActionKind::View, id),
            Some(RowAction::Edit(id)) => self.open_detail(RowActionKind::Edit, id),
            Some(RowAction::Delete(id)) => {
                if self.page.is_deleting(&id) {
                    return ScreenAction::SetStatus(format!("{} is already being deleted", id));
                }
                self.confirm_delete = Some(id);
                ScreenAction::None
            }
            None => ScreenAction::None,
        }
    }

    fn open_detail(&mut self, kind: RowActionKind, id: RecordId) -> ScreenAction {
        let record = self
            .page
            .view()
            .records()
            .iter()
            .find(|record| record.id() == id);
        let Some(record) = record else {
            return ScreenAction::SetError(format!("{} {} is no longer loaded", self.title, id));
        };
        match serde_json::to_string_pretty(record) {
            Ok(body) => {
                debug!("Opening {:?} view for {} {}", kind, self.resource, id);
                self.detail = Some(RecordDetail { kind, id, body });
                ScreenAction::None
            }
            Err(e) => ScreenAction::SetError(format!("Cannot display {}: {}", id, e)),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => self.set_searching(false),
            KeyCode::Backspace => {
                self.search.delete_char();
                self.apply_query();
            }
            KeyCode::Left => self.search.move_cursor_left(),
            KeyCode::Right => self.search.move_cursor_right(),
            KeyCode::Char(c) => {
                self.search.insert_char(c);
                self.apply_query();
            }
            _ => {}
        }
        ScreenAction::None
    }

    fn handle_ready_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Up => self.navigate_up(),
            KeyCode::Down => self.navigate_down(),
            KeyCode::Left | KeyCode::PageUp => {
                self.page.view_mut().prev_page();
                self.after_page_change();
            }
            KeyCode::Right | KeyCode::PageDown => {
                self.page.view_mut().next_page();
                self.after_page_change();
            }
            KeyCode::Home => {
                self.page.view_mut().first_page();
                self.after_page_change();
            }
            KeyCode::End => {
                self.page.view_mut().last_page();
                self.after_page_change();
            }
            KeyCode::Char('/') => self.set_searching(true),
            KeyCode::Char('p') => {
                let size = self.page.view().page().size().next();
                self.page.view_mut().set_page_size(size);
                self.after_page_change();
                return ScreenAction::SetStatus(format!("Showing {} rows per page", size));
            }
            KeyCode::Char('x') => {
                self.page.view_mut().reset_sort();
                self.after_page_change();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(key) = R::columns().get(index).map(|column| column.key) {
                    return self.toggle_sort(key);
                }
            }
            KeyCode::Char('r') => {
                self.page.reload();
                return ScreenAction::SetStatus(format!("Reloading {}...", self.title));
            }
            KeyCode::Enter | KeyCode::Char('v') => return self.row_action(RowActionKind::View),
            KeyCode::Char('e') => return self.row_action(RowActionKind::Edit),
            KeyCode::Char('d') | KeyCode::Delete => return self.row_action(RowActionKind::Delete),
            KeyCode::Esc => {
                if self.page.view().query().is_empty() {
                    return ScreenAction::NavigateBack;
                }
                self.search.clear();
                self.apply_query();
            }
            _ => {}
        }
        ScreenAction::None
    }

    fn handle_left_down(&mut self, column: u16, row: u16) -> ScreenAction {
        let header_hit = self
            .hit
            .header_y
            .filter(|y| *y == row)
            .and_then(|_| hit_header(&self.hit.columns, column));

        match header_hit {
            Some(HeaderHit::Handle(key)) => {
                if self.page.view_mut().resize_mut().begin(key, column) == EventDisposition::Consumed {
                    self.pressed_header = None;
                }
                return ScreenAction::None;
            }
            Some(HeaderHit::Label(key)) => {
                self.pressed_header = Some(key);
                return ScreenAction::None;
            }
            None => self.pressed_header = None,
        }

        if contains(self.hit.search, column, row) {
            self.set_searching(true);
            return ScreenAction::None;
        }
        self.set_searching(false);

        if contains(self.hit.body, column, row) {
            let index = self.row_state.offset() + usize::from(row - self.hit.body.y);
            if index < self.get_item_count() {
                self.set_selected_index(Some(index));
            }
            return ScreenAction::None;
        }

        let target = self
            .hit
            .bar
            .as_ref()
            .filter(|(_, y, _)| *y == row)
            .and_then(|(x, _, entries)| hit_page_bar(entries, *x, column));
        if let Some(target) = target {
            target.apply(self.page.view_mut());
            self.after_page_change();
        }
        ScreenAction::None
    }

    fn handle_left_up(&mut self, column: u16, row: u16) -> ScreenAction {
        if self.page.view_mut().resize_mut().end() {
            self.pressed_header = None;
            return ScreenAction::None;
        }

        let Some(pressed) = self.pressed_header.take() else {
            return ScreenAction::None;
        };
        let released_on = self
            .hit
            .header_y
            .filter(|y| *y == row)
            .and_then(|_| hit_header(&self.hit.columns, column));
        if released_on == Some(HeaderHit::Label(pressed)) {
            return self.toggle_sort(pressed);
        }
        ScreenAction::None
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect) {
        let view = self.page.view();
        let sort = view.sort_state();
        let title = match sort.active {
            Some(key) => format!(
                " {} ({} of {}) sorted by {} {} ",
                self.title,
                view.filtered_len(),
                view.records().len(),
                self.header(key),
                sort.direction.arrow()
            ),
            None => format!(
                " {} ({} of {}) ",
                self.title,
                view.filtered_len(),
                view.records().len()
            ),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Styles::active_border());
        let inner = block.inner(area);
        f.render_widget(block, area);

        self.hit.header_y = None;
        self.hit.body = Rect::default();

        match self.page.status() {
            FetchStatus::Loading => {
                let loading = Paragraph::new(format!("Loading {}...", self.title)).style(Styles::info());
                f.render_widget(loading, inner);
                return;
            }
            FetchStatus::Failed(message) => {
                let failed = Paragraph::new(vec![
                    Line::from(Span::styled(format!("Failed to load {}", self.title), Styles::error())),
                    Line::from(message.clone()),
                    Line::from(""),
                    Line::from(Span::styled("Press r to retry, ESC to go back", Styles::info())),
                ])
                .wrap(Wrap { trim: true });
                f.render_widget(failed, inner);
                return;
            }
            FetchStatus::Ready => {}
        }

        if inner.height < 2 {
            return;
        }
        let header_area = Rect { height: 1, ..inner };
        let body = Rect {
            y: inner.y + 1,
            height: inner.height - 1,
            ..inner
        };

        let view = self.page.view();
        let columns = R::columns();
        let slots = layout_columns(columns, view.widths(), inner.x);
        let resizing = view.resize().session().map(|session| session.column);

        let mut header_spans = Vec::with_capacity(columns.len() * 2);
        for (column, slot) in columns.iter().zip(&slots) {
            let label = match sort.direction_for(column.key) {
                Some(direction) => format!("{} {}", self.header(column.key), direction.arrow()),
                None => self.header(column.key).to_string(),
            };
            let dragging = resizing == Some(column.key);
            let label_style = if dragging { Styles::selected() } else { Styles::header() };
            header_spans.push(Span::styled(fit_width(&label, usize::from(slot.width)), label_style));
            header_spans.push(if dragging {
                Span::styled("┃", Styles::warning())
            } else {
                Span::styled("│", Styles::inactive())
            });
        }
        f.render_widget(Paragraph::new(Line::from(header_spans)), header_area);

        if view.filtered_len() == 0 {
            let message = if view.query().is_empty() {
                format!("No {} yet.", self.title.to_lowercase())
            } else {
                format!("No {} match '{}'.", self.title.to_lowercase(), view.query().as_str())
            };
            f.render_widget(Paragraph::new(message).style(Styles::inactive()), body);
        } else {
            let items: Vec<ListItem> = view
                .visible_rows()
                .into_iter()
                .map(|record| {
                    let deleting = self.page.is_deleting(&record.id());
                    let mut spans = Vec::with_capacity(columns.len() * 2);
                    for (column, slot) in columns.iter().zip(&slots) {
                        let text = (column.render)(record);
                        spans.push(Span::raw(fit_width(&text, usize::from(slot.width))));
                        spans.push(Span::styled("│", Styles::inactive()));
                    }
                    if deleting {
                        spans.push(Span::raw(" deleting..."));
                        ListItem::new(Line::from(spans)).style(Styles::deleting())
                    } else {
                        ListItem::new(Line::from(spans))
                    }
                })
                .collect();

            let list = List::new(items).highlight_style(Styles::selected());
            f.render_stateful_widget(list, body, &mut self.row_state);
        }

        self.hit.header_y = Some(header_area.y);
        self.hit.columns = slots;
        self.hit.body = body;
    }

    fn draw_page_bar(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());
        let inner = block.inner(area);
        f.render_widget(block, area);

        if !self.page.is_ready() || inner.height == 0 {
            self.hit.bar = None;
            return;
        }

        let view = self.page.view();
        let current = view.page().current();
        let total = view.total_pages();
        let entries = page_bar(&view.page_numbers(), current, total);

        let mut spans = Vec::with_capacity(entries.len() * 2 + 1);
        for entry in &entries {
            let style = if entry.current {
                Styles::selected()
            } else if entry.enabled {
                Styles::info()
            } else {
                Styles::inactive()
            };
            spans.push(Span::styled(entry.label.clone(), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(
                "  Page {} of {} | {} rows per page (p) | {} matching",
                current,
                total,
                view.page().size(),
                view.filtered_len()
            ),
            Styles::inactive(),
        ));
        f.render_widget(Paragraph::new(Line::from(spans)), inner);

        self.hit.bar = Some((inner.x, inner.y, entries));
    }

    fn draw_confirm_delete(&self, f: &mut Frame, area: Rect, id: &RecordId) {
        let popup_area = centered_rect(50, 25, area);
        let text = vec![
            Line::from(format!("Delete {} {}?", self.title.to_lowercase(), id)),
            Line::from(""),
            Line::from(Span::styled("y - Delete    n/ESC - Cancel", Styles::info())),
        ];
        let popup = Paragraph::new(text).wrap(Wrap { trim: true }).block(
            Block::default()
                .title("Confirm Delete")
                .borders(Borders::ALL)
                .border_style(Styles::error()),
        );
        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }

    fn draw_detail(&self, f: &mut Frame, area: Rect, detail: &RecordDetail) {
        let popup_area = centered_rect(70, 70, area);
        let title = match detail.kind {
            RowActionKind::Edit => format!("Edit {} {} (read-only)", self.title, detail.id),
            _ => format!("{} {}", self.title, detail.id),
        };
        let mut lines: Vec<Line> = detail.body.lines().map(|l| Line::from(l.to_string())).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("ESC/Enter - Close", Styles::info())));

        let popup = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Styles::warning()),
        );
        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

impl<R: Record> Navigable for ResourceScreen<R> {
    fn navigate_up(&mut self) {
        let selected = self.row_state.selected().unwrap_or(0);
        self.set_selected_index(Some(selected.saturating_sub(1)));
    }

    fn navigate_down(&mut self) {
        let count = self.get_item_count();
        if count == 0 {
            return;
        }
        let next = self.row_state.selected().map(|i| i + 1).unwrap_or(0);
        self.set_selected_index(Some(next.min(count - 1)));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.row_state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.row_state.select(index);
        self.sync_selection();
    }

    fn get_item_count(&self) -> usize {
        self.page.view().visible_len()
    }
}

#[async_trait::async_trait(?Send)]
impl<R: Record> Panel for ResourceScreen<R> {
    fn resource(&self) -> Resource {
        self.resource
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search
                Constraint::Min(3),    // Table
                Constraint::Length(3), // Page bar
            ])
            .split(area);

        self.search.render(f, chunks[0]);
        self.hit.search = chunks[0];
        self.draw_table(f, chunks[1]);
        self.draw_page_bar(f, chunks[2]);

        if let Some(id) = &self.confirm_delete {
            self.draw_confirm_delete(f, area, id);
        }
        if let Some(detail) = &self.detail {
            self.draw_detail(f, area, detail);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if self.detail.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.detail = None;
            }
            return ScreenAction::None;
        }

        if let Some(id) = self.confirm_delete.take() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    if self.page.request_delete(id.clone()) {
                        ScreenAction::SetStatus(format!("Deleting {}...", id))
                    } else {
                        ScreenAction::SetError(format!("Cannot delete {} right now", id))
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ScreenAction::ClearMessages,
                _ => {
                    self.confirm_delete = Some(id);
                    ScreenAction::None
                }
            };
        }

        if self.searching {
            return self.handle_search_key(key);
        }

        let status = self.page.status().clone();
        match status {
            FetchStatus::Ready => self.handle_ready_key(key),
            FetchStatus::Failed(_) => match key.code {
                KeyCode::Char('r') => {
                    self.page.retry();
                    ScreenAction::SetStatus(format!("Retrying {}...", self.title))
                }
                KeyCode::Esc => ScreenAction::NavigateBack,
                _ => ScreenAction::None,
            },
            FetchStatus::Loading => match key.code {
                KeyCode::Esc => ScreenAction::NavigateBack,
                _ => ScreenAction::None,
            },
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> ScreenAction {
        if self.detail.is_some() || self.confirm_delete.is_some() || !self.page.is_ready() {
            // a drag ends on pointer-up whatever is covering the table
            if event.kind == MouseEventKind::Up(MouseButton::Left) {
                self.end_drag();
            }
            return ScreenAction::None;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_left_down(event.column, event.row),
            MouseEventKind::Drag(MouseButton::Left) => {
                // pointer moves only matter while a column is being dragged
                if self.page.view().resize().is_resizing() {
                    self.page.view_mut().resize_mut().drag_to(event.column);
                }
                ScreenAction::None
            }
            MouseEventKind::Up(MouseButton::Left) => self.handle_left_up(event.column, event.row),
            MouseEventKind::ScrollDown => {
                self.navigate_down();
                ScreenAction::None
            }
            MouseEventKind::ScrollUp => {
                self.navigate_up();
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn end_drag(&mut self) -> bool {
        self.pressed_header = None;
        self.page.view_mut().resize_mut().end()
    }

    fn has_pending_work(&self) -> bool {
        self.page.has_pending_work()
    }

    async fn process(&mut self) -> ScreenAction {
        let was_loading = self.page.status() == &FetchStatus::Loading;
        self.page.process(self.api.as_ref()).await;
        self.sync_selection();

        match self.page.take_notice() {
            Some(Notice::Info(message)) => ScreenAction::SetStatus(message),
            Some(Notice::Error(message)) => ScreenAction::SetError(message),
            None => match self.page.status() {
                FetchStatus::Failed(message) => ScreenAction::SetError(message.clone()),
                FetchStatus::Ready if was_loading => ScreenAction::SetStatus(format!(
                    "Loaded {} {}",
                    self.page.view().records().len(),
                    self.title.to_lowercase()
                )),
                _ => ScreenAction::None,
            },
        }
    }

    fn is_capturing_text(&self) -> bool {
        self.searching
    }

    fn help(&self) -> &'static str {
        HELP
    }
}
