//! List page for one resource: fetch status, table view and row actions
//!
//! A [`ListPage`] lives exactly as long as its screen is mounted. Work that
//! talks to the API is queued by the synchronous handlers and carried out by
//! [`ListPage::process`], so the caller can redraw between queuing a delete
//! and awaiting it.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::ResourceApi;
use crate::models::{Record, RecordId};
use crate::table::{DragSurface, PageSize, TableView};

/// Fetch state of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Ready,
    /// Fetch failed; the message is shown with a retry action
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionKind {
    View,
    Edit,
    Delete,
}

/// Row action bound to a record id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    View(RecordId),
    Edit(RecordId),
    Delete(RecordId),
}

/// Transient message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub struct ListPage<R: Record> {
    status: FetchStatus,
    view: TableView<R>,
    deleting: HashSet<RecordId>,
    pending_delete: Option<RecordId>,
    notice: Option<Notice>,
}

impl<R: Record> ListPage<R> {
    /// New page in the `Loading` state
    pub fn new(page_size: PageSize, surface: Arc<dyn DragSurface>) -> Self {
        Self {
            status: FetchStatus::Loading,
            view: TableView::new(R::columns(), page_size, surface),
            deleting: HashSet::new(),
            pending_delete: None,
            notice: None,
        }
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == FetchStatus::Ready
    }

    pub fn view(&self) -> &TableView<R> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TableView<R> {
        &mut self.view
    }

    pub fn is_deleting(&self, id: &RecordId) -> bool {
        self.deleting.contains(id)
    }

    /// Whether [`ListPage::process`] has something to do
    pub fn has_pending_work(&self) -> bool {
        self.pending_delete.is_some() || self.status == FetchStatus::Loading
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Re-enter `Loading` after a failed fetch
    pub fn retry(&mut self) -> bool {
        if matches!(self.status, FetchStatus::Failed(_)) {
            self.status = FetchStatus::Loading;
            true
        } else {
            false
        }
    }

    /// Re-fetch a loaded page
    pub fn reload(&mut self) {
        self.status = FetchStatus::Loading;
    }

    /// Bind the visible `row` of the current page to an action
    pub fn action_for(&self, row: usize, kind: RowActionKind) -> Option<RowAction> {
        let id = self.view.visible_row(row)?.id();
        Some(match kind {
            RowActionKind::View => RowAction::View(id),
            RowActionKind::Edit => RowAction::Edit(id),
            RowActionKind::Delete => RowAction::Delete(id),
        })
    }

    /// Mark `id` as deleting and queue the API call.
    ///
    /// Refused while the page is not ready or the row is already deleting.
    pub fn request_delete(&mut self, id: RecordId) -> bool {
        if !self.is_ready() || self.pending_delete.is_some() || !self.deleting.insert(id.clone()) {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    /// Run whatever API work is queued: a delete first, then a fetch
    pub async fn process(&mut self, api: &dyn ResourceApi<R>) {
        if let Some(id) = self.pending_delete.take() {
            self.run_delete(api, id).await;
        } else if self.status == FetchStatus::Loading {
            self.load(api).await;
        }
    }

    /// Fetch the collection, replacing the view's records on success
    pub async fn load(&mut self, api: &dyn ResourceApi<R>) {
        self.status = FetchStatus::Loading;
        match api.fetch_all().await {
            Ok(records) => {
                info!("Loaded {} {}", records.len(), R::RESOURCE);
                self.view.set_records(records);
                self.status = FetchStatus::Ready;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", R::RESOURCE, e);
                self.status = FetchStatus::Failed(e.user_message());
            }
        }
    }

    /// Delete `id` right away; returns whether the API call succeeded
    pub async fn delete(&mut self, api: &dyn ResourceApi<R>, id: RecordId) -> bool {
        if !self.request_delete(id.clone()) {
            return false;
        }
        self.pending_delete = None;
        self.run_delete(api, id).await
    }

    async fn run_delete(&mut self, api: &dyn ResourceApi<R>, id: RecordId) -> bool {
        let result = api.delete(&id).await;
        self.deleting.remove(&id);

        match result {
            Ok(()) => {
                info!("Deleted {} {}", R::RESOURCE, id);
                self.notice = Some(Notice::Info(format!("Deleted {} {}", R::RESOURCE, id)));
                self.status = FetchStatus::Loading;
                true
            }
            Err(e) => {
                warn!("Failed to delete {} {}: {}", R::RESOURCE, id, e);
                self.notice = Some(Notice::Error(format!(
                    "Could not delete {}: {}",
                    id,
                    e.user_message()
                )));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::models::Company;
    use crate::table::{ColumnKey, NoopSurface, SortDirection};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubApi {
        companies: Mutex<Vec<Company>>,
        fail_fetch: AtomicBool,
        fail_delete: bool,
        fetches: AtomicUsize,
    }

    impl StubApi {
        fn with(companies: Vec<Company>) -> Self {
            Self {
                companies: Mutex::new(companies),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ResourceApi<Company> for StubApi {
        async fn fetch_all(&self) -> Result<Vec<Company>, ApiError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(ApiError::Status {
                    status: 503,
                    message: "Service unavailable".to_string(),
                });
            }
            Ok(self.companies.lock().unwrap().clone())
        }

        async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
            if self.fail_delete {
                return Err(ApiError::Status {
                    status: 409,
                    message: "Company still has users".to_string(),
                });
            }
            self.companies
                .lock()
                .unwrap()
                .retain(|c| RecordId::Int(c.id) != *id);
            Ok(())
        }
    }

    fn company(id: i64, name: &str, active: bool) -> Company {
        Company {
            id,
            name: name.to_string(),
            code: None,
            domain: None,
            active,
            created_at: None,
        }
    }

    /// Twelve companies, every third one inactive
    fn twelve() -> Vec<Company> {
        (1..=12)
            .map(|id| {
                if id % 3 == 0 {
                    company(id, &format!("Globex {}", id), false)
                } else {
                    company(id, &format!("Acme Branch {}", id), true)
                }
            })
            .collect()
    }

    fn new_page() -> ListPage<Company> {
        ListPage::new(PageSize::Ten, Arc::new(NoopSurface))
    }

    fn visible_ids(page: &ListPage<Company>) -> Vec<i64> {
        page.view().visible_rows().iter().map(|c| c.id).collect()
    }

    #[tokio::test]
    async fn test_load_success_enters_ready() {
        let api = StubApi::with(twelve());
        let mut page = new_page();
        assert_eq!(page.status(), &FetchStatus::Loading);
        assert!(page.has_pending_work());

        page.process(&api).await;
        assert_eq!(page.status(), &FetchStatus::Ready);
        assert_eq!(page.view().filtered_len(), 12);
        assert!(!page.has_pending_work());
    }

    #[tokio::test]
    async fn test_fetch_failure_and_retry() {
        let api = StubApi::with(twelve());
        api.fail_fetch.store(true, Ordering::SeqCst);
        let mut page = new_page();

        page.process(&api).await;
        assert_eq!(page.status(), &FetchStatus::Failed("Service unavailable".to_string()));
        assert!(!page.has_pending_work());

        api.fail_fetch.store(false, Ordering::SeqCst);
        assert!(page.retry());
        assert_eq!(page.status(), &FetchStatus::Loading);
        page.process(&api).await;
        assert!(page.is_ready());
        assert_eq!(api.fetches.load(Ordering::SeqCst), 2);
        assert!(!page.retry());
    }

    #[tokio::test]
    async fn test_search_sort_and_page_scenario() {
        let api = StubApi::with(twelve());
        let mut page = new_page();
        page.process(&api).await;

        // status is substring-matched, and "inactive" contains "active"
        page.view_mut().set_query("active");
        assert_eq!(page.view().filtered_len(), 12);

        page.view_mut().toggle_sort(ColumnKey("status"));
        page.view_mut().toggle_sort(ColumnKey("status"));
        assert_eq!(page.view().sort_state().direction, SortDirection::Desc);
        assert_eq!(visible_ids(&page), vec![1, 2, 4, 5, 7, 8, 10, 11, 3, 6]);
        page.view_mut().next_page();
        assert_eq!(visible_ids(&page), vec![9, 12]);

        page.view_mut().set_query("acme");
        assert_eq!(page.view().filtered_len(), 8);
        assert_eq!(page.view().page().current(), 1);
        assert_eq!(page.view().total_pages(), 1);
        assert_eq!(visible_ids(&page), vec![1, 2, 4, 5, 7, 8, 10, 11]);
        assert!(page.view().visible_rows().iter().all(|c| c.active));
    }

    #[tokio::test]
    async fn test_successful_delete_refetches() {
        let api = StubApi::with(twelve());
        let mut page = new_page();
        page.process(&api).await;

        let action = page.action_for(0, RowActionKind::Delete);
        assert_eq!(action, Some(RowAction::Delete(RecordId::Int(1))));

        assert!(page.request_delete(RecordId::Int(1)));
        assert!(page.is_deleting(&RecordId::Int(1)));
        assert!(!page.request_delete(RecordId::Int(1)));

        page.process(&api).await;
        assert!(!page.is_deleting(&RecordId::Int(1)));
        assert_eq!(page.status(), &FetchStatus::Loading);
        assert!(matches!(page.take_notice(), Some(Notice::Info(_))));

        page.process(&api).await;
        assert!(page.is_ready());
        assert_eq!(page.view().filtered_len(), 11);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_dataset() {
        let api = StubApi {
            fail_delete: true,
            ..StubApi::with(twelve())
        };
        let mut page = new_page();
        page.process(&api).await;
        page.view_mut().next_page();

        assert!(!page.delete(&api, RecordId::Int(12)).await);
        assert!(page.is_ready());
        assert!(!page.is_deleting(&RecordId::Int(12)));
        assert_eq!(page.view().filtered_len(), 12);
        assert_eq!(page.view().page().current(), 2);
        assert_eq!(
            page.take_notice(),
            Some(Notice::Error("Could not delete 12: Company still has users".to_string()))
        );
        assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delete_refused_before_ready() {
        let api = StubApi::with(twelve());
        let mut page = new_page();
        assert!(!page.delete(&api, RecordId::Int(1)).await);
        assert!(!page.is_deleting(&RecordId::Int(1)));
    }

    #[tokio::test]
    async fn test_row_actions_follow_current_page() {
        let api = StubApi::with(twelve());
        let mut page = new_page();
        page.process(&api).await;
        page.view_mut().last_page();

        assert_eq!(page.action_for(1, RowActionKind::View), Some(RowAction::View(RecordId::Int(12))));
        assert_eq!(page.action_for(0, RowActionKind::Edit), Some(RowAction::Edit(RecordId::Int(11))));
        assert_eq!(page.action_for(2, RowActionKind::View), None);
    }
}
