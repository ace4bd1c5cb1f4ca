//! Headless `list` and `delete` commands
//!
//! These run the same table engine as the console and print plain text, so a
//! listing on stdout matches what the console shows for the same query, sort
//! and page.

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use tracing::{info, warn};

use crate::api::{ApiClient, HttpResourceApi, ResourceApi};
use crate::console::geometry::page_bar;
use crate::console::ui::fit_width;
use crate::i18n::{Catalog, Translate};
use crate::models::{Application, Company, MasterDataEntry, Record, RecordId, Resource, User};
use crate::page::{FetchStatus, ListPage};
use crate::table::column::find_by_name;
use crate::table::{ColumnSpec, NoopSurface, PageSize, SortDirection, SortState, TableView};

/// What to show from a resource list
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub query: Option<String>,
    pub sort: Option<String>,
    pub desc: bool,
    pub page: usize,
    pub page_size: PageSize,
}

/// Fetch `resource` and print the requested page
pub async fn list(client: ApiClient, resource: Resource, options: &ListOptions) -> Result<()> {
    let output = match resource {
        Resource::Companies => list_text::<Company>(client, options).await?,
        Resource::Applications => list_text::<Application>(client, options).await?,
        Resource::Users => list_text::<User>(client, options).await?,
        Resource::MasterData => list_text::<MasterDataEntry>(client, options).await?,
    };
    print!("{}", output);
    Ok(())
}

/// Delete one record of `resource`
pub async fn delete(client: ApiClient, resource: Resource, id: &str) -> Result<()> {
    let id = RecordId::from_input(id);
    match resource {
        Resource::Companies => delete_record::<Company>(client, &id).await?,
        Resource::Applications => delete_record::<Application>(client, &id).await?,
        Resource::Users => delete_record::<User>(client, &id).await?,
        Resource::MasterData => delete_record::<MasterDataEntry>(client, &id).await?,
    }
    println!("Deleted {} {}", resource, id);
    Ok(())
}

async fn list_text<R: Record>(client: ApiClient, options: &ListOptions) -> Result<String> {
    let api = HttpResourceApi::<R>::new(client);
    let page = load_page::<R>(&api, options).await?;
    Ok(render_view(page.view(), &Catalog::english()))
}

async fn delete_record<R: Record>(client: ApiClient, id: &RecordId) -> Result<()> {
    let api = HttpResourceApi::<R>::new(client);
    info!("Deleting {} {}", R::RESOURCE, id);
    api.delete(id).await.map_err(|e| {
        warn!("Failed to delete {} {}: {}", R::RESOURCE, id, e);
        anyhow!("Could not delete {}: {}", id, e.user_message())
    })
}

/// Load the collection and apply query, sort and page from `options`
pub async fn load_page<R: Record>(api: &dyn ResourceApi<R>, options: &ListOptions) -> Result<ListPage<R>> {
    let sort = sort_state(R::columns(), options)?;

    let mut page = ListPage::new(options.page_size, Arc::new(NoopSurface));
    page.load(api).await;
    if let FetchStatus::Failed(message) = page.status() {
        bail!("Could not load {}: {}", R::RESOURCE, message);
    }

    let view = page.view_mut();
    if let Some(query) = &options.query {
        view.set_query(query);
    }
    if let Some(sort) = sort {
        view.set_sort(sort);
    }
    view.jump_to(options.page);
    if view.page().current() != options.page {
        warn!(
            "Page {} is out of range, showing page {} of {}",
            options.page,
            view.page().current(),
            view.total_pages()
        );
    }
    Ok(page)
}

fn sort_state<R>(columns: &[ColumnSpec<R>], options: &ListOptions) -> Result<Option<SortState>> {
    let Some(name) = options.sort.as_deref() else {
        return Ok(None);
    };
    let column = find_by_name(columns, name).ok_or_else(|| {
        let known: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        anyhow!("Unknown column '{}', expected one of: {}", name, known.join(", "))
    })?;
    if !column.is_sortable() {
        bail!("Column '{}' cannot be sorted", column.key);
    }
    let direction = if options.desc { SortDirection::Desc } else { SortDirection::Asc };
    Ok(Some(SortState::by(column.key, direction)))
}

/// Plain-text rendering of the current page: header, rows, page bar
pub fn render_view<R: 'static>(view: &TableView<R>, catalog: &dyn Translate) -> String {
    let columns = view.columns();
    let sort = view.sort_state();
    let widths = view.widths();

    let header: Vec<String> = columns
        .iter()
        .map(|column| {
            let mut label = catalog.translate(column.label);
            if let Some(direction) = sort.direction_for(column.key) {
                label = format!("{} {}", label, direction.arrow());
            }
            fit_width(&label, usize::from(widths.get(column.key)))
        })
        .collect();
    let header = header.join(" ");

    let mut output = String::new();
    output.push_str(header.trim_end());
    output.push('\n');
    output.push_str(&"-".repeat(header.trim_end().chars().count()));
    output.push('\n');

    if view.visible_len() == 0 {
        output.push_str("No matching records\n");
    }
    for record in view.visible_rows() {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| fit_width(&(column.render)(record), usize::from(widths.get(column.key))))
            .collect();
        output.push_str(cells.join(" ").trim_end());
        output.push('\n');
    }

    let current = view.page().current();
    let total = view.total_pages();
    let bar: Vec<String> = page_bar(&view.page_numbers(), current, total)
        .into_iter()
        .map(|entry| {
            if entry.current {
                format!("[{}]", entry.label)
            } else {
                entry.label
            }
        })
        .collect();
    output.push('\n');
    output.push_str(&format!(
        "{}  page {} of {}, {} of {} records\n",
        bar.join(" "),
        current,
        total,
        view.filtered_len(),
        view.records().len()
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::Session;
    use crate::table::fixtures::{member, MEMBER_COLUMNS};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let config = Config {
            api_url: format!("{}/api", server.uri()),
            ..Config::default()
        };
        ApiClient::new(&config, Session::default()).unwrap()
    }

    fn options(page: usize) -> ListOptions {
        ListOptions {
            page,
            ..ListOptions::default()
        }
    }

    #[test]
    fn test_render_view_shows_header_rows_and_bar() {
        let mut view = TableView::new(&MEMBER_COLUMNS, PageSize::Ten, Arc::new(NoopSurface));
        view.set_records(
            (1..=12)
                .map(|id| member(id, &format!("Member {}", id), None, true))
                .collect(),
        );
        view.set_sort(SortState::by(crate::table::ColumnKey("id"), SortDirection::Desc));

        let text = render_view(&view, &Catalog::english());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("ID ▼"));
        assert!(lines[0].contains("Name"));
        assert!(lines[2].starts_with("12"));
        assert!(lines[2].contains("Member 12"));
        assert_eq!(lines.len(), 2 + 10 + 2);
        assert_eq!(lines[13], "« ‹ [1] 2 › »  page 1 of 2, 12 of 12 records");
    }

    #[test]
    fn test_render_empty_view() {
        let view = TableView::new(&MEMBER_COLUMNS, PageSize::Ten, Arc::new(NoopSurface));
        let text = render_view(&view, &Catalog::english());
        assert!(text.contains("No matching records"));
        assert!(text.contains("page 1 of 1, 0 of 0 records"));
    }

    #[test]
    fn test_sort_option_validation() {
        let by_name = ListOptions {
            sort: Some("NAME".to_string()),
            desc: true,
            ..options(1)
        };
        assert_eq!(
            sort_state(&MEMBER_COLUMNS, &by_name).unwrap(),
            Some(SortState::by(crate::table::ColumnKey("name"), SortDirection::Desc))
        );

        let unknown = ListOptions {
            sort: Some("age".to_string()),
            ..options(1)
        };
        let err = sort_state(&MEMBER_COLUMNS, &unknown).unwrap_err();
        assert!(err.to_string().contains("expected one of: id, name, email, status, joined"));

        let unsortable = ListOptions {
            sort: Some("email".to_string()),
            ..options(1)
        };
        assert!(sort_state(&MEMBER_COLUMNS, &unsortable).is_err());
        assert_eq!(sort_state(&MEMBER_COLUMNS, &options(1)).unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_page_applies_query_sort_and_page() {
        let server = MockServer::start().await;
        let companies: Vec<_> = (1..=30)
            .map(|id| json!({"id": id, "name": format!("Acme {}", id), "active": true}))
            .chain((31..=35).map(|id| json!({"id": id, "name": format!("Globex {}", id), "active": true})))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/companies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(companies))
            .mount(&server)
            .await;

        let api = HttpResourceApi::<Company>::new(client_for(&server));
        let list = ListOptions {
            query: Some("acme".to_string()),
            sort: Some("id".to_string()),
            desc: true,
            page: 3,
            page_size: PageSize::Ten,
        };
        let page = load_page::<Company>(&api, &list).await.unwrap();
        let view = page.view();
        assert_eq!(view.filtered_len(), 30);
        assert_eq!(view.page().current(), 3);
        let ids: Vec<i64> = view.visible_rows().iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=10).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_load_page_clamps_out_of_range_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": 1, "username": "ada"}]
            })))
            .mount(&server)
            .await;

        let api = HttpResourceApi::<User>::new(client_for(&server));
        let page = load_page::<User>(&api, &options(9)).await.unwrap();
        assert_eq!(page.view().page().current(), 1);
        assert_eq!(page.view().visible_len(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/applications"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "maintenance"})))
            .mount(&server)
            .await;

        let api = HttpResourceApi::<Application>::new(client_for(&server));
        let err = load_page::<Application>(&api, &options(1)).await.err().unwrap();
        assert_eq!(err.to_string(), "Could not load applications: maintenance");
    }

    #[tokio::test]
    async fn test_delete_command() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/master-data/REGION_EU"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/users/7"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Not Found"})))
            .mount(&server)
            .await;

        delete(client_for(&server), Resource::MasterData, "REGION_EU").await.unwrap();
        let err = delete(client_for(&server), Resource::Users, "7").await.unwrap_err();
        assert_eq!(err.to_string(), "Could not delete 7: Not Found");
    }
}
