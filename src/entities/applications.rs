use crate::models::Application;
use crate::table::column::{date_text, flag_text, optional_text};
use crate::table::{ColumnKey, ColumnSpec, SortValue};

pub static COLUMNS: [ColumnSpec<Application>; 6] = [
    ColumnSpec {
        key: ColumnKey("id"),
        label: "column.id",
        width: 6,
        render: |a: &Application| a.id.to_string(),
        search: Some(|a: &Application| a.id.to_string()),
        sort: Some(|a: &Application| SortValue::from(a.id)),
    },
    ColumnSpec {
        key: ColumnKey("name"),
        label: "column.name",
        width: 22,
        render: |a: &Application| a.name.clone(),
        search: Some(|a: &Application| a.name.clone()),
        sort: Some(|a: &Application| SortValue::text(a.name.as_str())),
    },
    ColumnSpec {
        key: ColumnKey("client_id"),
        label: "column.client_id",
        width: 20,
        render: |a: &Application| optional_text(&a.client_id),
        search: Some(|a: &Application| optional_text(&a.client_id)),
        sort: Some(|a: &Application| SortValue::text(optional_text(&a.client_id))),
    },
    ColumnSpec {
        key: ColumnKey("company"),
        label: "column.company",
        width: 20,
        render: |a: &Application| optional_text(&a.company_name),
        search: Some(|a: &Application| optional_text(&a.company_name)),
        sort: Some(|a: &Application| SortValue::text(optional_text(&a.company_name))),
    },
    ColumnSpec {
        key: ColumnKey("status"),
        label: "column.status",
        width: 10,
        render: |a: &Application| flag_text(a.enabled),
        search: Some(|a: &Application| flag_text(a.enabled)),
        sort: Some(|a: &Application| SortValue::Flag(a.enabled)),
    },
    ColumnSpec {
        key: ColumnKey("created"),
        label: "column.created",
        width: 17,
        render: |a: &Application| date_text(&a.created_at),
        search: None,
        sort: Some(|a: &Application| SortValue::Date(a.created_at)),
    },
];
