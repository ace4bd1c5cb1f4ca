use crate::models::Company;
use crate::table::column::{date_text, flag_text, optional_text};
use crate::table::{ColumnKey, ColumnSpec, SortValue};

pub static COLUMNS: [ColumnSpec<Company>; 6] = [
    ColumnSpec {
        key: ColumnKey("id"),
        label: "column.id",
        width: 6,
        render: |c: &Company| c.id.to_string(),
        search: Some(|c: &Company| c.id.to_string()),
        sort: Some(|c: &Company| SortValue::from(c.id)),
    },
    ColumnSpec {
        key: ColumnKey("name"),
        label: "column.name",
        width: 24,
        render: |c: &Company| c.name.clone(),
        search: Some(|c: &Company| c.name.clone()),
        sort: Some(|c: &Company| SortValue::text(c.name.as_str())),
    },
    ColumnSpec {
        key: ColumnKey("code"),
        label: "column.code",
        width: 12,
        render: |c: &Company| optional_text(&c.code),
        search: Some(|c: &Company| optional_text(&c.code)),
        sort: Some(|c: &Company| SortValue::text(optional_text(&c.code))),
    },
    ColumnSpec {
        key: ColumnKey("domain"),
        label: "column.domain",
        width: 22,
        render: |c: &Company| optional_text(&c.domain),
        search: Some(|c: &Company| optional_text(&c.domain)),
        sort: None,
    },
    ColumnSpec {
        key: ColumnKey("status"),
        label: "column.status",
        width: 10,
        render: |c: &Company| flag_text(c.active),
        search: Some(|c: &Company| flag_text(c.active)),
        sort: Some(|c: &Company| SortValue::Flag(c.active)),
    },
    ColumnSpec {
        key: ColumnKey("created"),
        label: "column.created",
        width: 17,
        render: |c: &Company| date_text(&c.created_at),
        search: None,
        sort: Some(|c: &Company| SortValue::Date(c.created_at)),
    },
];
