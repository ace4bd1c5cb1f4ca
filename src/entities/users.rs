use crate::models::User;
use crate::table::column::{date_text, flag_text, optional_text};
use crate::table::{ColumnKey, ColumnSpec, SortValue};

pub static COLUMNS: [ColumnSpec<User>; 7] = [
    ColumnSpec {
        key: ColumnKey("id"),
        label: "column.id",
        width: 6,
        render: |u: &User| u.id.to_string(),
        search: Some(|u: &User| u.id.to_string()),
        sort: Some(|u: &User| SortValue::from(u.id)),
    },
    ColumnSpec {
        key: ColumnKey("username"),
        label: "column.username",
        width: 16,
        render: |u: &User| u.username.clone(),
        search: Some(|u: &User| u.username.clone()),
        sort: Some(|u: &User| SortValue::text(u.username.as_str())),
    },
    ColumnSpec {
        key: ColumnKey("display_name"),
        label: "column.display_name",
        width: 20,
        render: |u: &User| optional_text(&u.display_name),
        search: Some(|u: &User| optional_text(&u.display_name)),
        sort: Some(|u: &User| SortValue::text(optional_text(&u.display_name))),
    },
    ColumnSpec {
        key: ColumnKey("email"),
        label: "column.email",
        width: 26,
        render: |u: &User| optional_text(&u.email),
        search: Some(|u: &User| optional_text(&u.email)),
        sort: Some(|u: &User| SortValue::text(optional_text(&u.email))),
    },
    ColumnSpec {
        key: ColumnKey("company"),
        label: "column.company",
        width: 18,
        render: |u: &User| optional_text(&u.company_name),
        search: Some(|u: &User| optional_text(&u.company_name)),
        sort: Some(|u: &User| SortValue::text(optional_text(&u.company_name))),
    },
    ColumnSpec {
        key: ColumnKey("status"),
        label: "column.status",
        width: 10,
        render: |u: &User| flag_text(u.active),
        search: Some(|u: &User| flag_text(u.active)),
        sort: Some(|u: &User| SortValue::Flag(u.active)),
    },
    ColumnSpec {
        key: ColumnKey("last_login"),
        label: "column.last_login",
        width: 17,
        render: |u: &User| date_text(&u.last_login_at),
        search: None,
        sort: Some(|u: &User| SortValue::Date(u.last_login_at)),
    },
];
