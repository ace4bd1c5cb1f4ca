//! Small record type used by the table engine tests

use chrono::{DateTime, TimeZone, Utc};

use super::column::{flag_text, optional_text, ColumnKey, ColumnSpec, SortValue};

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub active: bool,
    pub joined: Option<DateTime<Utc>>,
}

pub fn member(id: i64, name: &str, email: Option<&str>, active: bool) -> Member {
    Member {
        id,
        name: name.to_string(),
        email: email.map(str::to_string),
        active,
        joined: None,
    }
}

pub fn joined_on(mut member: Member, year: i32, month: u32, day: u32) -> Member {
    member.joined = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single();
    member
}

pub static MEMBER_COLUMNS: [ColumnSpec<Member>; 5] = [
    ColumnSpec {
        key: ColumnKey("id"),
        label: "column.id",
        width: 6,
        render: |m: &Member| m.id.to_string(),
        search: Some(|m: &Member| m.id.to_string()),
        sort: Some(|m: &Member| SortValue::from(m.id)),
    },
    ColumnSpec {
        key: ColumnKey("name"),
        label: "column.name",
        width: 20,
        render: |m: &Member| m.name.clone(),
        search: Some(|m: &Member| m.name.clone()),
        sort: Some(|m: &Member| SortValue::text(m.name.as_str())),
    },
    ColumnSpec {
        key: ColumnKey("email"),
        label: "column.email",
        width: 24,
        render: |m: &Member| optional_text(&m.email),
        search: Some(|m: &Member| optional_text(&m.email)),
        sort: None,
    },
    ColumnSpec {
        key: ColumnKey("status"),
        label: "column.status",
        width: 10,
        render: |m: &Member| flag_text(m.active),
        search: Some(|m: &Member| flag_text(m.active)),
        sort: Some(|m: &Member| SortValue::Flag(m.active)),
    },
    ColumnSpec {
        key: ColumnKey("joined"),
        label: "column.joined",
        width: 16,
        render: |m: &Member| super::column::date_text(&m.joined),
        search: None,
        sort: Some(|m: &Member| SortValue::Date(m.joined)),
    },
];
