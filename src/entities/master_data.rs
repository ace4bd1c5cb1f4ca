use crate::models::MasterDataEntry;
use crate::table::column::{date_text, flag_text};
use crate::table::{ColumnKey, ColumnSpec, SortValue};

pub static COLUMNS: [ColumnSpec<MasterDataEntry>; 6] = [
    ColumnSpec {
        key: ColumnKey("code"),
        label: "column.code",
        width: 14,
        render: |m: &MasterDataEntry| m.code.clone(),
        search: Some(|m: &MasterDataEntry| m.code.clone()),
        sort: Some(|m: &MasterDataEntry| SortValue::text(m.code.as_str())),
    },
    ColumnSpec {
        key: ColumnKey("category"),
        label: "column.category",
        width: 16,
        render: |m: &MasterDataEntry| m.category.clone(),
        search: Some(|m: &MasterDataEntry| m.category.clone()),
        sort: Some(|m: &MasterDataEntry| SortValue::text(m.category.as_str())),
    },
    ColumnSpec {
        key: ColumnKey("label"),
        label: "column.label",
        width: 24,
        render: |m: &MasterDataEntry| m.label_key.clone(),
        search: Some(|m: &MasterDataEntry| m.label_key.to_lowercase()),
        sort: Some(|m: &MasterDataEntry| SortValue::text(m.label_key.as_str())),
    },
    ColumnSpec {
        key: ColumnKey("position"),
        label: "column.position",
        width: 8,
        render: |m: &MasterDataEntry| m.position.to_string(),
        search: None,
        sort: Some(|m: &MasterDataEntry| SortValue::from(m.position)),
    },
    ColumnSpec {
        key: ColumnKey("status"),
        label: "column.status",
        width: 10,
        render: |m: &MasterDataEntry| flag_text(m.active),
        search: Some(|m: &MasterDataEntry| flag_text(m.active)),
        sort: Some(|m: &MasterDataEntry| SortValue::Flag(m.active)),
    },
    ColumnSpec {
        key: ColumnKey("updated"),
        label: "column.updated",
        width: 17,
        render: |m: &MasterDataEntry| date_text(&m.updated_at),
        search: None,
        sort: Some(|m: &MasterDataEntry| SortValue::Date(m.updated_at)),
    },
];
