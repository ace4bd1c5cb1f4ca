//! Column configuration shared by every resource table
//!
//! A resource describes its table as a static slice of [`ColumnSpec`]s. Search,
//! sort and resize all look columns up by [`ColumnKey`], so per-entity
//! differences live in data rather than in per-screen code.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

/// Stable identifier of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnKey(pub &'static str);

impl ColumnKey {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Value a column projects a record to when ordering rows
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
    Flag(bool),
    /// Absent dates order as the epoch.
    Date(Option<DateTime<Utc>>),
}

impl SortValue {
    pub fn text(value: impl Into<String>) -> Self {
        SortValue::Text(value.into())
    }

    /// Total order used by the sort engine.
    ///
    /// Text compares case-insensitively by code point. Values of different
    /// kinds only meet when a projector is inconsistent; they fall back to a
    /// fixed kind order so sorting stays deterministic.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
            (SortValue::Flag(a), SortValue::Flag(b)) => u8::from(*a).cmp(&u8::from(*b)),
            (SortValue::Date(a), SortValue::Date(b)) => epoch_millis(a).cmp(&epoch_millis(b)),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            SortValue::Number(_) => 0,
            SortValue::Text(_) => 1,
            SortValue::Flag(_) => 2,
            SortValue::Date(_) => 3,
        }
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        SortValue::Number(value as f64)
    }
}

fn epoch_millis(date: &Option<DateTime<Utc>>) -> i64 {
    date.map(|d| d.timestamp_millis()).unwrap_or(0)
}

/// One column of a resource table
pub struct ColumnSpec<R> {
    pub key: ColumnKey,
    /// Translation key of the header label
    pub label: &'static str,
    /// Default width in terminal cells
    pub width: u16,
    /// Cell text shown in the table
    pub render: fn(&R) -> String,
    /// Text the search filter matches against; `None` excludes the column
    pub search: Option<fn(&R) -> String>,
    /// Sort projection; `None` makes the header non-sortable
    pub sort: Option<fn(&R) -> SortValue>,
}

impl<R> ColumnSpec<R> {
    pub fn is_sortable(&self) -> bool {
        self.sort.is_some()
    }

    pub fn is_searchable(&self) -> bool {
        self.search.is_some()
    }
}

/// Look up a column by key
pub fn find<R>(columns: &[ColumnSpec<R>], key: ColumnKey) -> Option<&ColumnSpec<R>> {
    columns.iter().find(|column| column.key == key)
}

/// Look up a column by its key text, as typed on the command line
pub fn find_by_name<'a, R>(columns: &'a [ColumnSpec<R>], name: &str) -> Option<&'a ColumnSpec<R>> {
    columns
        .iter()
        .find(|column| column.key.as_str().eq_ignore_ascii_case(name))
}

/// Display text of a boolean status column
pub fn flag_text(active: bool) -> String {
    if active { "active" } else { "inactive" }.to_string()
}

/// Display text of an optional string field; absent values are empty
pub fn optional_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Display text of an optional timestamp
pub fn date_text(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(SortValue::from(9).compare(&SortValue::from(10)), Ordering::Less);
        assert_eq!(
            SortValue::Number(2.5).compare(&SortValue::Number(2.5)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_text_ignores_case() {
        assert_eq!(
            SortValue::text("alpha").compare(&SortValue::text("BETA")),
            Ordering::Less
        );
        assert_eq!(
            SortValue::text("Acme").compare(&SortValue::text("acme")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_flags_order_false_first() {
        assert_eq!(
            SortValue::Flag(false).compare(&SortValue::Flag(true)),
            Ordering::Less
        );
    }

    #[test]
    fn test_missing_date_orders_as_epoch() {
        let before_epoch = Utc.with_ymd_and_hms(1969, 12, 31, 0, 0, 0).single();
        let later = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single();

        assert_eq!(
            SortValue::Date(None).compare(&SortValue::Date(later)),
            Ordering::Less
        );
        assert_eq!(
            SortValue::Date(None).compare(&SortValue::Date(before_epoch)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let columns: [ColumnSpec<(i64, String)>; 2] = [
            ColumnSpec {
                key: ColumnKey("id"),
                label: "column.id",
                width: 6,
                render: |r: &(i64, String)| r.0.to_string(),
                search: None,
                sort: Some(|r: &(i64, String)| SortValue::from(r.0)),
            },
            ColumnSpec {
                key: ColumnKey("name"),
                label: "column.name",
                width: 20,
                render: |r: &(i64, String)| r.1.clone(),
                search: Some(|r: &(i64, String)| r.1.clone()),
                sort: None,
            },
        ];

        assert_eq!(find_by_name(&columns, "NAME").map(|c| c.key), Some(ColumnKey("name")));
        assert!(find(&columns, ColumnKey("missing")).is_none());
        assert!(columns[0].is_sortable());
        assert!(!columns[1].is_sortable());
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(flag_text(true), "active");
        assert_eq!(flag_text(false), "inactive");
        assert_eq!(optional_text(&None), "");
        assert_eq!(date_text(&None), "");
    }
}
