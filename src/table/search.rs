//! Free-text multi-field search

use super::column::ColumnSpec;

/// Normalized search text: trimmed and lower-cased, empty means "match all"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any searchable column of `record` contains the query
    pub fn matches<R>(&self, record: &R, columns: &[ColumnSpec<R>]) -> bool {
        if self.is_empty() {
            return true;
        }
        columns
            .iter()
            .filter_map(|column| column.search)
            .any(|extract| extract(record).to_lowercase().contains(self.0.as_str()))
    }
}

/// Indices of the records matching `query`, in input order
pub fn filter<R>(records: &[R], query: &SearchQuery, columns: &[ColumnSpec<R>]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| query.matches(*record, columns))
        .map(|(index, _)| index)
        .collect()
}
