//! Label translation

use std::collections::HashMap;

/// Resolves translation keys to display text
pub trait Translate {
    /// Text for `key`, or the key itself when it has no entry
    fn translate(&self, key: &str) -> String;
}

/// In-memory key → text table
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

const ENGLISH: &[(&str, &str)] = &[
    ("resource.companies", "Companies"),
    ("resource.applications", "Applications"),
    ("resource.users", "Users"),
    ("resource.master_data", "Master Data"),
    ("column.id", "ID"),
    ("column.name", "Name"),
    ("column.code", "Code"),
    ("column.domain", "Domain"),
    ("column.status", "Status"),
    ("column.created", "Created"),
    ("column.updated", "Updated"),
    ("column.client_id", "Client ID"),
    ("column.company", "Company"),
    ("column.username", "Username"),
    ("column.display_name", "Display Name"),
    ("column.email", "Email"),
    ("column.last_login", "Last Login"),
    ("column.category", "Category"),
    ("column.label", "Label"),
    ("column.position", "Position"),
];

impl Catalog {
    pub fn english() -> Self {
        Self::from_pairs(ENGLISH.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(key, text)| (key.to_string(), text.to_string()))
            .collect();
        Self { entries }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
