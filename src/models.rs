//! Resource records as returned by the administration API

use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::entities;
use crate::table::ColumnSpec;

/// Identifier of a record, unique within its collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Interpret command-line input: integers become `Int`, anything else `Text`
    pub fn from_input(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<i64>()
            .map(RecordId::Int)
            .unwrap_or_else(|_| RecordId::Text(raw.to_string()))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

/// A record type that can be listed in a resource table
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// API path segment of the collection
    const RESOURCE: &'static str;

    fn id(&self) -> RecordId;

    /// Column table driving search, sort, widths and rendering
    fn columns() -> &'static [ColumnSpec<Self>];
}

/// Resource collections the console can manage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Resource {
    Companies,
    Applications,
    Users,
    MasterData,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Companies,
        Resource::Applications,
        Resource::Users,
        Resource::MasterData,
    ];

    /// API path segment
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Companies => Company::RESOURCE,
            Resource::Applications => Application::RESOURCE,
            Resource::Users => User::RESOURCE,
            Resource::MasterData => MasterDataEntry::RESOURCE,
        }
    }

    /// Translation key of the resource title
    pub fn title_key(&self) -> &'static str {
        match self {
            Resource::Companies => "resource.companies",
            Resource::Applications => "resource.applications",
            Resource::Users => "resource.users",
            Resource::MasterData => "resource.master_data",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Tenant company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Company {
    const RESOURCE: &'static str = "companies";

    fn id(&self) -> RecordId {
        RecordId::Int(self.id)
    }

    fn columns() -> &'static [ColumnSpec<Self>] {
        &entities::companies::COLUMNS
    }
}

/// OAuth client application registered for a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Application {
    const RESOURCE: &'static str = "applications";

    fn id(&self) -> RecordId {
        RecordId::Int(self.id)
    }

    fn columns() -> &'static [ColumnSpec<Self>] {
        &entities::applications::COLUMNS
    }
}

/// Console or end user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Record for User {
    const RESOURCE: &'static str = "users";

    fn id(&self) -> RecordId {
        RecordId::Int(self.id)
    }

    fn columns() -> &'static [ColumnSpec<Self>] {
        &entities::users::COLUMNS
    }
}

/// Entry of a master-data code list, keyed by its code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDataEntry {
    pub code: String,
    #[serde(default)]
    pub category: String,
    /// Translation key of the human-readable label
    #[serde(default)]
    pub label_key: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for MasterDataEntry {
    const RESOURCE: &'static str = "master-data";

    fn id(&self) -> RecordId {
        RecordId::Text(self.code.clone())
    }

    fn columns() -> &'static [ColumnSpec<Self>] {
        &entities::master_data::COLUMNS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_from_input() {
        assert_eq!(RecordId::from_input(" 42 "), RecordId::Int(42));
        assert_eq!(RecordId::from_input("COUNTRY_JP"), RecordId::Text("COUNTRY_JP".to_string()));
        assert_eq!(RecordId::Int(7).to_string(), "7");
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let user: User = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(user.username, "");
        assert_eq!(user.email, None);
        assert!(!user.active);
        assert_eq!(user.last_login_at, None);
    }

    #[test]
    fn test_camel_case_fields() {
        let app: Application = serde_json::from_str(
            r#"{"id": 1, "name": "Portal", "clientId": "portal-web", "companyName": "Acme", "enabled": true, "createdAt": "2024-02-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(app.client_id.as_deref(), Some("portal-web"));
        assert_eq!(app.company_name.as_deref(), Some("Acme"));
        assert!(app.created_at.is_some());
    }

    #[test]
    fn test_master_data_is_keyed_by_code() {
        let entry: MasterDataEntry =
            serde_json::from_str(r#"{"code": "JP", "category": "country", "labelKey": "country.jp"}"#).unwrap();
        assert_eq!(entry.id(), RecordId::Text("JP".to_string()));
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::MasterData.path(), "master-data");
        assert_eq!(Resource::Users.to_string(), "users");
        assert_eq!(
            Resource::from_str("master-data", true).ok(),
            Some(Resource::MasterData)
        );
    }
}
