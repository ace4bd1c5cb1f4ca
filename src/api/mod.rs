//! Resource API collaborator
//!
//! List screens only see [`ResourceApi`]; [`HttpResourceApi`] is the reqwest
//! implementation used by the console and headless commands.

mod client;

pub use client::{ApiClient, HttpResourceApi};

use async_trait::async_trait;

use crate::errors::ApiError;
use crate::models::{Record, RecordId};

/// CRUD operations the list screens need for one record type
#[async_trait]
pub trait ResourceApi<R: Record>: Send + Sync {
    /// Fetch the whole collection
    async fn fetch_all(&self) -> Result<Vec<R>, ApiError>;

    /// Delete one record
    async fn delete(&self, id: &RecordId) -> Result<(), ApiError>;
}
