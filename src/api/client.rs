//! HTTP implementation of the resource API

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use super::ResourceApi;
use crate::config::Config;
use crate::errors::ApiError;
use crate::models::{Record, RecordId};
use crate::session::Session;

/// Shared HTTP client bound to one API base URL and session
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &Config, session: Session) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;
        let base = Url::parse(config.api_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.api_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.api_url.clone()));
        }
        Ok(Self {
            http,
            base,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `{base}/{segments...}`, each segment percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.session.authorize(self.http.request(method, url))
    }
}

/// Body of a list response: a bare array or an object with a `data` array
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<R> {
    Bare(Vec<R>),
    Wrapped { data: Vec<R> },
}

impl<R> ListBody<R> {
    fn into_records(self) -> Vec<R> {
        match self {
            ListBody::Bare(records) | ListBody::Wrapped { data: records } => records,
        }
    }
}

/// Resource API for `R` over HTTP
pub struct HttpResourceApi<R> {
    client: ApiClient,
    _record: PhantomData<fn() -> R>,
}

impl<R> HttpResourceApi<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Record> ResourceApi<R> for HttpResourceApi<R> {
    async fn fetch_all(&self) -> Result<Vec<R>, ApiError> {
        let url = self.client.endpoint(&[R::RESOURCE])?;
        debug!("GET {}", url);

        let response = self.client.request(Method::GET, url).send().await?;
        let body = check_status(response).await?.text().await?;
        let records = serde_json::from_str::<ListBody<R>>(&body)
            .map_err(|source| ApiError::Decode {
                resource: R::RESOURCE,
                source,
            })?
            .into_records();

        debug!("Fetched {} {}", records.len(), R::RESOURCE);
        Ok(records)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.client.endpoint(&[R::RESOURCE, id.as_str()])?;
        debug!("DELETE {}", url);

        let response = self.client.request(Method::DELETE, url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Pass 2xx responses through, turn anything else into [`ApiError::Status`]
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status.as_u16(), &body);
    warn!("API request failed with status {}: {}", status, message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Human-readable message from an error body.
///
/// Looks for `message`, `error` then `detail` string fields and falls back
/// to a generic text naming the status.
pub fn error_message(status: u16, body: &str) -> String {
    let structured = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error", "detail"].into_iter().find_map(|field| {
                value
                    .get(field)
                    .and_then(|v| v.as_str())
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .map(str::to_string)
            })
        });
    structured.unwrap_or_else(|| format!("request failed with status {}", status))
}
