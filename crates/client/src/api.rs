//! Thin JSON-over-HTTP wrapper shared by the HTTP strategies.
//!
//! Holds a base URL and a [`reqwest::Client`], and turns non-2xx
//! responses into [`ClientError::Api`] so callers can branch on status.

use std::fmt;
use std::time::Duration;

use reqwest::{IntoUrl, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use control_room_core::error::CoreError;

use crate::error::{ClientError, ClientResult};

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendApi {
    client: reqwest::Client,
    base_url: String,
}

impl BackendApi {
    /// Create a client for `base_url`, e.g. `http://127.0.0.1:8000`.
    ///
    /// A trailing slash on the base URL is ignored. `timeout` of `None`
    /// leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`, which must start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of the item `id` under `collection`, with `id` encoded as a
    /// single path segment.
    pub fn item_url(&self, collection: &str, id: &str) -> ClientResult<Url> {
        let mut url = Url::parse(&self.url(collection)).map_err(|e| {
            CoreError::Internal(format!("Invalid backend URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                CoreError::Internal(format!("Backend URL {} cannot hold a path", self.base_url))
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// `GET {path}` with optional query pairs, decoding a JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        self.get_url(self.url(path), query).await
    }

    /// `GET` of one item under `collection` (see [`BackendApi::item_url`]).
    pub async fn get_item<T: DeserializeOwned>(&self, collection: &str, id: &str) -> ClientResult<T> {
        let url = self.item_url(collection, id)?;
        self.get_url(url, &[]).await
    }

    async fn get_url<T: DeserializeOwned>(
        &self,
        url: impl IntoUrl + fmt::Display,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        tracing::debug!(url = %url, "GET");
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        Self::parse_response(response).await
    }

    /// `POST {path}` with a JSON body, decoding a JSON body.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or a [`ClientError::Api`]
    /// carrying the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
