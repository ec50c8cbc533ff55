//! Upstream client: the single point of entry for all calls to the job API.
//!
//! Every request carries the shared secret and the tenant header. The secret
//! is never logged. Paths can carry the SAML assertion key, so logs and errors
//! name the route instead of echoing the URL.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Url};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Secret;

pub mod api;

#[cfg(test)]
pub(crate) mod testing;

pub const SECRET_HEADER: &str = "tazzy-secret";
pub const TENANT_HEADER: &str = "tazzy-tenant";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {status} for {route}")]
    Status { status: u16, route: &'static str },

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("upstream base URL cannot carry path segments")]
    InvalidBaseUrl,

    /// `.` and `..` would be resolved away by the URL builder.
    #[error("path segment for {route} is not a valid identifier")]
    InvalidSegment { route: &'static str },
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
    secret: Secret,
}

impl UpstreamClient {
    pub fn new(base_url: Url, secret: Secret, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            secret,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn url_for(&self, route: &'static str, segments: &[&str]) -> Result<Url, UpstreamError> {
        if segments.iter().any(|s| matches!(*s, "." | "..")) {
            return Err(UpstreamError::InvalidSegment { route });
        }

        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| UpstreamError::InvalidBaseUrl)?;
            path.pop_if_empty().extend(segments.iter());
        }
        Ok(url)
    }

    pub async fn get(
        &self,
        tenant: &str,
        route: &'static str,
        segments: &[&str],
    ) -> Result<Bytes, UpstreamError> {
        let url = self.url_for(route, segments)?;
        self.execute(self.client.get(url), tenant, route).await
    }

    pub async fn post(
        &self,
        tenant: &str,
        route: &'static str,
        segments: &[&str],
        body: Vec<u8>,
    ) -> Result<Bytes, UpstreamError> {
        let url = self.url_for(route, segments)?;
        self.execute(self.client.post(url).body(body), tenant, route)
            .await
    }

    /// Attaches the secret and tenant headers, sends the request and returns the
    /// raw body of a 2xx response.
    async fn execute(
        &self,
        request: RequestBuilder,
        tenant: &str,
        route: &'static str,
    ) -> Result<Bytes, UpstreamError> {
        let request = request
            .header(CONTENT_TYPE, "application/json")
            .header(SECRET_HEADER, self.secret.expose())
            .header(TENANT_HEADER, tenant)
            .build()
            .map_err(|e| UpstreamError::Request(e.without_url()))?;

        let method = request.method().clone();
        debug!(%method, route, tenant, "Calling upstream");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| UpstreamError::Request(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            warn!(%method, route, tenant, status = status.as_u16(), "Upstream returned an error status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                route,
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Request(e.without_url()))
    }
}
