use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{SinopiaClient, SinopiaClientError};

/// Requests a registry's OAuth authorize endpoint.
#[async_trait]
pub trait Authorize {
    /// Sends the request and reports the response status. Only failing to
    /// get a response at all is an error; any status is returned as-is.
    async fn authorize(&self, registry: &str) -> Result<StatusCode, SinopiaClientError>;
}

#[async_trait]
impl<T: Authorize + Sync + ?Sized> Authorize for &T {
    async fn authorize(&self, registry: &str) -> Result<StatusCode, SinopiaClientError> {
        (**self).authorize(registry).await
    }
}

/// `<registry>/oauth/authorize`, joined verbatim. A registry ending in `/`
/// yields a `//oauth/authorize` path.
pub fn authorize_url(registry: &str) -> String {
    format!("{registry}/oauth/authorize")
}

#[async_trait]
impl Authorize for SinopiaClient {
    async fn authorize(&self, registry: &str) -> Result<StatusCode, SinopiaClientError> {
        let url = authorize_url(registry);
        if !self.strict_ssl {
            tracing::warn!("TLS certificate verification is disabled for registry requests.");
        }
        tracing::debug!("GET {url:?}");
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| SinopiaClientError::RequestError(url.clone(), e))?;
        if let Some(notice) = response
            .headers()
            .get("npm-notice")
            .and_then(|notice| notice.to_str().ok())
        {
            tracing::info!("{notice}");
        }
        if response.url().as_str() != url.trim() {
            tracing::debug!("authorize: redirected to {}", response.url());
        }
        let status = response.status();
        if status.is_success() {
            tracing::debug!("authorize: {status}");
        } else {
            tracing::warn!("Authorize endpoint {url:?} answered {status}. Continuing anyway.");
        }
        Ok(status)
    }
}
