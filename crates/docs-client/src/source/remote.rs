use crate::source::{DocSource, SourceError};
use async_trait::async_trait;
use odocs_core::{error::NetworkError, Documentation, LatestPointer, PackageName, Version};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, trace, warn};
use url::Url;

/// Documentation source backed by a remote origin over HTTP.
///
/// URL layout mirrors the local one against a fixed base URL:
/// `<base>/<package>/<version>/documentation.md` and
/// `<base>/<package>/latest.json`. Every request carries a bounded
/// timeout so a dead origin cannot stall a resolve call; timeouts and
/// other transport failures are reported as `Unavailable`, while
/// 404-class statuses are a definitive `NotFound`.
pub struct RemoteOriginSource {
    client: Client,
    base_url: Url,
}

impl RemoteOriginSource {
    pub fn new(
        base_url: Url,
        timeout: Duration,
        user_agent: impl Into<String>,
    ) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.into())
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn record_url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        trace!(%url, "Requesting record from remote origin");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                warn!(%url, "Remote origin request timed out");
                SourceError::unavailable(format!("request to {url} timed out"))
            } else {
                warn!(%url, error = %e, "Remote origin transport failure");
                SourceError::unavailable(format!("transport failure for {url}: {e}"))
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            debug!(%url, %status, "Remote origin does not have the record");
            return Err(SourceError::NotFound);
        }
        if !status.is_success() {
            warn!(%url, %status, "Remote origin returned unexpected status");
            return Err(SourceError::unavailable(format!(
                "unexpected status {status} from {url}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::unavailable(format!("failed to read body from {url}: {e}")))
    }
}

#[async_trait]
impl DocSource for RemoteOriginSource {
    fn describe(&self) -> String {
        self.base_url.as_str().to_string()
    }

    async fn fetch_docs(
        &self,
        package: &PackageName,
        version: &Version,
    ) -> Result<Documentation, SourceError> {
        let url = self.record_url(&format!("{package}/{version}/documentation.md"));
        let content = self.get_text(&url).await?;
        Ok(Documentation::new(
            package.as_str(),
            version.as_str(),
            content,
        ))
    }

    async fn fetch_latest_pointer(
        &self,
        package: &PackageName,
    ) -> Result<LatestPointer, SourceError> {
        let url = self.record_url(&format!("{package}/latest.json"));
        let content = self.get_text(&url).await?;
        serde_json::from_str(&content).map_err(|e| {
            warn!(%url, error = %e, "Malformed latest pointer from remote origin");
            SourceError::unavailable(format!("malformed latest pointer from {url}: {e}"))
        })
    }
}
