//! reqwest-backed implementation of [`LocationsApi`]

use crate::{LocationsApi, Operation, SyncConfig, SyncError};
use locations_common::{FormDraft, Site, SiteId};
use serde::Deserialize;

/// Talks to `{base_url}/locations` over HTTP
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    config: SyncConfig,
}

/// Error body returned by the collection on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl HttpApi {
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Client errors, with the configured limit attached to timeouts
    fn request_failed(&self, e: reqwest::Error) -> SyncError {
        if e.is_timeout() {
            SyncError::Timeout(self.config.timeout)
        } else {
            SyncError::from(e)
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        operation: Operation,
    ) -> Result<reqwest::Response, SyncError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.request_failed(e))?;
        check_status(response, operation).await
    }
}

impl LocationsApi for HttpApi {
    async fn fetch_all(&self) -> Result<Vec<Site>, SyncError> {
        let request = self.client.get(self.config.collection_url());
        let response = self.send(request, Operation::List).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.request_failed(e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            SyncError::MalformedResponse(format!("{} response: {}", Operation::List, e))
        })
    }

    async fn create(&self, draft: &FormDraft) -> Result<Option<Site>, SyncError> {
        let request = self.client.post(self.config.collection_url()).json(draft);
        let response = self.send(request, Operation::Create).await?;
        Ok(echoed(response, Operation::Create).await)
    }

    async fn update(&self, id: &SiteId, draft: &FormDraft) -> Result<Option<Site>, SyncError> {
        let request = self.client.put(self.config.item_url(id)).json(draft);
        let response = self.send(request, Operation::Update).await?;
        Ok(echoed(response, Operation::Update).await)
    }

    async fn delete(&self, id: &SiteId) -> Result<(), SyncError> {
        let request = self.client.delete(self.config.item_url(id));
        self.send(request, Operation::Delete).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`SyncError::Remote`]
async fn check_status(
    response: reqwest::Response,
    operation: Operation,
) -> Result<reqwest::Response, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // A body that cannot be read or parsed still yields a usable message
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| operation.fallback_message().to_string());

    tracing::warn!("{} failed with {}: {}", operation, status, message);

    Err(SyncError::Remote {
        status: status.as_u16(),
        message,
    })
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
}

/// Record echoed by a successful mutation, if the body holds one
///
/// The change is already applied at this point, so an unreadable or
/// differently shaped body is logged and otherwise ignored.
async fn echoed(response: reqwest::Response, operation: Operation) -> Option<Site> {
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("{} response body unreadable: {}", operation, e);
            return None;
        }
    };
    match serde_json::from_slice::<Site>(&bytes) {
        Ok(site) => Some(site),
        Err(e) => {
            tracing::debug!("{} response carries no site: {}", operation, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error": "Location not found"}"#),
            Some("Location not found".to_string())
        );
        assert_eq!(error_message(r#"{"error": null}"#), None);
        assert_eq!(error_message(r#"{"error": ""}"#), None);
        assert_eq!(error_message(r#"{"message": "nope"}"#), None);
        assert_eq!(error_message("<html>Bad gateway</html>"), None);
        assert_eq!(error_message(""), None);
    }
}
