//! One-shot client for the outbound workflow webhook.
//!
//! The webhook proxies spreadsheet reads/writes through an external
//! workflow-automation service. Its implementation is out of scope; this
//! client only posts JSON payloads to the configured URL and is a no-op
//! when no URL is configured.

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use tourdesk_shared::config::WebhookConfig;

use crate::error::StoreError;

/// Client for the spreadsheet-proxy workflow webhook.
#[derive(Debug, Clone)]
pub struct SheetWebhook {
    http: reqwest::Client,
    url: Option<String>,
}

impl SheetWebhook {
    /// Builds a webhook client; disabled when no URL is configured.
    #[must_use]
    pub fn new(config: &WebhookConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.url.clone(),
        }
    }

    /// Returns true if a webhook URL is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Posts an event payload to the webhook.
    ///
    /// Silently succeeds when the webhook is disabled, so callers do not
    /// need to branch on configuration.
    pub async fn post<T: Serialize + Sync + ?Sized>(
        &self,
        event: &str,
        payload: &T,
    ) -> Result<(), StoreError> {
        let Some(url) = &self.url else {
            debug!(event, "Webhook disabled, skipping post");
            return Ok(());
        };

        let body = json!({ "event": event, "payload": payload });
        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
