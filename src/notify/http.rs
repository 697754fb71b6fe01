//! HTTP sender for the push-notification collaborator.

use crate::notify::{Audience, Notification, NotificationError, NotificationSender, NotifierConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wire request for the collaborator's send endpoint.
#[derive(Serialize)]
struct PushRequest<'a> {
    app_id: &'a str,
    title: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_user_ids: Option<&'a [String]>,
    broadcast: bool,
}

/// Success/error payload returned by the collaborator.
#[derive(Deserialize)]
struct PushResponse {
    #[serde(default)]
    recipients: u32,
    #[serde(default)]
    errors: Vec<String>,
}

/// Real sender: POSTs notifications to the configured collaborator.
/// Blocking I/O; must run off the async workers. The client is built per
/// send (transitions are rare events).
pub struct HttpNotifier {
    config: NotifierConfig,
}

impl HttpNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self { config }
    }
}

impl NotificationSender for HttpNotifier {
    fn send(&self, notification: &Notification) -> Result<u32, NotificationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let (target_user_ids, broadcast) = match &notification.audience {
            Audience::Broadcast => (None, true),
            Audience::Users(ids) => (Some(ids.as_slice()), false),
        };
        let body = PushRequest {
            app_id: &self.config.app_id,
            title: &notification.title,
            message: &notification.message,
            url: notification.url.as_deref(),
            target_user_ids,
            broadcast,
        };

        let response = client
            .post(&self.config.api_url)
            .header("Authorization", format!("Basic {}", self.config.api_key))
            .json(&body)
            .send()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Http(status.as_u16()));
        }

        let parsed: PushResponse = response
            .json()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;
        if !parsed.errors.is_empty() {
            return Err(NotificationError::Rejected(parsed.errors.join("; ")));
        }
        Ok(parsed.recipients)
    }
}
