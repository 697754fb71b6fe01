//! Notification Dispatcher Adapter: turns committed phase transitions into
//! push notifications for the external collaborator. Best-effort only -
//! delivery failures are logged and never roll back a transition.

mod http;

pub use http::HttpNotifier;

use crate::logic::PhaseTransition;
use crate::models::Phase;
use std::sync::Arc;

/// Connection settings for the push-notification collaborator, passed in
/// explicitly (no ambient environment reads inside the adapter).
#[derive(Clone, Debug)]
pub struct NotifierConfig {
    pub api_url: String,
    pub app_id: String,
    pub api_key: String,
}

/// Errors from the notification collaborator. Never fatal to a transition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NotificationError {
    /// Could not reach the collaborator.
    Transport(String),
    /// Collaborator answered with a non-success status.
    Http(u16),
    /// Collaborator accepted the request but rejected the payload.
    Rejected(String),
}

impl std::fmt::Display for NotificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationError::Transport(msg) => write!(f, "Notification transport error: {}", msg),
            NotificationError::Http(status) => {
                write!(f, "Notification service returned HTTP {}", status)
            }
            NotificationError::Rejected(msg) => {
                write!(f, "Notification rejected: {}", msg)
            }
        }
    }
}

/// Who receives a notification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Audience {
    /// Every user subscribed to the app.
    Broadcast,
    /// A specific set of external user ids.
    Users(Vec<String>),
}

/// A single outbound push notification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub audience: Audience,
    pub url: Option<String>,
}

/// Delivery seam. Implementations: `HttpNotifier` (real collaborator) and
/// `LogNotifier` (local/dev). Returns the recipient count on success.
pub trait NotificationSender: Send + Sync {
    fn send(&self, notification: &Notification) -> Result<u32, NotificationError>;
}

/// Sender that only logs, used when no collaborator is configured.
pub struct LogNotifier;

impl NotificationSender for LogNotifier {
    fn send(&self, notification: &Notification) -> Result<u32, NotificationError> {
        log::info!(
            "notification (log only): {} - {}",
            notification.title,
            notification.message
        );
        Ok(0)
    }
}

/// Builds localized notification content from a phase transition and hands it
/// to the configured sender.
#[derive(Clone)]
pub struct Dispatcher {
    sender: Arc<dyn NotificationSender>,
}

impl Dispatcher {
    pub fn new(sender: Arc<dyn NotificationSender>) -> Self {
        Self { sender }
    }

    /// Deliver a phase-transition notification to the teams' linked users
    /// (broadcast when no users are linked). Returns the recipient count.
    pub fn dispatch_transition(
        &self,
        event: &PhaseTransition,
        championship_name: &str,
        recipient_user_ids: Vec<String>,
    ) -> Result<u32, NotificationError> {
        let (title, message) = if event.to == Phase::Closed {
            (
                format!("{}: campeonato encerrado", championship_name),
                format!(
                    "O campeonato {} chegou ao fim. Parabéns ao campeão!",
                    championship_name
                ),
            )
        } else {
            (
                format!("{}: nova fase", championship_name),
                format!(
                    "O campeonato {} avançou para a {}. {} equipes classificadas.",
                    championship_name,
                    event.to.label(),
                    event.qualified.len()
                ),
            )
        };

        let audience = if recipient_user_ids.is_empty() {
            Audience::Broadcast
        } else {
            Audience::Users(recipient_user_ids)
        };

        let notification = Notification {
            title,
            message,
            audience,
            url: Some(format!("/campeonatos/{}", event.championship_id)),
        };
        self.sender.send(&notification)
    }
}
