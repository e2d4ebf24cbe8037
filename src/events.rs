//! Brevo delivery-event dispatch.
//!
//! Every event type is acknowledged and logged; nothing is persisted and no
//! outbound call is made.

use crate::dto::{WebhookEvent, WebhookResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Delivered,
    Opened,
    Click,
    SoftBounce,
    HardBounce,
    Spam,
    Blocked,
    Unsubscribed,
    Error,
    Unknown(String),
}

impl From<&str> for EventKind {
    fn from(value: &str) -> Self {
        match value {
            "delivered" => Self::Delivered,
            "opened" => Self::Opened,
            "click" => Self::Click,
            "soft_bounce" => Self::SoftBounce,
            "hard_bounce" => Self::HardBounce,
            "spam" => Self::Spam,
            "blocked" => Self::Blocked,
            "unsubscribed" => Self::Unsubscribed,
            "error" => Self::Error,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// What a handler reports back for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    pub message: String,
    pub action: &'static str,
    pub link: Option<String>,
    pub reason: Option<String>,
}

impl EventOutcome {
    fn new(message: String, action: &'static str) -> Self {
        Self {
            message,
            action,
            link: None,
            reason: None,
        }
    }

    fn with_reason(mut self, reason: Option<&str>) -> Self {
        self.reason = reason.map(str::to_string);
        self
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn handle_event(event: &WebhookEvent) -> EventOutcome {
    let email = &event.email;
    let reason = event.reason.as_deref();

    tracing::info!("Processing webhook event: {} for {}", event.event, email);

    match EventKind::from(event.event.as_str()) {
        EventKind::Delivered => {
            tracing::info!(
                subject = or_dash(event.subject.as_deref()),
                message_id = or_dash(event.message_id.as_deref()),
                "Email delivered to {email}"
            );
            EventOutcome::new(format!("Email delivered to {email}"), "logged")
        }
        EventKind::Opened => {
            tracing::info!(
                subject = or_dash(event.subject.as_deref()),
                "Email opened by {email}"
            );
            EventOutcome::new(format!("Email opened by {email}"), "engagement_tracked")
        }
        EventKind::Click => {
            tracing::info!(
                link = or_dash(event.link.as_deref()),
                subject = or_dash(event.subject.as_deref()),
                "Link clicked by {email}"
            );
            EventOutcome {
                link: event.link.clone(),
                ..EventOutcome::new(
                    format!("Link clicked by {email}"),
                    "high_engagement_detected",
                )
            }
        }
        EventKind::SoftBounce => {
            tracing::warn!(reason = or_dash(reason), "Soft bounce for {email}");
            EventOutcome::new(format!("Soft bounce for {email}"), "retry_scheduled")
                .with_reason(reason)
        }
        EventKind::HardBounce => {
            tracing::error!(reason = or_dash(reason), "Hard bounce for {email}");
            EventOutcome::new(format!("Hard bounce for {email}"), "email_marked_invalid")
                .with_reason(reason)
        }
        EventKind::Spam => {
            tracing::warn!("Spam complaint from {email}");
            EventOutcome::new(format!("Spam complaint from {email}"), "unsubscribed")
        }
        EventKind::Blocked => {
            tracing::warn!(reason = or_dash(reason), "Email blocked for {email}");
            EventOutcome::new(format!("Email blocked for {email}"), "logged").with_reason(reason)
        }
        EventKind::Unsubscribed => {
            tracing::info!("Unsubscribed: {email}");
            EventOutcome::new(format!("Unsubscribed: {email}"), "removed_from_list")
        }
        EventKind::Error => {
            tracing::error!(reason = or_dash(reason), "Error for {email}");
            EventOutcome::new(format!("Error for {email}"), "logged").with_reason(reason)
        }
        EventKind::Unknown(kind) => {
            tracing::warn!("Unknown event type: {kind} for {email}");
            EventOutcome::new(format!("Unknown event type: {kind}"), "logged")
        }
    }
}

pub fn process_event(event: &WebhookEvent) -> WebhookResponse {
    let outcome = handle_event(event);
    WebhookResponse {
        success: true,
        message: outcome.message,
        event_type: event.event.clone(),
        action: outcome.action.to_string(),
        link: outcome.link,
        reason: outcome.reason,
    }
}
