use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use std::collections::HashMap;

pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MAX_CHARS: usize = 1000;

const UNKNOWN_NAME: &str = "Unknown";
const NO_MESSAGE: &str = "No message provided";

/// Field-rule failures, one entry per offending field.
pub type ValidationError = garde::Report;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "name": "John Doe",
    "email": "john.doe@example.com",
    "message": "Interested in BPO services"
}))]
pub struct LeadRequest {
    /// Lead's full name, 1 to 100 characters
    #[garde(length(chars, min = 1, max = 100))]
    pub name: String,
    /// Lead's email address
    #[garde(email)]
    pub email: String,
    /// Message from the lead, 1 to 1000 characters
    #[garde(length(chars, min = 1, max = 1000))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeadResponse {
    pub success: bool,
    pub message: String,
}

impl LeadResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Payload posted by a Brevo automation "Call a webhook" step.
///
/// Only `email` is checked on arrival; the name and message derived from the
/// attributes go through the [`LeadRequest`] rules when the lead is sent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[garde(allow_unvalidated)]
#[schema(example = json!({
    "appName": "workflow-action-processor",
    "attributes": {
        "FIRSTNAME": "John",
        "MESSAGE": "Interested in BPO services"
    },
    "contact_id": 12345,
    "email": "john@example.com",
    "step_id": 13,
    "workflow_id": 6
}))]
pub struct BrevoContactWebhook {
    #[serde(rename = "appName", alias = "app_name", default)]
    pub app_name: Option<String>,
    pub contact_id: i64,
    #[garde(email)]
    pub email: String,
    pub step_id: i64,
    pub workflow_id: i64,
    /// Contact attributes, e.g. `FIRSTNAME`, `LASTNAME`, `MESSAGE`
    #[schema(value_type = Object)]
    pub attributes: HashMap<String, Value>,
}

impl BrevoContactWebhook {
    fn attribute(&self, key: &str) -> Option<String> {
        match self.attributes.get(key)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Display name built from `FIRSTNAME` and `LASTNAME`; `"Unknown"` without a first name.
    pub fn display_name(&self) -> String {
        match (self.attribute("FIRSTNAME"), self.attribute("LASTNAME")) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first,
            (None, _) => UNKNOWN_NAME.to_string(),
        }
    }

    pub fn message(&self) -> String {
        self.attribute("MESSAGE")
            .unwrap_or_else(|| NO_MESSAGE.to_string())
    }

    pub fn to_lead(&self) -> LeadRequest {
        LeadRequest {
            name: self.display_name(),
            email: self.email.clone(),
            message: self.message(),
        }
    }
}

/// Transactional email event reported by Brevo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[garde(allow_unvalidated)]
#[schema(example = json!({
    "event": "delivered",
    "email": "john@example.com",
    "id": 123456,
    "date": "2024-01-01 12:00:00",
    "message-id": "<abc123@domain.com>",
    "subject": "New BPO Lead: John Doe"
}))]
pub struct WebhookEvent {
    /// Event type (delivered, opened, click, ...)
    pub event: String,
    /// Recipient email address
    #[garde(email)]
    pub email: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub ts: Option<i64>,
    #[serde(rename = "message-id", alias = "message_id", default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub ts_event: Option<i64>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub sending_ip: Option<String>,
    #[serde(default)]
    pub ts_epoch: Option<i64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Clicked link, for click events
    #[serde(default)]
    pub link: Option<String>,
    /// Bounce or error reason
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
    pub event_type: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub docs: String,
    pub health: String,
    pub submit_lead: String,
}
