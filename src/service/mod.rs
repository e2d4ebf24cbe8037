use garde::Validate;

use crate::{
    dto::{BrevoContactWebhook, LeadRequest, LeadResponse, ValidationError},
    mailer::{MailError, Mailer, OutgoingEmail},
    template,
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error("Invalid lead: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to render notification: {0}")]
    Render(#[from] askama::Error),

    #[error("Failed to send notification: {0}")]
    Mail(#[from] MailError),
}

#[derive(Clone)]
pub struct LeadService {
    mailer: Arc<dyn Mailer>,
    recipients: Vec<String>,
    service_name: String,
}

impl LeadService {
    pub fn new(mailer: Arc<dyn Mailer>, recipients: Vec<String>, service_name: String) -> Self {
        Self {
            mailer,
            recipients,
            service_name,
        }
    }

    /// Validates the lead and emails it to every configured recipient.
    /// The mailer is not called when validation fails.
    pub async fn send_lead_notification(
        &self,
        lead: &LeadRequest,
    ) -> Result<LeadResponse, LeadServiceError> {
        lead.validate()?;

        let rendered = template::render_lead_notification(lead, &self.service_name)?;
        let email = OutgoingEmail {
            to: self.recipients.clone(),
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        };

        tracing::info!(
            "Sending lead notification for {} to {}",
            lead.email,
            self.recipients.join(", ")
        );

        self.mailer.send(&email).await?;

        tracing::info!("Lead notification sent successfully");

        Ok(LeadResponse::ok("Lead submitted successfully"))
    }

    /// Sends the lead derived from a Brevo contact. The contact's own email
    /// is expected to have been checked by the caller.
    pub async fn send_contact_notification(
        &self,
        contact: &BrevoContactWebhook,
    ) -> Result<LeadResponse, LeadServiceError> {
        let lead = contact.to_lead();
        self.send_lead_notification(&lead).await
    }
}
