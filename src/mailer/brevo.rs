use async_trait::async_trait;
use serde::Serialize;

use super::{MailError, Mailer, OutgoingEmail};
use crate::config::Config;

#[derive(Debug, Serialize)]
struct Contact<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendSmtpEmail<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: &'a str,
    text_content: &'a str,
}

/// Sends through Brevo's `POST /smtp/email` transactional endpoint.
pub struct BrevoApiMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    sender_name: String,
    sender_email: String,
}

impl BrevoApiMailer {
    pub fn new(config: &Config) -> Result<Self, MailError> {
        // Address syntax is checked here so a bad sender fails at startup
        config.smtp_from_email.parse::<lettre::Address>()?;

        let client = reqwest::Client::builder()
            .timeout(config.smtp_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/smtp/email", config.brevo_api_url.trim_end_matches('/')),
            api_key: config.brevo_api_key.clone().unwrap_or_default(),
            sender_name: config.smtp_from_name.clone(),
            sender_email: config.smtp_from_email.clone(),
        })
    }
}

#[async_trait]
impl Mailer for BrevoApiMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let payload = SendSmtpEmail {
            sender: Contact {
                name: Some(&self.sender_name),
                email: &self.sender_email,
            },
            to: email
                .to
                .iter()
                .map(|to| Contact {
                    name: None,
                    email: to,
                })
                .collect(),
            subject: &email.subject,
            html_content: &email.html,
            text_content: &email.text,
        };

        tracing::info!(
            "Sending email to '{}' with subject '{}' via {}",
            email.to.join(", "),
            email.subject,
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .header("accept", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Email API responded with {}: {}", status, body);
            return Err(MailError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("Message to {} sent successfully", email.to.join(", "));

        Ok(())
    }
}
