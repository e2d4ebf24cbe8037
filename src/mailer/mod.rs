//! Outbound email transports.
//!
//! [`Mailer`] is the seam between lead dispatch and the provider. Two
//! implementations exist: [`SmtpMailer`] logs in to an SMTP relay and sends
//! through it, [`BrevoApiMailer`] posts to Brevo's transactional email API.

mod brevo;
mod smtp;

pub use brevo::BrevoApiMailer;
pub use smtp::{SmtpCheckError, SmtpMailer};

use async_trait::async_trait;

use std::sync::Arc;

use crate::config::{Config, TransportKind};

/// A rendered message ready to be handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid email address format: {0}")]
    AddressFormat(#[from] lettre::address::AddressError),

    #[error("Failed to build email message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    SmtpTransport(#[from] lettre::transport::smtp::Error),

    #[error("Failed to connect to SMTP relay: {0}")]
    SmtpRelay(lettre::transport::smtp::Error),

    #[error("Email API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Email API returned {status}: {body}")]
    Api { status: u16, body: String },
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers `email` once. No retry is attempted on failure.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Builds the transport selected by `email_transport`.
pub fn from_config(config: &Config) -> Result<Arc<dyn Mailer>, MailError> {
    let mailer: Arc<dyn Mailer> = match config.email_transport {
        TransportKind::Smtp => Arc::new(SmtpMailer::new(config)?),
        TransportKind::Api => Arc::new(BrevoApiMailer::new(config)?),
    };
    Ok(mailer)
}
