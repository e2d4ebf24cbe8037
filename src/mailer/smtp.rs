use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use std::time::Duration;

use super::{MailError, Mailer, OutgoingEmail};
use crate::config::{Config, SmtpSecurity};

/// Why a connection check against the relay failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmtpCheckError {
    #[error("Authentication failed, check smtp_username and smtp_password: {0}")]
    Authentication(String),

    #[error("Timed out connecting to the SMTP relay: {0}")]
    Timeout(String),

    #[error("TLS negotiation with the SMTP relay failed: {0}")]
    Tls(String),

    #[error("SMTP relay rejected the session: {0}")]
    Rejected(String),

    #[error("Could not connect to the SMTP relay: {0}")]
    Connection(String),
}

impl SmtpCheckError {
    fn classify(message: String, timed_out: bool, tls: bool, code: Option<u16>) -> Self {
        if timed_out {
            return Self::Timeout(message);
        }
        if tls {
            return Self::Tls(message);
        }
        match code {
            Some(530 | 534 | 535 | 538) => Self::Authentication(message),
            Some(_) => Self::Rejected(message),
            None => Self::Connection(message),
        }
    }
}

impl From<&lettre::transport::smtp::Error> for SmtpCheckError {
    fn from(err: &lettre::transport::smtp::Error) -> Self {
        // Codes display as their three digits
        let code = err.status().and_then(|c| c.to_string().parse().ok());
        Self::classify(err.to_string(), err.is_timeout(), err.is_tls(), code)
    }
}

pub struct SmtpMailer {
    from: Mailbox,
    smtp_host: String,
    smtp_port: u16,
    security: SmtpSecurity,
    smtp_username: String,
    smtp_pass: String,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Result<Self, MailError> {
        let from = Mailbox::new(
            Some(config.smtp_from_name.clone()),
            config.smtp_from_email.parse()?,
        );

        Ok(Self {
            from,
            smtp_host: config.smtp_host.clone(),
            smtp_port: config.smtp_port,
            security: config.smtp_security,
            smtp_username: config.smtp_username.clone().unwrap_or_default(),
            smtp_pass: config.smtp_password.clone().unwrap_or_default(),
            timeout: config.smtp_timeout,
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder().from(self.from.clone());
        for to in &email.to {
            builder = builder.to(to.parse::<Mailbox>()?);
        }

        let message = builder.subject(email.subject.clone()).multipart(
            MultiPart::alternative_plain_html(email.text.clone(), email.html.clone()),
        )?;

        Ok(message)
    }

    // A fresh transport per message, so connections are never shared between requests
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let builder = match self.security {
            SmtpSecurity::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_host)
                    .map_err(MailError::SmtpRelay)?
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.smtp_host)
                .map_err(MailError::SmtpRelay)?,
            SmtpSecurity::Plain => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.smtp_host)
            }
        };

        let creds = Credentials::new(self.smtp_username.clone(), self.smtp_pass.clone());

        Ok(builder
            .port(self.smtp_port)
            .timeout(Some(self.timeout))
            .credentials(creds)
            .build())
    }
}

impl SmtpMailer {
    /// Connects to the relay, negotiates encryption and logs in without
    /// sending anything.
    pub async fn check_connection(&self) -> Result<(), SmtpCheckError> {
        let mailer = self.transport().map_err(|e| match e {
            MailError::SmtpRelay(ref err) => SmtpCheckError::from(err),
            other => SmtpCheckError::Connection(other.to_string()),
        })?;

        tracing::info!(
            "Checking SMTP login for '{}' at {}:{} ({:?}, timeout {:?})",
            self.smtp_username,
            self.smtp_host,
            self.smtp_port,
            self.security,
            self.timeout
        );

        match mailer.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(SmtpCheckError::Connection(
                "server closed the session after login".to_string(),
            )),
            Err(e) => Err(SmtpCheckError::from(&e)),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;
        let mailer = self.transport()?;

        tracing::info!(
            "Sending email to '{}' with subject '{}' via {}:{}",
            email.to.join(", "),
            email.subject,
            self.smtp_host,
            self.smtp_port
        );

        mailer.send(message).await?;

        tracing::info!("Message to {} sent successfully", email.to.join(", "));

        Ok(())
    }
}
