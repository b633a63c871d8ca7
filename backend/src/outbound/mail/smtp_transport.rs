//! Authenticated SMTP relay transport.
//!
//! The relay connection is built once at start-up and shared across requests.
//! One [`AlertMessage`] becomes one MIME message with every administrator on
//! the `To:` header, so the relay sees a single submission per alert.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::domain::AlertMessage;
use crate::domain::ports::{MailTransport, MailTransportError};
use crate::settings::{AppSettings, SettingsError};

/// Port on which the relay expects TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Failures while building the transport at start-up.
#[derive(Debug, thiserror::Error)]
pub enum SmtpSetupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("invalid sender address {address:?}: {message}")]
    InvalidSender { address: String, message: String },
    #[error("failed to configure SMTP relay {host}: {source}")]
    Relay {
        host: String,
        #[source]
        source: lettre::transport::smtp::Error,
    },
}

/// Connection parameters for [`SmtpMailTransport`].
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub credentials: Option<(String, String)>,
    pub sender: String,
    pub timeout: Duration,
}

impl TryFrom<&AppSettings> for SmtpConfig {
    type Error = SettingsError;

    fn try_from(settings: &AppSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            host: settings.smtp_host().to_owned(),
            port: settings.smtp_port(),
            credentials: settings
                .smtp_credentials()
                .map(|(user, pass)| (user.to_owned(), pass.to_owned())),
            sender: settings.mail_sender()?.to_owned(),
            timeout: settings.smtp_timeout(),
        })
    }
}

/// `lettre`-backed implementation of [`MailTransport`].
#[derive(Clone)]
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    timeout: Duration,
}

impl SmtpMailTransport {
    /// Build the relay transport. No connection is opened until the first
    /// send.
    ///
    /// # Errors
    /// Returns [`SmtpSetupError`] when the sender address does not parse or
    /// the relay host cannot be configured for TLS.
    pub fn new(config: SmtpConfig) -> Result<Self, SmtpSetupError> {
        let sender = config
            .sender
            .parse::<Mailbox>()
            .map_err(|err| SmtpSetupError::InvalidSender {
                address: config.sender.clone(),
                message: err.to_string(),
            })?;

        let relay = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        };
        let mut builder = relay
            .map_err(|source| SmtpSetupError::Relay {
                host: config.host.clone(),
                source,
            })?
            .port(config.port)
            .timeout(Some(config.timeout));

        if let Some((user, pass)) = config.credentials {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: builder.build(),
            sender,
            timeout: config.timeout,
        })
    }

    /// Build the transport from process settings.
    ///
    /// # Errors
    /// Fails when no sender resolves or [`SmtpMailTransport::new`] fails.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SmtpSetupError> {
        Self::new(SmtpConfig::try_from(settings)?)
    }

    fn build_email(&self, message: &AlertMessage) -> Result<Message, MailTransportError> {
        let mut builder = Message::builder().from(self.sender.clone());
        for recipient in message.recipients() {
            let mailbox = recipient
                .as_ref()
                .parse::<Mailbox>()
                .map_err(|_| MailTransportError::invalid_address(recipient.as_ref()))?;
            builder = builder.to(mailbox);
        }
        builder
            .subject(message.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body().to_owned())
            .map_err(|err| MailTransportError::rejected(err.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &AlertMessage) -> Result<(), MailTransportError> {
        let email = self.build_email(message)?;
        let response = tokio::time::timeout(self.timeout, self.transport.send(email))
            .await
            .map_err(|_| MailTransportError::timeout(self.timeout.as_secs()))?
            .map_err(|err| MailTransportError::rejected(err.to_string()))?;

        debug!(code = %response.code(), "relay accepted alert");
        Ok(())
    }
}
