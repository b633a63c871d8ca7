//! SOS alerts: intake value, recipients, message and receipt.
//!
//! One alert request moves through three stages (see [`AlertStage`]) and
//! either ends with an [`AlertReceipt`] or short-circuits with a
//! [`SosAlertError`]. Nothing is persisted along the way.

use std::fmt;

use super::UserId;

mod error;
mod message;
pub mod service;

pub use error::SosAlertError;
pub use message::{ALERT_SUBJECT, AlertMessage};

/// Confirmation text returned to the caller after a successful send.
pub const ALERT_SENT_MESSAGE: &str = "🚀 SOS Alert Sent Successfully!";

/// Processing stage of a single alert request, recorded on log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStage {
    Validating,
    Resolving,
    Dispatching,
}

impl AlertStage {
    /// Stable lowercase label for structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Resolving => "resolving",
            Self::Dispatching => "dispatching",
        }
    }
}

impl fmt::Display for AlertStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical alert request produced by intake normalisation.
///
/// # Examples
/// ```
/// use sos_backend::domain::AlertRequest;
///
/// // Query value wins; the body is only a fallback.
/// let request = AlertRequest::from_candidates([Some("42".to_owned()), Some("7".to_owned())])
///     .expect("identifier present");
/// assert_eq!(request.user_id().as_ref(), "42");
///
/// let fallback = AlertRequest::from_candidates([None, Some("7".to_owned())])
///     .expect("identifier present");
/// assert_eq!(fallback.user_id().as_ref(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    user_id: UserId,
}

impl AlertRequest {
    /// Wrap an already validated identifier.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Pick the first non-blank identifier from `candidates`, in order.
    ///
    /// # Errors
    /// Returns [`SosAlertError::InvalidRequest`] when every candidate is
    /// missing or blank.
    pub fn from_candidates<I>(candidates: I) -> Result<Self, SosAlertError>
    where
        I: IntoIterator<Item = Option<String>>,
    {
        candidates
            .into_iter()
            .flatten()
            .find_map(|raw| UserId::new(raw).ok())
            .map(Self::new)
            .ok_or(SosAlertError::InvalidRequest)
    }

    /// Identifier of the distressed employee.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Validation errors for [`RecipientAddress`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipientValidationError {
    #[error("recipient address must not be empty")]
    Empty,
}

/// Administrator e-mail address used as an alert recipient.
///
/// Only blankness is checked here; the mail adapter parses the full address
/// and reports malformed values as a dispatch failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipientAddress(String);

impl RecipientAddress {
    /// Trim and validate an address.
    pub fn new(address: impl AsRef<str>) -> Result<Self, RecipientValidationError> {
        let trimmed = address.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecipientValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipientAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecipientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RecipientAddress> for String {
    fn from(value: RecipientAddress) -> Self {
        value.0
    }
}

/// Outcome of a delivered alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertReceipt {
    recipient_count: usize,
}

impl AlertReceipt {
    /// Record a send that reached `recipient_count` administrators.
    pub fn new(recipient_count: usize) -> Self {
        Self { recipient_count }
    }

    /// Confirmation text for the caller.
    pub fn message(&self) -> &'static str {
        ALERT_SENT_MESSAGE
    }

    /// Number of administrators addressed by the alert.
    pub fn recipient_count(&self) -> usize {
        self.recipient_count
    }
}
