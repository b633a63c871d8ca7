//! Driven port for outbound e-mail delivery.
//!
//! One call delivers one message to its whole recipient list. Adapters must
//! not retry and must not report partial success: the send either succeeded
//! or it failed.

use async_trait::async_trait;

use crate::domain::AlertMessage;

use super::define_port_error;

define_port_error! {
    /// Failures raised by mail transport adapters.
    pub enum MailTransportError {
        /// A recipient or sender address could not be parsed.
        InvalidAddress { address: String } => "invalid e-mail address: {address}",
        /// The relay refused the message or the connection failed.
        Rejected { message: String } => "mail relay rejected the message: {message}",
        /// No acknowledgement arrived within the configured limit.
        Timeout { seconds: u64 } => "mail relay did not respond within {seconds}s",
    }
}

/// Delivers composed messages to an outbound relay.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send `message` to all of its recipients in one atomic call.
    async fn send(&self, message: &AlertMessage) -> Result<(), MailTransportError>;
}
