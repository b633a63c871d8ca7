//! Driving port for the SOS alert use-case.
//!
//! The HTTP adapter only sees this trait, so handler tests can swap in a
//! recording double without wiring a directory or a mail relay.

use async_trait::async_trait;

use crate::domain::{AlertReceipt, AlertRequest, Error};

/// Trigger an emergency broadcast for one distressed employee.
#[async_trait]
pub trait SosAlertCommand: Send + Sync {
    /// Resolve the employee and administrators, then send one alert e-mail.
    async fn send_alert(&self, request: AlertRequest) -> Result<AlertReceipt, Error>;
}
