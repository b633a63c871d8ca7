//! SMTP mail adapter implementing the
//! [`MailTransport`](crate::domain::ports::MailTransport) port with `lettre`.

mod smtp_transport;

pub use smtp_transport::{SmtpConfig, SmtpMailTransport, SmtpSetupError};
