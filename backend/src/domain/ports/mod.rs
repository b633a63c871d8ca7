//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod directory;
mod mail_transport;
mod sos_alert_command;

#[cfg(test)]
pub use directory::MockDirectory;
pub use directory::{Directory, DirectoryError, FixtureDirectory};
#[cfg(test)]
pub use mail_transport::MockMailTransport;
pub use mail_transport::{MailTransport, MailTransportError};
pub use sos_alert_command::SosAlertCommand;
