//! Driven port for the directory store holding employees and administrators.
//!
//! The SOS workflow needs exactly two reads: one employee by identifier and
//! the e-mail addresses of every administrator. Both are read-only.

use async_trait::async_trait;

use crate::domain::{RecipientAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by directory adapters.
    pub enum DirectoryError {
        /// The store could not be reached.
        Connection { message: String } => "directory connection failed: {message}",
        /// A lookup failed while executing.
        Query { message: String } => "directory query failed: {message}",
    }
}

/// Read access to employee and administrator records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolve an identifier to at most one employee record.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;

    /// Return the e-mail address of every administrator, unfiltered.
    async fn list_admin_emails(&self) -> Result<Vec<RecipientAddress>, DirectoryError>;
}

/// In-memory directory used when no database is configured.
///
/// Holds employee `42` (Jane Doe) and two administrators, `a@x.com` and
/// `b@x.com`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDirectory;

const FIXTURE_USER_ID: &str = "42";
const FIXTURE_ADMIN_EMAILS: [&str; 2] = ["a@x.com", "b@x.com"];

#[async_trait]
impl Directory for FixtureDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        if id.as_ref() != FIXTURE_USER_ID {
            return Ok(None);
        }
        let fixture_id =
            UserId::new(FIXTURE_USER_ID).map_err(|err| DirectoryError::query(err.to_string()))?;
        let user = User::builder(fixture_id, "Jane Doe")
            .email(Some("jane.doe@example.com".to_owned()))
            .phone(Some("+1-555-0100".to_owned()))
            .blood_group(Some("O+".to_owned()))
            .emergency_contact(Some("John Doe".to_owned()), Some("+1-555-0199".to_owned()))
            .medical_conditions(Some("Asthma".to_owned()))
            .allergies(Some("Penicillin".to_owned()))
            .build();
        Ok(Some(user))
    }

    async fn list_admin_emails(&self) -> Result<Vec<RecipientAddress>, DirectoryError> {
        FIXTURE_ADMIN_EMAILS
            .iter()
            .map(|email| {
                RecipientAddress::new(*email).map_err(|err| DirectoryError::query(err.to_string()))
            })
            .collect()
    }
}
