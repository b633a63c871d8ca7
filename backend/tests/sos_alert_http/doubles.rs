//! Recording doubles for the driven ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sos_backend::domain::ports::{Directory, DirectoryError, MailTransport, MailTransportError};
use sos_backend::domain::{AlertMessage, RecipientAddress, User, UserId};

/// Directory call recorded by [`RecordingDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryCall {
    FindUser(String),
    ListAdminEmails,
}

#[derive(Clone)]
pub enum AdminsResponse {
    Ok(Vec<RecipientAddress>),
    Err(DirectoryError),
}

/// In-memory directory recording every call.
#[derive(Clone)]
pub struct RecordingDirectory {
    calls: Arc<Mutex<Vec<DirectoryCall>>>,
    users: Vec<User>,
    admins: AdminsResponse,
}

impl RecordingDirectory {
    pub fn new(users: Vec<User>, admins: AdminsResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            users,
            admins,
        }
    }

    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.calls.lock().expect("directory calls lock").clone()
    }
}

#[async_trait]
impl Directory for RecordingDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        self.calls
            .lock()
            .expect("directory calls lock")
            .push(DirectoryCall::FindUser(id.to_string()));
        Ok(self.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn list_admin_emails(&self) -> Result<Vec<RecipientAddress>, DirectoryError> {
        self.calls
            .lock()
            .expect("directory calls lock")
            .push(DirectoryCall::ListAdminEmails);
        match &self.admins {
            AdminsResponse::Ok(admins) => Ok(admins.clone()),
            AdminsResponse::Err(err) => Err(err.clone()),
        }
    }
}

/// Mail transport capturing sent messages, optionally failing every send.
#[derive(Clone, Default)]
pub struct RecordingMail {
    sent: Arc<Mutex<Vec<AlertMessage>>>,
    failure: Option<MailTransportError>,
}

impl RecordingMail {
    pub fn failing(failure: MailTransportError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<AlertMessage> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMail {
    async fn send(&self, message: &AlertMessage) -> Result<(), MailTransportError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        self.sent.lock().expect("sent lock").push(message.clone());
        Ok(())
    }
}
