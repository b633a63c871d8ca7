//! SOS alert domain service.
//!
//! Implements [`SosAlertCommand`] on top of the [`Directory`] and
//! [`MailTransport`] driven ports. The two directory reads run concurrently;
//! the send waits for the relay to acknowledge before the call returns.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join;
use tracing::{error, info, warn};

use crate::domain::ports::{Directory, MailTransport, SosAlertCommand};
use crate::domain::{AlertMessage, AlertReceipt, AlertRequest, Error, User, UserId};

use super::{AlertStage, SosAlertError};

/// Alert service implementing the driving port.
pub struct SosAlertService<D: ?Sized, M: ?Sized> {
    directory: Arc<D>,
    mail: Arc<M>,
}

impl<D: ?Sized, M: ?Sized> Clone for SosAlertService<D, M> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            mail: Arc::clone(&self.mail),
        }
    }
}

impl<D: ?Sized, M: ?Sized> SosAlertService<D, M> {
    /// Create a new service over the given collaborators.
    pub fn new(directory: Arc<D>, mail: Arc<M>) -> Self {
        Self { directory, mail }
    }
}

impl<D, M> SosAlertService<D, M>
where
    D: Directory + ?Sized,
    M: MailTransport + ?Sized,
{
    async fn resolve(&self, user_id: &UserId) -> Result<AlertMessage, SosAlertError> {
        let (user, recipients) = try_join(
            self.directory.find_user(user_id),
            self.directory.list_admin_emails(),
        )
        .await
        .map_err(|source| {
            error!(
                %user_id,
                stage = %AlertStage::Resolving,
                error = %source,
                "directory lookup failed"
            );
            SosAlertError::LookupFailed(source)
        })?;

        if recipients.is_empty() {
            warn!(%user_id, stage = %AlertStage::Resolving, "no administrator addresses on file");
            return Err(SosAlertError::NoRecipients);
        }

        let user: User = user.ok_or_else(|| {
            warn!(%user_id, stage = %AlertStage::Resolving, "alert requested for unknown user");
            SosAlertError::UserNotFound
        })?;

        AlertMessage::compose(&user, recipients)
    }

    async fn dispatch(
        &self,
        user_id: &UserId,
        message: &AlertMessage,
    ) -> Result<AlertReceipt, SosAlertError> {
        let recipient_count = message.recipients().len();
        self.mail.send(message).await.map_err(|source| {
            error!(
                %user_id,
                stage = %AlertStage::Dispatching,
                recipient_count,
                error = %source,
                "alert dispatch failed"
            );
            SosAlertError::DispatchFailed(source)
        })?;

        info!(
            %user_id,
            stage = %AlertStage::Dispatching,
            recipient_count,
            "SOS alert sent"
        );
        Ok(AlertReceipt::new(recipient_count))
    }
}

#[async_trait]
impl<D, M> SosAlertCommand for SosAlertService<D, M>
where
    D: Directory + ?Sized,
    M: MailTransport + ?Sized,
{
    async fn send_alert(&self, request: AlertRequest) -> Result<AlertReceipt, Error> {
        let user_id = request.user_id();
        info!(%user_id, stage = %AlertStage::Resolving, "SOS alert received");

        let message = self.resolve(user_id).await?;
        Ok(self.dispatch(user_id, &message).await?)
    }
}
