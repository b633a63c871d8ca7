//! Failure taxonomy for the SOS alert workflow.

use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{DirectoryError, MailTransportError};

/// Terminal failures of one alert request. None of them is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SosAlertError {
    /// No identifier was supplied.
    #[error("User ID is required")]
    InvalidRequest,
    /// The identifier matched no employee.
    #[error("User not found")]
    UserNotFound,
    /// The administrator set resolved to zero addresses.
    #[error("No admins found")]
    NoRecipients,
    /// A directory lookup failed.
    #[error("directory lookup failed: {0}")]
    LookupFailed(#[source] DirectoryError),
    /// The mail transport did not accept the alert.
    #[error("alert dispatch failed: {0}")]
    DispatchFailed(#[source] MailTransportError),
}

const INTERNAL_MESSAGE: &str = "Internal Server Error";

impl From<SosAlertError> for Error {
    fn from(value: SosAlertError) -> Self {
        match value {
            SosAlertError::InvalidRequest | SosAlertError::NoRecipients => {
                Error::invalid_request(value.to_string())
            }
            SosAlertError::UserNotFound => Error::not_found(value.to_string()),
            SosAlertError::LookupFailed(source) => {
                Error::internal(INTERNAL_MESSAGE).with_details(json!(source.to_string()))
            }
            SosAlertError::DispatchFailed(source) => {
                Error::internal(INTERNAL_MESSAGE).with_details(json!(source.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(SosAlertError::InvalidRequest, ErrorCode::InvalidRequest, "User ID is required")]
    #[case(SosAlertError::UserNotFound, ErrorCode::NotFound, "User not found")]
    #[case(SosAlertError::NoRecipients, ErrorCode::InvalidRequest, "No admins found")]
    fn client_failures_keep_their_message(
        #[case] failure: SosAlertError,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        let error = Error::from(failure);
        assert_eq!(error.code(), code);
        assert_eq!(error.message(), message);
        assert!(error.details().is_none());
    }

    #[rstest]
    #[case(
        SosAlertError::LookupFailed(DirectoryError::connection("pool exhausted")),
        "directory connection failed: pool exhausted"
    )]
    #[case(
        SosAlertError::DispatchFailed(MailTransportError::timeout(20_u64)),
        "mail relay did not respond within 20s"
    )]
    fn collaborator_failures_carry_details(#[case] failure: SosAlertError, #[case] detail: &str) {
        let error = Error::from(failure);
        assert_eq!(error.code(), ErrorCode::InternalError);
        assert_eq!(error.message(), "Internal Server Error");
        assert_eq!(error.details(), Some(&json!(detail)));
    }
}
