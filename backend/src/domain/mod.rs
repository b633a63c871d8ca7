//! Domain primitives and the SOS alert use-case.
//!
//! Purpose: define the strongly typed values shared by the HTTP adapter and
//! the outbound directory and mail adapters. Types are immutable once
//! constructed; invariants are documented on each type.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User (alias to `user::User`) — employee record used to compose alerts.
//! - AlertRequest, AlertMessage, AlertReceipt — the alert lifecycle values.
//! - SosAlertService — the domain service behind [`ports::SosAlertCommand`].

pub mod error;
pub mod ports;
pub mod sos_alert;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::sos_alert::service::SosAlertService;
pub use self::sos_alert::{
    ALERT_SENT_MESSAGE, ALERT_SUBJECT, AlertMessage, AlertReceipt, AlertRequest, AlertStage,
    RecipientAddress, RecipientValidationError, SosAlertError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserBuilder, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use sos_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("User not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
