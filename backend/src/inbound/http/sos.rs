//! SOS alert intake handler.
//!
//! ```text
//! POST /sos/send-alert?user_id=42
//! POST /sos/send-alert {"user_id": 42}
//! ```
//!
//! The query string is the canonical location of the identifier; the JSON
//! body is only consulted when the query carries no usable value. A body
//! over [`MAX_ALERT_BODY_BYTES`] is ignored rather than rejected.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AlertRequest, AlertStage, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Largest request body read when looking for a fallback identifier.
pub const MAX_ALERT_BODY_BYTES: usize = 16 * 1024;

/// Body limit for the alert route. Register it as app data next to
/// [`send_alert`].
pub fn alert_payload_config() -> web::PayloadConfig {
    web::PayloadConfig::new(MAX_ALERT_BODY_BYTES)
}

/// Query parameters accepted by `POST /sos/send-alert`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SendAlertQuery {
    /// Identifier of the distressed employee.
    pub user_id: Option<String>,
}

/// Identifier as it may appear in a JSON body: text or any JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RawUserId {
    Text(String),
    #[schema(value_type = f64)]
    Number(serde_json::Number),
}

/// Largest float that still holds every integer exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

fn number_to_text(number: &serde_json::Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(int) = number.as_u64() {
        return int.to_string();
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float.abs() <= MAX_EXACT_FLOAT => {
            format!("{float:.0}")
        }
        _ => number.to_string(),
    }
}

impl From<RawUserId> for String {
    fn from(value: RawUserId) -> Self {
        match value {
            RawUserId::Text(text) => text,
            RawUserId::Number(number) => number_to_text(&number),
        }
    }
}

/// Optional JSON body for `POST /sos/send-alert`.
///
/// Example JSON: `{"user_id": "42"}`
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SendAlertBody {
    pub user_id: Option<RawUserId>,
}

impl SendAlertBody {
    /// Interpret raw request bytes. Anything that is not a JSON object with
    /// a usable `user_id` yields no value rather than an error.
    fn parse_lenient(bytes: &[u8]) -> Option<String> {
        serde_json::from_slice::<Self>(bytes)
            .ok()
            .and_then(|body| body.user_id)
            .map(String::from)
    }
}

/// Confirmation returned after the relay accepted the alert.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct AlertSentResponse {
    #[schema(example = "🚀 SOS Alert Sent Successfully!")]
    pub message: String,
}

/// Broadcast an SOS alert for one employee to every administrator.
///
/// Each call sends a fresh e-mail; repeated calls are not deduplicated.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use sos_backend::inbound::http::sos::send_alert;
///
/// let app = App::new().service(send_alert);
/// ```
#[utoipa::path(
    post,
    path = "/sos/send-alert",
    params(SendAlertQuery),
    request_body(content = SendAlertBody, description = "Fallback location of the identifier"),
    responses(
        (status = 200, description = "Alert sent", body = AlertSentResponse),
        (status = 400, description = "Missing identifier or no administrators", body = ErrorBody),
        (status = 404, description = "Unknown employee", body = ErrorBody),
        (status = 500, description = "Directory or mail relay failure", body = ErrorBody)
    ),
    tags = ["sos"],
    operation_id = "sendSosAlert"
)]
#[post("/sos/send-alert")]
pub async fn send_alert(
    state: web::Data<HttpState>,
    query: Option<web::Query<SendAlertQuery>>,
    body: Result<web::Bytes, actix_web::Error>,
) -> ApiResult<web::Json<AlertSentResponse>> {
    let from_query = query.and_then(|q| q.into_inner().user_id);
    let from_body = match body {
        Ok(bytes) => SendAlertBody::parse_lenient(&bytes),
        Err(err) => {
            debug!(error = %err, "alert body unreadable; ignoring it");
            None
        }
    };

    let request = AlertRequest::from_candidates([from_query, from_body]).map_err(|err| {
        warn!(stage = %AlertStage::Validating, "SOS alert rejected: no user id supplied");
        Error::from(err)
    })?;

    let receipt = state.sos_alert.send_alert(request).await?;
    Ok(web::Json(AlertSentResponse {
        message: receipt.message().to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::domain::ports::SosAlertCommand;
    use crate::domain::{AlertReceipt, TRACE_ID_HEADER};
    use crate::middleware::Trace;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use async_trait::async_trait;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[derive(Clone)]
    struct RecordingCommand {
        calls: Arc<Mutex<Vec<String>>>,
        outcome: Result<AlertReceipt, Error>,
    }

    impl RecordingCommand {
        fn succeeding() -> Self {
            Self::with_outcome(Ok(AlertReceipt::new(2)))
        }

        fn with_outcome(outcome: Result<AlertReceipt, Error>) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                outcome,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    #[async_trait]
    impl SosAlertCommand for RecordingCommand {
        async fn send_alert(&self, request: AlertRequest) -> Result<AlertReceipt, Error> {
            self.calls
                .lock()
                .expect("calls lock")
                .push(request.user_id().to_string());
            self.outcome.clone()
        }
    }

    async fn call(
        command: &RecordingCommand,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Option<String>, Value) {
        let state = HttpState::new(Arc::new(command.clone()));
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .app_data(web::Data::new(state))
                .service(send_alert),
        )
        .await;
        let res = actix_test::call_service(&app, request.to_request()).await;
        let status = res.status();
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body: Value = actix_test::read_body_json(res).await;
        (status, trace_id, body)
    }

    fn post(uri: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::post().uri(uri)
    }

    #[rstest]
    #[case::query(post("/sos/send-alert?user_id=42"))]
    #[case::body_text(post("/sos/send-alert").set_json(json!({"user_id": "42"})))]
    #[case::body_number(post("/sos/send-alert").set_json(json!({"user_id": 42})))]
    #[case::blank_query_falls_back(post("/sos/send-alert?user_id=").set_json(json!({"user_id": 42})))]
    #[actix_web::test]
    async fn accepted_identifier_locations(#[case] request: actix_test::TestRequest) {
        let command = RecordingCommand::succeeding();
        let (status, trace_id, body) = call(&command, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(trace_id.is_some());
        assert_eq!(body, json!({"message": "🚀 SOS Alert Sent Successfully!"}));
        assert_eq!(command.calls(), vec!["42".to_owned()]);
    }

    #[rstest]
    #[actix_web::test]
    async fn query_wins_over_body() {
        let command = RecordingCommand::succeeding();
        let request = post("/sos/send-alert?user_id=42").set_json(json!({"user_id": "7"}));
        let (status, _, _) = call(&command, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(command.calls(), vec!["42".to_owned()]);
    }

    #[rstest]
    #[case::nothing(post("/sos/send-alert"))]
    #[case::blank_query(post("/sos/send-alert?user_id=%20"))]
    #[case::empty_object(post("/sos/send-alert").set_json(json!({})))]
    #[case::null_value(post("/sos/send-alert").set_json(json!({"user_id": null})))]
    #[case::not_json(post("/sos/send-alert").set_payload("user_id=42"))]
    #[actix_web::test]
    async fn missing_identifier_is_rejected_without_lookup(
        #[case] request: actix_test::TestRequest,
    ) {
        let command = RecordingCommand::succeeding();
        let (status, trace_id, body) = call(&command, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(trace_id.is_some());
        assert_eq!(body, json!({"error": "User ID is required"}));
        assert!(command.calls().is_empty());
    }

    #[rstest]
    #[case(Error::not_found("User not found"), StatusCode::NOT_FOUND, json!({"error": "User not found"}))]
    #[case(Error::invalid_request("No admins found"), StatusCode::BAD_REQUEST, json!({"error": "No admins found"}))]
    #[case(
        Error::internal("Internal Server Error").with_details(json!("mail relay rejected the message: 535")),
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "Internal Server Error", "details": "mail relay rejected the message: 535"})
    )]
    #[actix_web::test]
    async fn use_case_failures_map_to_error_envelope(
        #[case] failure: Error,
        #[case] status: StatusCode,
        #[case] expected: Value,
    ) {
        let command = RecordingCommand::with_outcome(Err(failure));
        let (actual_status, _, body) = call(&command, post("/sos/send-alert?user_id=42")).await;

        assert_eq!(actual_status, status);
        assert_eq!(body, expected);
    }

    #[rstest]
    #[case(br#"{"user_id": 42}"#.as_slice(), "42")]
    #[case(br#"{"user_id": 1e3}"#.as_slice(), "1000")]
    #[case(br#"{"user_id": 42.0}"#.as_slice(), "42")]
    #[case(br#"{"user_id": 18446744073709551615}"#.as_slice(), "18446744073709551615")]
    #[case(br#"{"user_id": 2.5}"#.as_slice(), "2.5")]
    fn numeric_identifiers_become_text(#[case] raw: &[u8], #[case] expected: &str) {
        assert_eq!(SendAlertBody::parse_lenient(raw), Some(expected.to_owned()));
    }

    #[rstest]
    #[case(b"[1, 2]".as_slice())]
    #[case(br#"{"user_id": true}"#.as_slice())]
    fn unusable_bodies_yield_nothing(#[case] raw: &[u8]) {
        assert_eq!(SendAlertBody::parse_lenient(raw), None);
    }

    #[rstest]
    #[actix_web::test]
    async fn huge_identifier_is_forwarded_not_reported_missing() {
        let command = RecordingCommand::succeeding();
        let request = post("/sos/send-alert").set_payload(r#"{"user_id": 123456789012345678901234}"#);
        let (status, _, _) = call(&command, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(command.calls().len(), 1);
    }

    async fn call_with_limit(
        command: &RecordingCommand,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        let state = HttpState::new(Arc::new(command.clone()));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(alert_payload_config())
                .service(send_alert),
        )
        .await;
        let res = actix_test::call_service(&app, request.to_request()).await;
        let status = res.status();
        let body: Value = actix_test::read_body_json(res).await;
        (status, body)
    }

    fn oversized_body() -> String {
        format!(
            r#"{{"user_id": 42, "padding": "{}"}}"#,
            "x".repeat(MAX_ALERT_BODY_BYTES)
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn oversized_body_does_not_hide_query_identifier() {
        let command = RecordingCommand::succeeding();
        let request = post("/sos/send-alert?user_id=42").set_payload(oversized_body());
        let (status, body) = call_with_limit(&command, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "🚀 SOS Alert Sent Successfully!"}));
        assert_eq!(command.calls(), vec!["42".to_owned()]);
    }

    #[rstest]
    #[actix_web::test]
    async fn oversized_body_alone_is_a_missing_identifier() {
        let command = RecordingCommand::succeeding();
        let request = post("/sos/send-alert").set_payload(oversized_body());
        let (status, body) = call_with_limit(&command, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "User ID is required"}));
        assert!(command.calls().is_empty());
    }
}
