//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the SOS alert endpoint, the health probes and the
//! HTTP DTOs they exchange. The document backs Swagger UI in debug builds
//! and is exported with `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::sos::{AlertSentResponse, RawUserId, SendAlertBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SOS alert backend API",
        description = "Emergency broadcast endpoint for on-site staff plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::sos::send_alert,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(SendAlertBody, RawUserId, AlertSentResponse, ErrorBody)),
    tags(
        (name = "sos", description = "Emergency alert broadcast"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
