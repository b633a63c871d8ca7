//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use sos_backend::Trace;
#[cfg(debug_assertions)]
use sos_backend::doc::ApiDoc;
use sos_backend::domain::TRACE_ID_HEADER;
use sos_backend::inbound::http::health::{HealthState, live, ready, root};
use sos_backend::inbound::http::sos::{alert_payload_config, send_alert};
use sos_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const CORS_MAX_AGE_SECS: usize = 3600;

/// Browser access policy. With no configured origins any origin may call
/// the API, which the QR scanner front end relies on during local use.
fn cors_policy(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(["GET", "POST"])
        .allow_any_header()
        .expose_headers([TRACE_ID_HEADER])
        .max_age(CORS_MAX_AGE_SECS);

    if allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }
    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    allowed_origins: &[String],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(alert_payload_config())
        .wrap(Trace)
        .wrap(cors_policy(allowed_origins))
        .service(send_alert)
        .service(root)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// The readiness flag flips once the listener is bound. Signal handling is
/// left to [`drain_on_shutdown`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();
    let allowed_origins = config.cors_allowed_origins;

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            &allowed_origins,
        )
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}

/// Fail liveness, then stop accepting work and let in-flight alerts finish.
async fn drain(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

/// Wait for SIGINT or SIGTERM and drain the server.
pub async fn drain_on_shutdown(health_state: web::Data<HealthState>, handle: ServerHandle) {
    shutdown_signal().await;
    info!("shutdown requested; draining in-flight requests");
    drain(health_state, handle).await;
}
