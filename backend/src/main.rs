//! Backend entry-point: loads settings, builds adapters and serves HTTP.

mod server;

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use sos_backend::inbound::http::health::HealthState;
use sos_backend::outbound::mail::SmtpMailTransport;
use sos_backend::outbound::persistence::{DbPool, PoolConfig};
use sos_backend::settings::AppSettings;

use server::{ServerConfig, create_server, drain_on_shutdown};

fn resolve_bind_addr(settings: &AppSettings) -> io::Result<SocketAddr> {
    (settings.bind_host(), settings.port())
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| {
            io::Error::other(format!(
                "bind address {}:{} did not resolve",
                settings.bind_host(),
                settings.port()
            ))
        })
}

async fn build_server_config(settings: &AppSettings) -> io::Result<ServerConfig> {
    let mail = SmtpMailTransport::from_settings(settings).map_err(io::Error::other)?;
    info!(
        smtp_host = settings.smtp_host(),
        smtp_port = settings.smtp_port(),
        authenticated = settings.smtp_credentials().is_some(),
        timeout_secs = settings.smtp_timeout().as_secs(),
        "SMTP relay configured"
    );

    let config = ServerConfig::new(resolve_bind_addr(settings)?, Arc::new(mail))
        .with_cors_allowed_origins(settings.cors_allowed_origins());
    match settings.database_url() {
        Some(url) => {
            let pool_config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
            let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
            Ok(config.with_db_pool(pool))
        }
        None => {
            warn!("SOS_DATABASE_URL not set; serving the fixture directory");
            Ok(config)
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("failed to load configuration: {err}")))?;
    let config = build_server_config(&settings).await?;
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    tokio::spawn(drain_on_shutdown(health_state, server.handle()));
    info!(%bind_addr, "SOS alert server listening");
    server.await
}
