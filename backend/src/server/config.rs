//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use sos_backend::domain::ports::MailTransport;
use sos_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) mail: Arc<dyn MailTransport>,
    pub(crate) cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Configuration without a database; the fixture directory is used.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, mail: Arc<dyn MailTransport>) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            mail,
            cors_allowed_origins: Vec::new(),
        }
    }

    /// Attach a database connection pool for the directory adapter.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Restrict CORS to the given browser origins. Empty allows any origin.
    #[must_use]
    pub fn with_cors_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cors_allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
