//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the driving port and stay testable without a database or mail relay.

use std::sync::Arc;

use crate::domain::ports::SosAlertCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sos_alert: Arc<dyn SosAlertCommand>,
}

impl HttpState {
    /// Construct state around the alert use-case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use sos_backend::domain::SosAlertService;
    /// use sos_backend::domain::ports::FixtureDirectory;
    /// use sos_backend::inbound::http::state::HttpState;
    /// use sos_backend::outbound::mail::SmtpMailTransport;
    /// use sos_backend::settings::AppSettings;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let settings = AppSettings {
    ///     mail_from: Some("alerts@example.com".to_owned()),
    ///     ..AppSettings::default()
    /// };
    /// let mail = SmtpMailTransport::from_settings(&settings).expect("transport");
    /// let service = SosAlertService::new(Arc::new(FixtureDirectory), Arc::new(mail));
    /// let state = HttpState::new(Arc::new(service));
    /// let _command = state.sos_alert.clone();
    /// # });
    /// ```
    pub fn new(sos_alert: Arc<dyn SosAlertCommand>) -> Self {
        Self { sos_alert }
    }
}
