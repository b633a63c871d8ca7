//! Builders wiring adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use sos_backend::domain::SosAlertService;
use sos_backend::domain::ports::{Directory, FixtureDirectory};
use sos_backend::inbound::http::state::HttpState;
use sos_backend::outbound::persistence::DieselDirectory;

use super::ServerConfig;

/// Pick the directory adapter: Diesel when a pool is configured, otherwise
/// the in-memory fixture.
fn build_directory(config: &ServerConfig) -> Arc<dyn Directory> {
    match &config.db_pool {
        Some(pool) => {
            info!(directory = "postgres", "directory adapter selected");
            Arc::new(DieselDirectory::new(pool.clone()))
        }
        None => {
            info!(directory = "fixture", "directory adapter selected");
            Arc::new(FixtureDirectory)
        }
    }
}

/// Build the shared handler state around one alert service instance.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let directory = build_directory(config);
    let service = SosAlertService::new(directory, Arc::clone(&config.mail));
    web::Data::new(HttpState::new(Arc::new(service)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;
    use sos_backend::domain::ports::{MailTransport, MailTransportError, SosAlertCommand};
    use sos_backend::domain::{AlertMessage, AlertRequest, ErrorCode, UserId};

    #[derive(Default)]
    struct RecordingMail {
        sent: Mutex<Vec<AlertMessage>>,
    }

    #[async_trait]
    impl MailTransport for RecordingMail {
        async fn send(&self, message: &AlertMessage) -> Result<(), MailTransportError> {
            self.sent.lock().expect("sent lock").push(message.clone());
            Ok(())
        }
    }

    fn config(mail: Arc<RecordingMail>) -> ServerConfig {
        ServerConfig::new(([127, 0, 0, 1], 0).into(), mail)
    }

    #[rstest]
    #[tokio::test]
    async fn without_pool_the_fixture_directory_serves_alerts() {
        let mail = Arc::new(RecordingMail::default());
        let state = build_http_state(&config(Arc::clone(&mail)));

        let receipt = state
            .sos_alert
            .send_alert(AlertRequest::new(UserId::new("42").expect("id")))
            .await
            .expect("fixture user resolves");

        assert_eq!(receipt.recipient_count(), 2);
        let sent = mail.sent.lock().expect("sent lock");
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body().contains("Jane Doe"));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_directory_reports_unknown_users() {
        let mail = Arc::new(RecordingMail::default());
        let state = build_http_state(&config(Arc::clone(&mail)));

        let err = state
            .sos_alert
            .send_alert(AlertRequest::new(UserId::new("999").expect("id")))
            .await
            .expect_err("unknown user");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(mail.sent.lock().expect("sent lock").is_empty());
    }
}
