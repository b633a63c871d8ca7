//! Process configuration loaded via OrthoConfig.
//!
//! Values merge CLI flags, `SOS_*` environment variables and configuration
//! files. Every field is optional; accessors apply the defaults.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 465;
const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 20;
const MIN_SMTP_TIMEOUT_SECS: u64 = 10;
const MAX_SMTP_TIMEOUT_SECS: u64 = 30;

/// Start-up configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Neither `mail_from` nor `smtp_username` names a sender.
    #[error("no sender address configured: set SOS_MAIL_FROM or SOS_SMTP_USERNAME")]
    MissingSender,
}

/// Server, directory and SMTP relay settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SOS")]
pub struct AppSettings {
    /// Interface the HTTP listener binds to.
    pub bind_host: Option<String>,
    /// HTTP listener port.
    #[ortho_config(default = 5001)]
    pub port: u16,
    /// PostgreSQL URL of the directory store. Unset selects the fixture.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// SMTP relay host.
    pub smtp_host: Option<String>,
    /// SMTP relay port; 465 selects implicit TLS, anything else STARTTLS.
    #[ortho_config(default = 465)]
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// Sender mailbox; falls back to `smtp_username`.
    pub mail_from: Option<String>,
    /// Limit on one relay conversation, clamped to 10..=30 seconds.
    #[ortho_config(default = 20)]
    pub smtp_timeout_secs: u64,
    /// Comma-separated browser origins allowed by CORS. Unset allows any.
    pub cors_allowed_origins: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bind_host: None,
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            smtp_host: None,
            smtp_port: DEFAULT_SMTP_PORT,
            smtp_username: None,
            smtp_password: None,
            mail_from: None,
            smtp_timeout_secs: DEFAULT_SMTP_TIMEOUT_SECS,
            cors_allowed_origins: None,
        }
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl AppSettings {
    pub fn bind_host(&self) -> &str {
        non_blank(self.bind_host.as_ref()).unwrap_or(DEFAULT_BIND_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Directory database URL, if one is configured.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_ref())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn smtp_host(&self) -> &str {
        non_blank(self.smtp_host.as_ref()).unwrap_or(DEFAULT_SMTP_HOST)
    }

    pub fn smtp_port(&self) -> u16 {
        self.smtp_port
    }

    /// Username and password, only when both are present.
    pub fn smtp_credentials(&self) -> Option<(&str, &str)> {
        let username = non_blank(self.smtp_username.as_ref())?;
        let password = self.smtp_password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }

    /// Sender address for outgoing alerts.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingSender`] when neither `mail_from` nor
    /// `smtp_username` is set.
    pub fn mail_sender(&self) -> Result<&str, SettingsError> {
        non_blank(self.mail_from.as_ref())
            .or_else(|| non_blank(self.smtp_username.as_ref()))
            .ok_or(SettingsError::MissingSender)
    }

    /// Relay timeout, clamped to the supported range.
    pub fn smtp_timeout(&self) -> Duration {
        let secs = self
            .smtp_timeout_secs
            .clamp(MIN_SMTP_TIMEOUT_SECS, MAX_SMTP_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Browser origins allowed to call the API. Empty means any origin.
    pub fn cors_allowed_origins(&self) -> Vec<&str> {
        self.cors_allowed_origins
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 11] = [
        "SOS_BIND_HOST",
        "SOS_PORT",
        "SOS_DATABASE_URL",
        "SOS_DB_MAX_CONNECTIONS",
        "SOS_SMTP_HOST",
        "SOS_SMTP_PORT",
        "SOS_SMTP_USERNAME",
        "SOS_SMTP_PASSWORD",
        "SOS_MAIL_FROM",
        "SOS_SMTP_TIMEOUT_SECS",
        "SOS_CORS_ALLOWED_ORIGINS",
    ];

    fn with_env(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("sos-backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(with_env(&[]));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_host(), "0.0.0.0");
        assert_eq!(settings.port(), 5001);
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), 10);
        assert_eq!(settings.smtp_host(), "smtp.gmail.com");
        assert_eq!(settings.smtp_port(), 465);
        assert_eq!(settings.smtp_credentials(), None);
        assert_eq!(settings.mail_sender(), Err(SettingsError::MissingSender));
        assert_eq!(settings.smtp_timeout(), Duration::from_secs(20));
        assert!(settings.cors_allowed_origins().is_empty());
    }

    #[rstest]
    fn unconfigured_process_reports_missing_sender() {
        let _guard = lock_env(with_env(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            crate::outbound::mail::SmtpConfig::try_from(&settings).err(),
            Some(SettingsError::MissingSender)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with_env(&[
            ("SOS_PORT", "8080"),
            ("SOS_DATABASE_URL", "postgres://hr@db/hr"),
            ("SOS_SMTP_HOST", "relay.example.com"),
            ("SOS_SMTP_USERNAME", "alerts@example.com"),
            ("SOS_SMTP_PASSWORD", "app-password"),
            ("SOS_SMTP_TIMEOUT_SECS", "15"),
            ("SOS_CORS_ALLOWED_ORIGINS", "https://scan.example.com, ,https://hr.example.com"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.port(), 8080);
        assert_eq!(settings.database_url(), Some("postgres://hr@db/hr"));
        assert_eq!(settings.smtp_host(), "relay.example.com");
        assert_eq!(
            settings.smtp_credentials(),
            Some(("alerts@example.com", "app-password"))
        );
        assert_eq!(settings.mail_sender(), Ok("alerts@example.com"));
        assert_eq!(settings.smtp_timeout(), Duration::from_secs(15));
        assert_eq!(
            settings.cors_allowed_origins(),
            vec!["https://scan.example.com", "https://hr.example.com"]
        );
    }

    #[rstest]
    #[case(1, 10)]
    #[case(25, 25)]
    #[case(600, 30)]
    #[case(DEFAULT_SMTP_TIMEOUT_SECS, 20)]
    fn smtp_timeout_is_clamped(#[case] configured: u64, #[case] expected: u64) {
        let settings = AppSettings {
            smtp_timeout_secs: configured,
            ..AppSettings::default()
        };
        assert_eq!(settings.smtp_timeout(), Duration::from_secs(expected));
    }

    #[rstest]
    fn mail_from_wins_over_username() {
        let settings = AppSettings {
            smtp_username: Some("relay-user@example.com".to_owned()),
            mail_from: Some("sos@example.com".to_owned()),
            ..AppSettings::default()
        };
        assert_eq!(settings.mail_sender(), Ok("sos@example.com"));
    }

    #[rstest]
    #[case(Some("user@example.com"), None)]
    #[case(None, Some("secret"))]
    #[case(Some("  "), Some("secret"))]
    fn credentials_need_both_halves(
        #[case] username: Option<&str>,
        #[case] password: Option<&str>,
    ) {
        let settings = AppSettings {
            smtp_username: username.map(str::to_owned),
            smtp_password: password.map(str::to_owned),
            ..AppSettings::default()
        };
        assert_eq!(settings.smtp_credentials(), None);
    }

    #[rstest]
    fn blank_database_url_selects_fixture() {
        let settings = AppSettings {
            database_url: Some("   ".to_owned()),
            ..AppSettings::default()
        };
        assert_eq!(settings.database_url(), None);
    }
}
