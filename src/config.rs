//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::render::RenderStyle;

/// Wizard configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Base URL of the itinerary backend.
    pub api_base_url: String,
    pub render_style: RenderStyle,
    /// Auto-dismiss delay for notifications.
    pub notification_ttl: Duration,
    /// Where the terminal front-end writes the printable itinerary.
    pub output_path: PathBuf,
    /// Port for the session server.
    pub port: u16,
    /// Server sessions untouched for this long are dropped.
    pub session_idle: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            render_style: RenderStyle::default(),
            notification_ttl: Duration::from_secs(5),
            output_path: PathBuf::from("./itinerary.html"),
            port: 8080,
            session_idle: Duration::from_secs(30 * 60),
        }
    }
}

impl WizardConfig {
    /// Build from `TRIP_WIZARD_*` environment variables. Unparseable
    /// numbers fall back to defaults; an unknown render style is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("TRIP_WIZARD_API_BASE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_base_url);

        let render_style = match lookup("TRIP_WIZARD_RENDER_STYLE") {
            Some(raw) => raw
                .parse::<RenderStyle>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "TRIP_WIZARD_RENDER_STYLE".to_string(),
                    message,
                })?,
            None => defaults.render_style,
        };

        let notification_ttl = lookup("TRIP_WIZARD_NOTIFICATION_SECS")
            .and_then(|s| parse_or_warn::<u64>("TRIP_WIZARD_NOTIFICATION_SECS", &s))
            .map(Duration::from_secs)
            .unwrap_or(defaults.notification_ttl);

        let output_path = lookup("TRIP_WIZARD_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_path);

        let port = lookup("TRIP_WIZARD_PORT")
            .and_then(|s| parse_or_warn::<u16>("TRIP_WIZARD_PORT", &s))
            .unwrap_or(defaults.port);

        let session_idle = lookup("TRIP_WIZARD_SESSION_IDLE_SECS")
            .and_then(|s| parse_or_warn::<u64>("TRIP_WIZARD_SESSION_IDLE_SECS", &s))
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.session_idle);

        Ok(Self {
            api_base_url,
            render_style,
            notification_ttl,
            output_path,
            port,
            session_idle,
        })
    }

    /// Notification TTL as a chrono duration.
    pub fn notification_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.notification_ttl)
            .unwrap_or_else(|_| chrono::Duration::seconds(5))
    }

    /// Session idle timeout as a chrono duration.
    pub fn session_idle_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_idle)
            .unwrap_or_else(|_| chrono::Duration::minutes(30))
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = raw, "Ignoring unparseable configuration value");
            None
        }
    }
}
