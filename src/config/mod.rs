use crate::core::ConfigProvider;
use crate::domain::model::{ShutdownPolicy, TriggerMode};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_required_field, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SERVER_URL_ENV: &str = "CVN_SERVER_URL";

const MIN_POLL_INTERVAL_MS: u64 = 1;
const MAX_POLL_INTERVAL_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "cvn-buttons"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Report cowboy/ninja button presses to the game server")
)]
pub struct CliConfig {
    /// Prefix for requests; the button name is appended as the last path segment
    #[cfg_attr(feature = "cli", arg(long, env = "CVN_SERVER_URL"))]
    pub server_url: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t = TriggerMode::Edge))]
    pub mode: TriggerMode,

    /// Overrides the per-mode default (edge: 50, level: 100)
    #[cfg_attr(feature = "cli", arg(long))]
    pub poll_interval_ms: Option<u64>,

    #[cfg_attr(
        feature = "cli",
        arg(long, help = "Wait for in-flight requests before exiting")
    )]
    pub drain_on_shutdown: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON lines"))]
    pub json_logs: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let url = validate_required_field(SERVER_URL_ENV, &self.server_url)?;
        validate_url(SERVER_URL_ENV, url)?;
        if let Some(ms) = self.poll_interval_ms {
            validate_range(
                "poll_interval_ms",
                ms,
                MIN_POLL_INTERVAL_MS,
                MAX_POLL_INTERVAL_MS,
            )?;
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or_default()
    }

    fn trigger_mode(&self) -> TriggerMode {
        self.mode
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.mode.default_interval())
    }

    fn shutdown_policy(&self) -> ShutdownPolicy {
        if self.drain_on_shutdown {
            ShutdownPolicy::Drain
        } else {
            ShutdownPolicy::Abandon
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ButtonError;

    fn config(url: Option<&str>) -> CliConfig {
        CliConfig {
            server_url: url.map(str::to_string),
            mode: TriggerMode::Edge,
            poll_interval_ms: None,
            drain_on_shutdown: false,
            verbose: false,
            json_logs: false,
        }
    }

    #[test]
    fn test_missing_url_fails_fast() {
        let err = config(None).validate().unwrap_err();
        assert!(matches!(
            err,
            ButtonError::MissingConfigError { ref field } if field == "CVN_SERVER_URL"
        ));
    }

    #[test]
    fn test_malformed_url_rejected() {
        assert!(config(Some("localhost:3000")).validate().is_err());
        assert!(config(Some("")).validate().is_err());
        assert!(config(Some("http://localhost:3000/cvn/add")).validate().is_ok());
    }

    #[test]
    fn test_poll_interval_defaults_per_mode() {
        let mut cfg = config(Some("http://localhost:3000"));
        assert_eq!(cfg.poll_interval(), Duration::from_millis(50));
        cfg.mode = TriggerMode::Level;
        assert_eq!(cfg.poll_interval(), Duration::from_millis(100));
        cfg.poll_interval_ms = Some(20);
        assert_eq!(cfg.poll_interval(), Duration::from_millis(20));
        cfg.poll_interval_ms = Some(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_shutdown_policy_flag() {
        let mut cfg = config(Some("http://localhost:3000"));
        assert_eq!(cfg.shutdown_policy(), ShutdownPolicy::Abandon);
        cfg.drain_on_shutdown = true;
        assert_eq!(cfg.shutdown_policy(), ShutdownPolicy::Drain);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_flags() {
        use clap::Parser;

        let cfg = CliConfig::try_parse_from([
            "cvn-buttons",
            "--server-url",
            "http://10.0.0.2:3000/cvn/add",
            "--mode",
            "level",
            "--drain-on-shutdown",
        ])
        .unwrap();
        assert_eq!(cfg.mode, TriggerMode::Level);
        assert_eq!(cfg.server_url(), "http://10.0.0.2:3000/cvn/add");
        assert!(cfg.drain_on_shutdown);
    }
}
