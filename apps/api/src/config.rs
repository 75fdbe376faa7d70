use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::journey::autosave::AutosaveConfig;

/// Application configuration loaded from environment variables.
/// Everything has a default; a missing `ANTHROPIC_API_KEY` switches every
/// collaborator to its mock implementation.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: Option<String>,
    pub data_dir: PathBuf,
    pub autosave: AutosaveConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = AutosaveConfig::default();

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_base_url: optional_env("ANTHROPIC_BASE_URL"),
            data_dir: optional_env("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            autosave: AutosaveConfig {
                debounce: duration_env("AUTOSAVE_DEBOUNCE_MS", defaults.debounce, true)?,
                check_interval: duration_env(
                    "AUTOSAVE_CHECK_INTERVAL_MS",
                    defaults.check_interval,
                    false,
                )?,
                max_staleness: duration_env(
                    "AUTOSAVE_MAX_STALENESS_MS",
                    defaults.max_staleness,
                    false,
                )?,
            },
        })
    }

    pub fn uses_live_model(&self) -> bool {
        self.anthropic_api_key.is_some()
    }
}

/// Returns the variable only when it is set to something non-blank.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn duration_env(key: &str, default: Duration, allow_zero: bool) -> Result<Duration> {
    match optional_env(key) {
        Some(raw) => parse_millis(key, &raw, allow_zero),
        None => Ok(default),
    }
}

/// The scheduler's interval timer cannot tick at zero, so the check interval
/// and staleness limit are parsed with `allow_zero = false`.
fn parse_millis(key: &str, raw: &str, allow_zero: bool) -> Result<Duration> {
    let ms = raw
        .parse::<u64>()
        .with_context(|| format!("{key} must be a number of milliseconds"))?;
    if ms == 0 && !allow_zero {
        bail!("{key} must be greater than zero");
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_millis_reads_whole_milliseconds() {
        let d = parse_millis("AUTOSAVE_DEBOUNCE_MS", "2000", true).unwrap();
        assert_eq!(d, Duration::from_millis(2000));
        assert!(parse_millis("AUTOSAVE_DEBOUNCE_MS", "2s", true).is_err());
    }

    #[test]
    fn test_zero_interval_is_rejected_where_a_timer_needs_it() {
        let err = parse_millis("AUTOSAVE_CHECK_INTERVAL_MS", "0", false).unwrap_err();
        assert!(err.to_string().contains("AUTOSAVE_CHECK_INTERVAL_MS must be greater than zero"));
        assert!(parse_millis("AUTOSAVE_MAX_STALENESS_MS", "0", false).is_err());

        // A zero debounce just means "flush on the next edit".
        assert_eq!(
            parse_millis("AUTOSAVE_DEBOUNCE_MS", "0", true).unwrap(),
            Duration::ZERO
        );
    }
}
