//! One-shot position acquisition.
//!
//! The service has no sensor of its own: the browser runs the actual lookup
//! and posts its outcome as a [`BrowserReport`]. The provider trait keeps the
//! timeout and error mapping independent of where the position comes from.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::locator::geo::Position;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out")]
    Timeout,
    #[error("geolocation unsupported")]
    Unsupported,
    #[error("unknown geolocation failure")]
    Unknown,
}

impl GeoError {
    /// Browser `GeolocationPositionError` codes.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            2 => GeoError::PositionUnavailable,
            3 => GeoError::Timeout,
            _ => GeoError::Unknown,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            GeoError::PermissionDenied => "Tu as refusé l'accès à ta localisation.",
            GeoError::PositionUnavailable => "Les informations de localisation sont indisponibles.",
            GeoError::Timeout => "La demande de localisation a expiré.",
            GeoError::Unsupported => "La géolocalisation n'est pas supportée par ton navigateur.",
            GeoError::Unknown => "Une erreur inconnue est survenue.",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the caller accepts.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: DEFAULT_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeoError>;
}

/// Outcome of `navigator.geolocation.getCurrentPosition` as posted by the page.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BrowserReport {
    Ok { latitude: f64, longitude: f64 },
    Error { code: u16 },
    Unsupported,
}

#[async_trait]
impl GeolocationProvider for BrowserReport {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeoError> {
        match *self {
            BrowserReport::Ok {
                latitude,
                longitude,
            } => {
                let position = Position::new(latitude, longitude);
                if position.is_valid() {
                    Ok(position)
                } else {
                    warn!("Rejecting out-of-range coordinates ({latitude}, {longitude})");
                    Err(GeoError::PositionUnavailable)
                }
            }
            BrowserReport::Error { code } => Err(GeoError::from_code(code)),
            BrowserReport::Unsupported => Err(GeoError::Unsupported),
        }
    }
}

/// Asks the provider once, giving up after `options.timeout`.
pub async fn locate(
    provider: &dyn GeolocationProvider,
    options: &PositionOptions,
) -> Result<Position, GeoError> {
    match tokio::time::timeout(options.timeout, provider.current_position(options)).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Geolocation timed out after {:?}", options.timeout);
            Err(GeoError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stalled;

    #[async_trait]
    impl GeolocationProvider for Stalled {
        async fn current_position(&self, _: &PositionOptions) -> Result<Position, GeoError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Position::new(45.5, -73.5))
        }
    }

    #[test]
    fn test_each_failure_has_its_own_message() {
        let all = [
            GeoError::PermissionDenied,
            GeoError::PositionUnavailable,
            GeoError::Timeout,
            GeoError::Unsupported,
            GeoError::Unknown,
        ];
        for (i, a) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|b| b.user_message() != a.user_message()));
        }
        assert_eq!(GeoError::from_code(1), GeoError::PermissionDenied);
        assert_eq!(GeoError::from_code(3), GeoError::Timeout);
        assert_eq!(GeoError::from_code(42), GeoError::Unknown);
    }

    #[test]
    fn test_report_deserializes_by_status() {
        let ok: BrowserReport =
            serde_json::from_str(r#"{"status":"ok","latitude":45.5,"longitude":-73.5}"#).unwrap();
        assert!(matches!(ok, BrowserReport::Ok { .. }));
        let err: BrowserReport = serde_json::from_str(r#"{"status":"error","code":2}"#).unwrap();
        assert!(matches!(err, BrowserReport::Error { code: 2 }));
        let none: BrowserReport = serde_json::from_str(r#"{"status":"unsupported"}"#).unwrap();
        assert!(matches!(none, BrowserReport::Unsupported));
    }

    #[tokio::test]
    async fn test_report_maps_to_position_or_error() {
        let options = PositionOptions::default();
        let ok = BrowserReport::Ok {
            latitude: 46.8,
            longitude: -71.2,
        };
        assert_eq!(locate(&ok, &options).await, Ok(Position::new(46.8, -71.2)));

        let denied = BrowserReport::Error { code: 1 };
        assert_eq!(locate(&denied, &options).await, Err(GeoError::PermissionDenied));

        let bogus = BrowserReport::Ok {
            latitude: 123.0,
            longitude: 0.0,
        };
        assert_eq!(locate(&bogus, &options).await, Err(GeoError::PositionUnavailable));

        assert_eq!(
            locate(&BrowserReport::Unsupported, &options).await,
            Err(GeoError::Unsupported)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out() {
        let options = PositionOptions::default();
        assert_eq!(locate(&Stalled, &options).await, Err(GeoError::Timeout));
    }
}
