// Location types
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned by reverse geocoding when the platform has no address line
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

const ONE_MINUTE_MS: u64 = 60_000;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationError {
    #[error("Location permission not granted")]
    PermissionDenied,

    #[error("Unable to retrieve location.")]
    FixUnavailable,

    #[error("Location provider error: {0}")]
    Provider(String),

    #[error("Geocoder not available")]
    GeocoderUnavailable,

    #[error("Error retrieving address: {0}")]
    Geocoding(String),

    #[error("Location settings error: {0}")]
    Settings(String),
}

/// A WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPriority {
    HighAccuracy,
    BalancedPowerAccuracy,
    LowPower,
    Passive,
}

/// Parameters passed to the platform when asking for location updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRequest {
    pub priority: LocationPriority,

    /// Desired update interval
    pub interval_ms: u64,

    /// Fastest interval the app accepts
    pub min_update_interval_ms: u64,

    /// Longest the platform may batch updates
    pub max_update_delay_ms: u64,

    /// Hold the first fix until it is accurate
    pub wait_for_accurate_location: bool,
}

impl Default for LocationRequest {
    fn default() -> Self {
        LocationRequest {
            priority: LocationPriority::HighAccuracy,
            interval_ms: ONE_MINUTE_MS,
            min_update_interval_ms: ONE_MINUTE_MS / 4,
            max_update_delay_ms: ONE_MINUTE_MS / 2,
            wait_for_accurate_location: false,
        }
    }
}

/// Result of checking device location settings against a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsStatus {
    Satisfied,
    /// The user can fix the settings through a system dialog
    ResolutionRequired,
    Unresolvable,
}

/// A fix plus its reverse-geocoded address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub point: GeoPoint,

    /// `None` when reverse geocoding failed
    pub address: Option<String>,
}
