// Location module
// Permission, settings, fix and reverse-geocoding flow behind one platform
// trait, with the last known address kept in the preference store

pub mod cache;
pub mod resolver;
pub mod types;

pub use cache::LocationCache;
pub use resolver::{LocationPlatform, LocationResolver};
pub use types::{
    GeoPoint, LocationError, LocationPriority, LocationRequest, ResolvedLocation, SettingsStatus,
    ADDRESS_NOT_FOUND,
};
