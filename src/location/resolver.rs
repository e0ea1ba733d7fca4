// Location resolver
// permission -> settings -> fix -> reverse geocode -> cache

use log::{debug, info, warn};

use crate::location::cache::LocationCache;
use crate::location::types::{
    GeoPoint, LocationError, LocationRequest, ResolvedLocation, SettingsStatus, ADDRESS_NOT_FOUND,
};

/// Device services the location flow depends on
#[allow(async_fn_in_trait)]
pub trait LocationPlatform {
    /// Whether fine or coarse location access has been granted
    fn permission_granted(&self) -> bool;

    /// Check device settings against a request
    async fn check_settings(&self, request: &LocationRequest)
        -> Result<SettingsStatus, LocationError>;

    /// Show the system dialog that lets the user fix the settings
    async fn resolve_settings(&self) -> Result<(), LocationError>;

    /// Next location update; `Ok(None)` when the provider has no fix
    async fn current_fix(&self, request: &LocationRequest)
        -> Result<Option<GeoPoint>, LocationError>;

    fn geocoder_present(&self) -> bool;

    /// First address line for a coordinate, if the geocoder knows one
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Option<String>, LocationError>;
}

pub struct LocationResolver<P: LocationPlatform> {
    platform: P,
    cache: LocationCache,
    request: LocationRequest,
}

impl<P: LocationPlatform> LocationResolver<P> {
    pub fn new(platform: P, cache: LocationCache) -> Self {
        LocationResolver {
            platform,
            cache,
            request: LocationRequest::default(),
        }
    }

    pub fn with_request(mut self, request: LocationRequest) -> Self {
        self.request = request;
        self
    }

    pub fn request(&self) -> &LocationRequest {
        &self.request
    }

    pub fn cache(&self) -> &LocationCache {
        &self.cache
    }

    /// Check settings and ask the user to fix them when possible
    ///
    /// Never fails: the fix request that follows reports the real outcome.
    pub async fn ensure_settings(&self) -> SettingsStatus {
        let status = match self.platform.check_settings(&self.request).await {
            Ok(status) => status,
            Err(e) => {
                warn!("Failed to check location settings: {}", e);
                return SettingsStatus::Unresolvable;
            }
        };

        if status == SettingsStatus::ResolutionRequired {
            debug!("Attempting to resolve location settings issue");
            if let Err(e) = self.platform.resolve_settings().await {
                warn!("Failed to send resolution request: {}", e);
            }
        }

        status
    }

    /// Current coordinates, without geocoding
    pub async fn current_location(&self) -> Result<GeoPoint, LocationError> {
        if !self.platform.permission_granted() {
            return Err(LocationError::PermissionDenied);
        }

        self.platform
            .current_fix(&self.request)
            .await?
            .ok_or(LocationError::FixUnavailable)
    }

    /// Address line for a coordinate
    pub async fn address_for(&self, point: GeoPoint) -> Result<String, LocationError> {
        if !self.platform.geocoder_present() {
            return Err(LocationError::GeocoderUnavailable);
        }

        let address = self.platform.reverse_geocode(point).await?;
        Ok(address.unwrap_or_else(|| ADDRESS_NOT_FOUND.to_string()))
    }

    /// Full flow used by the request form's location button
    ///
    /// A geocoding failure still yields the fix, with no address and the
    /// cache left as it was.
    pub async fn resolve(&self) -> Result<ResolvedLocation, LocationError> {
        if !self.platform.permission_granted() {
            return Err(LocationError::PermissionDenied);
        }

        self.ensure_settings().await;
        let point = self.current_location().await?;

        let address = match self.address_for(point).await {
            Ok(address) => {
                if let Err(e) = self.cache.save_location(&address) {
                    warn!("Failed to cache location: {}", e);
                }
                Some(address)
            }
            Err(e) => {
                warn!("Reverse geocoding failed: {}", e);
                None
            }
        };

        info!(
            "Resolved location {:.5}, {:.5}",
            point.latitude, point.longitude
        );
        Ok(ResolvedLocation { point, address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::open_in_memory;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakePlatform {
        permission: bool,
        settings: SettingsStatus,
        fix: Option<GeoPoint>,
        geocoder: bool,
        address: Result<Option<String>, LocationError>,
        resolutions: AtomicUsize,
        fix_requests: AtomicUsize,
    }

    impl Default for FakePlatform {
        fn default() -> Self {
            FakePlatform {
                permission: true,
                settings: SettingsStatus::Satisfied,
                fix: Some(GeoPoint::new(54.5742, -1.2350)),
                geocoder: true,
                address: Ok(Some("Borough Rd, Middlesbrough TS1 3BX".to_string())),
                resolutions: AtomicUsize::new(0),
                fix_requests: AtomicUsize::new(0),
            }
        }
    }

    impl LocationPlatform for FakePlatform {
        fn permission_granted(&self) -> bool {
            self.permission
        }

        async fn check_settings(
            &self,
            _request: &LocationRequest,
        ) -> Result<SettingsStatus, LocationError> {
            Ok(self.settings)
        }

        async fn resolve_settings(&self) -> Result<(), LocationError> {
            self.resolutions.fetch_add(1, Ordering::SeqCst);
            Err(LocationError::Settings("dialog dismissed".to_string()))
        }

        async fn current_fix(
            &self,
            _request: &LocationRequest,
        ) -> Result<Option<GeoPoint>, LocationError> {
            self.fix_requests.fetch_add(1, Ordering::SeqCst);
            Ok(self.fix)
        }

        fn geocoder_present(&self) -> bool {
            self.geocoder
        }

        async fn reverse_geocode(&self, _point: GeoPoint) -> Result<Option<String>, LocationError> {
            self.address.clone()
        }
    }

    fn resolver(platform: FakePlatform) -> LocationResolver<FakePlatform> {
        LocationResolver::new(platform, LocationCache::new(open_in_memory().unwrap()))
    }

    #[tokio::test]
    async fn test_resolve_caches_address() {
        let resolver = resolver(FakePlatform::default());

        let resolved = resolver.resolve().await.unwrap();
        assert_eq!(resolved.point, GeoPoint::new(54.5742, -1.2350));
        assert_eq!(
            resolved.address.as_deref(),
            Some("Borough Rd, Middlesbrough TS1 3BX")
        );
        assert_eq!(
            resolver.cache().location().unwrap().as_deref(),
            Some("Borough Rd, Middlesbrough TS1 3BX")
        );
    }

    #[tokio::test]
    async fn test_permission_denied_stops_flow() {
        let resolver = resolver(FakePlatform {
            permission: false,
            ..FakePlatform::default()
        });

        assert_eq!(resolver.resolve().await, Err(LocationError::PermissionDenied));
        assert_eq!(resolver.platform.fix_requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_fix() {
        let resolver = resolver(FakePlatform {
            fix: None,
            ..FakePlatform::default()
        });

        let err = resolver.resolve().await.unwrap_err();
        assert_eq!(err, LocationError::FixUnavailable);
        assert_eq!(err.to_string(), "Unable to retrieve location.");
    }

    #[tokio::test]
    async fn test_settings_resolution_failure_is_not_fatal() {
        let resolver = resolver(FakePlatform {
            settings: SettingsStatus::ResolutionRequired,
            ..FakePlatform::default()
        });

        assert!(resolver.resolve().await.is_ok());
        assert_eq!(resolver.platform.resolutions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unresolvable_settings_skip_dialog() {
        let resolver = resolver(FakePlatform {
            settings: SettingsStatus::Unresolvable,
            ..FakePlatform::default()
        });

        assert_eq!(resolver.ensure_settings().await, SettingsStatus::Unresolvable);
        assert_eq!(resolver.platform.resolutions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_address_not_found_fallback() {
        let resolver = resolver(FakePlatform {
            address: Ok(None),
            ..FakePlatform::default()
        });

        let address = resolver.address_for(GeoPoint::new(0.0, 0.0)).await.unwrap();
        assert_eq!(address, ADDRESS_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_geocoder_keeps_fix_and_cache() {
        let resolver = resolver(FakePlatform {
            geocoder: false,
            ..FakePlatform::default()
        });
        resolver.cache().save_location("previous").unwrap();

        let resolved = resolver.resolve().await.unwrap();
        assert_eq!(resolved.address, None);
        assert_eq!(
            resolver.cache().location().unwrap().as_deref(),
            Some("previous")
        );
        assert_eq!(
            resolver.address_for(resolved.point).await,
            Err(LocationError::GeocoderUnavailable)
        );
    }

    #[tokio::test]
    async fn test_geocoding_error_surfaces_from_address_for() {
        let resolver = resolver(FakePlatform {
            address: Err(LocationError::Geocoding("service unavailable".to_string())),
            ..FakePlatform::default()
        });

        assert_eq!(
            resolver.address_for(GeoPoint::new(1.0, 1.0)).await,
            Err(LocationError::Geocoding("service unavailable".to_string()))
        );
    }
}
