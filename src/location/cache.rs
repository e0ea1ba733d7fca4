// Last known address cache
// Explicitly constructed over the preference store; one per app session

use crate::state::{get_preference, put_preference, StoreConnection, StoreResult};

const NAMESPACE: &str = "LocationCache";
const LOCATION_KEY: &str = "location";

#[derive(Clone)]
pub struct LocationCache {
    store: StoreConnection,
}

impl LocationCache {
    pub fn new(store: StoreConnection) -> Self {
        LocationCache { store }
    }

    pub fn save_location(&self, location: &str) -> StoreResult<()> {
        put_preference(&self.store, NAMESPACE, LOCATION_KEY, location)
    }

    /// The last saved address, if any
    pub fn location(&self) -> StoreResult<Option<String>> {
        get_preference(&self.store, NAMESPACE, LOCATION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::open_in_memory;

    #[test]
    fn test_empty_cache() {
        let cache = LocationCache::new(open_in_memory().unwrap());
        assert_eq!(cache.location().unwrap(), None);
    }

    #[test]
    fn test_save_replaces_previous() {
        let cache = LocationCache::new(open_in_memory().unwrap());
        cache.save_location("1 High St").unwrap();
        cache.save_location("2 Low Rd").unwrap();

        assert_eq!(cache.location().unwrap(), Some("2 Low Rd".to_string()));
    }

    #[test]
    fn test_clones_share_store() {
        let cache = LocationCache::new(open_in_memory().unwrap());
        let other = cache.clone();
        cache.save_location("Teesside").unwrap();

        assert_eq!(other.location().unwrap(), Some("Teesside".to_string()));
    }
}
