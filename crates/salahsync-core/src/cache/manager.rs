use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, de::IgnoredAny, Serialize};
use tracing::{debug, info, warn};

use super::entry::{CacheDomain, CacheEntry, CacheQuery, MosqueSearch, PrayerTimeParams, Validity};
use crate::error::CacheError;
use crate::models::{CacheFreshness, GeoPoint};
use crate::store::{read_json, write_json, KeyValueStore};
use crate::utils::format_age_minutes;

/// Key of the global last-sync marker.
pub const LAST_SYNC_KEY: &str = "last_sync";

/// Key of the coarse online/offline flag used for cold-start display.
pub const NETWORK_STATUS_KEY: &str = "network_status";

/// `needs_sync` turns true once the last sync is older than this.
const SYNC_INTERVAL_HOURS: i64 = 24;

/// `is_critically_outdated` turns true once the last sync is older than this.
const CRITICAL_SYNC_HOURS: i64 = 72;

/// Read-through/write-through cache over a [`KeyValueStore`].
///
/// Every public method is fail-open: store and serialization errors are
/// logged and turned into a miss, a no-op, or a default value. Clone is
/// cheap and clones share the same store.
#[derive(Clone)]
pub struct CacheManager {
    store: Arc<dyn KeyValueStore>,
}

impl CacheManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    async fn load<T: DeserializeOwned>(
        &self,
        domain: CacheDomain,
    ) -> Result<Option<CacheEntry<T>>, CacheError> {
        read_json(self.store(), domain.key()).await
    }

    async fn save<T: Serialize>(
        &self,
        domain: CacheDomain,
        payload: &T,
        location: Option<GeoPoint>,
        params: BTreeMap<String, String>,
    ) -> Result<usize, CacheError> {
        let entry = CacheEntry::new(payload, location, params);
        write_json(self.store(), domain.key(), &entry).await
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove(key).await?;
        Ok(())
    }

    /// Load the domain entry and apply its validity rules at `now`.
    /// Only age expiry deletes the entry.
    async fn lookup<T: DeserializeOwned>(
        &self,
        domain: CacheDomain,
        query: &CacheQuery,
        now: DateTime<Utc>,
    ) -> Result<Option<T>, CacheError> {
        let Some(entry) = self.load::<T>(domain).await? else {
            debug!(cache = domain.key(), "Cache miss: no entry");
            return Ok(None);
        };

        match entry.validate(domain, query, now) {
            Validity::Valid => {
                debug!(cache = domain.key(), "Cache hit");
                Ok(Some(entry.payload))
            }
            Validity::Expired { age } => {
                debug!(
                    cache = domain.key(),
                    age_minutes = age.num_minutes(),
                    "Cache entry expired, removing"
                );
                self.remove(domain.key()).await?;
                Ok(None)
            }
            other => {
                debug!(cache = domain.key(), reason = ?other, "Cache entry does not match query");
                Ok(None)
            }
        }
    }

    async fn put<T: Serialize>(
        &self,
        domain: CacheDomain,
        payload: &T,
        location: Option<GeoPoint>,
        params: BTreeMap<String, String>,
    ) {
        match self.save(domain, payload, location, params).await {
            Ok(bytes) => debug!(cache = domain.key(), bytes, "Cached entry"),
            Err(e) => warn!(cache = domain.key(), error = %e, "Failed to write cache entry"),
        }
    }

    async fn get<T: DeserializeOwned>(&self, domain: CacheDomain, query: CacheQuery) -> Option<T> {
        match self.lookup(domain, &query, Utc::now()).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(cache = domain.key(), error = %e, "Failed to read cache entry, treating as miss");
                None
            }
        }
    }

    /// Remove a domain's entry unconditionally.
    pub async fn clear(&self, domain: CacheDomain) {
        if let Err(e) = self.remove(domain.key()).await {
            warn!(cache = domain.key(), error = %e, "Failed to clear cache entry");
        }
    }

    // ===== Prayer Times =====

    pub async fn cache_prayer_times<T: Serialize>(
        &self,
        payload: &T,
        location: Option<GeoPoint>,
        params: Option<&PrayerTimeParams>,
    ) {
        let params = params.map(PrayerTimeParams::to_params).unwrap_or_default();
        self.put(CacheDomain::PrayerTimes, payload, location, params).await
    }

    pub async fn get_cached_prayer_times<T: DeserializeOwned>(&self) -> Option<T> {
        self.get(CacheDomain::PrayerTimes, CacheQuery::any()).await
    }

    pub async fn clear_prayer_times(&self) {
        self.clear(CacheDomain::PrayerTimes).await
    }

    // ===== Qibla Direction =====

    pub async fn cache_qibla_direction<T: Serialize>(&self, payload: &T, location: GeoPoint) {
        self.put(CacheDomain::QiblaDirection, payload, Some(location), BTreeMap::new())
            .await
    }

    pub async fn get_cached_qibla_direction<T: DeserializeOwned>(
        &self,
        location: GeoPoint,
    ) -> Option<T> {
        self.get(CacheDomain::QiblaDirection, CacheQuery::at(location))
            .await
    }

    pub async fn clear_qibla_direction(&self) {
        self.clear(CacheDomain::QiblaDirection).await
    }

    // ===== Islamic Calendar =====

    pub async fn cache_islamic_calendar<T: Serialize>(&self, payload: &T) {
        self.put(CacheDomain::IslamicCalendar, payload, None, BTreeMap::new())
            .await
    }

    pub async fn get_cached_islamic_calendar<T: DeserializeOwned>(&self) -> Option<T> {
        self.get(CacheDomain::IslamicCalendar, CacheQuery::any()).await
    }

    pub async fn clear_islamic_calendar(&self) {
        self.clear(CacheDomain::IslamicCalendar).await
    }

    // ===== Mosques =====

    pub async fn cache_mosques<T: Serialize>(
        &self,
        payload: &T,
        location: GeoPoint,
        search: &MosqueSearch,
    ) {
        if !search.is_valid() {
            warn!(radius = search.radius, "Not caching mosques for a non-finite radius");
            return;
        }
        self.put(CacheDomain::Mosques, payload, Some(location), search.to_params())
            .await
    }

    pub async fn get_cached_mosques<T: DeserializeOwned>(
        &self,
        location: GeoPoint,
        search: &MosqueSearch,
    ) -> Option<T> {
        if !search.is_valid() {
            debug!(radius = search.radius, "Mosque lookup with a non-finite radius");
            return None;
        }
        let query = CacheQuery::at(location).with_params(search.to_params());
        self.get(CacheDomain::Mosques, query).await
    }

    pub async fn clear_mosques(&self) {
        self.clear(CacheDomain::Mosques).await
    }

    // ===== User Preferences =====

    pub async fn cache_user_preferences<T: Serialize>(&self, payload: &T) {
        self.put(CacheDomain::UserPreferences, payload, None, BTreeMap::new())
            .await
    }

    pub async fn get_user_preferences<T: DeserializeOwned>(&self) -> Option<T> {
        self.get(CacheDomain::UserPreferences, CacheQuery::any()).await
    }

    pub async fn clear_user_preferences(&self) {
        self.clear(CacheDomain::UserPreferences).await
    }

    // ===== Last Sync =====

    async fn load_last_sync(&self) -> Result<Option<DateTime<Utc>>, CacheError> {
        let Some(raw) = self.store.get(LAST_SYNC_KEY).await? else {
            return Ok(None);
        };
        // Accept both a JSON string and a bare RFC 3339 value
        match serde_json::from_str::<DateTime<Utc>>(&raw) {
            Ok(at) => Ok(Some(at)),
            Err(e) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|at| Some(at.with_timezone(&Utc)))
                .map_err(|_| CacheError::serialization(LAST_SYNC_KEY, e)),
        }
    }

    /// Record that a synchronization just completed.
    pub async fn update_last_sync(&self) {
        let now = Utc::now();
        match write_json(self.store(), LAST_SYNC_KEY, &now).await {
            Ok(_) => info!(at = %now.to_rfc3339(), "Recorded last sync"),
            Err(e) => warn!(error = %e, "Failed to record last sync"),
        }
    }

    pub async fn get_last_sync(&self) -> Option<DateTime<Utc>> {
        match self.load_last_sync().await {
            Ok(at) => at,
            Err(e) => {
                warn!(error = %e, "Failed to read last sync marker");
                None
            }
        }
    }

    async fn last_sync_older_than(&self, hours: i64) -> bool {
        match self.get_last_sync().await {
            Some(at) => Utc::now() - at > Duration::hours(hours),
            None => true,
        }
    }

    /// True when no sync was recorded or the last one is over 24 hours old.
    pub async fn needs_sync(&self) -> bool {
        self.last_sync_older_than(SYNC_INTERVAL_HOURS).await
    }

    /// True when no sync was recorded or the last one is over 72 hours old.
    pub async fn is_critically_outdated(&self) -> bool {
        self.last_sync_older_than(CRITICAL_SYNC_HOURS).await
    }

    pub async fn get_cache_freshness(&self) -> CacheFreshness {
        CacheFreshness::classify(self.get_last_sync().await, Utc::now())
    }

    // ===== Network Status =====

    /// Persist the coarse online flag for display on the next cold start.
    pub async fn set_network_status(&self, online: bool) {
        let value = if online { "online" } else { "offline" };
        if let Err(e) = write_json(self.store(), NETWORK_STATUS_KEY, value).await {
            warn!(error = %e, "Failed to persist network status");
        }
    }

    pub async fn get_network_status(&self) -> Option<bool> {
        let raw = match self.store.get(NETWORK_STATUS_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read network status");
                return None;
            }
        };
        match raw.trim().trim_matches('"') {
            "online" => Some(true),
            "offline" => Some(false),
            other => {
                debug!(value = other, "Unrecognized persisted network status");
                None
            }
        }
    }

    // ===== Diagnostics =====

    async fn stored_size(&self, domain: CacheDomain) -> usize {
        match self.store.get(domain.key()).await {
            Ok(raw) => raw.map(|r| r.len()).unwrap_or(0),
            Err(e) => {
                debug!(cache = domain.key(), error = %e, "Failed to read cache for size");
                0
            }
        }
    }

    /// Byte size of every domain entry plus the last-sync marker.
    pub async fn get_cache_stats(&self) -> CacheStats {
        let sizes = futures::future::join_all(
            CacheDomain::ALL.iter().map(|&domain| self.stored_size(domain)),
        )
        .await;

        let sizes: BTreeMap<CacheDomain, usize> =
            CacheDomain::ALL.iter().copied().zip(sizes).collect();
        let total_size = sizes.values().sum();

        CacheStats {
            sizes,
            total_size,
            last_sync: self.get_last_sync().await,
        }
    }

    /// Helper to load an entry's age and log errors without failing
    async fn load_age(&self, domain: CacheDomain) -> Option<String> {
        match self.load::<IgnoredAny>(domain).await {
            Ok(Some(entry)) => Some(format_age_minutes(entry.age_minutes())),
            Ok(None) => None,
            Err(e) => {
                debug!(cache = domain.key(), error = %e, "Failed to load cache for age display");
                None
            }
        }
    }

    pub async fn get_cache_ages(&self) -> CacheAges {
        CacheAges {
            prayer_times: self.load_age(CacheDomain::PrayerTimes).await,
            qibla_direction: self.load_age(CacheDomain::QiblaDirection).await,
            islamic_calendar: self.load_age(CacheDomain::IslamicCalendar).await,
            mosques: self.load_age(CacheDomain::Mosques).await,
            user_preferences: self.load_age(CacheDomain::UserPreferences).await,
        }
    }

    /// Remove every domain entry and the last-sync marker.
    pub async fn clear_all_cache(&self) {
        let keys = CacheDomain::ALL
            .iter()
            .map(|d| d.key())
            .chain(std::iter::once(LAST_SYNC_KEY));

        let results = futures::future::join_all(keys.map(|key| async move {
            (key, self.remove(key).await)
        }))
        .await;

        for (key, result) in results {
            if let Err(e) = result {
                warn!(cache = key, error = %e, "Failed to clear cache entry");
            }
        }
        info!("Cleared all cached data");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub sizes: BTreeMap<CacheDomain, usize>,
    pub total_size: usize,
    pub last_sync: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheAges {
    pub prayer_times: Option<String>,
    pub qibla_direction: Option<String>,
    pub islamic_calendar: Option<String>,
    pub mosques: Option<String>,
    pub user_preferences: Option<String>,
}

impl CacheAges {
    pub fn get(&self, domain: CacheDomain) -> Option<&str> {
        let age = match domain {
            CacheDomain::PrayerTimes => &self.prayer_times,
            CacheDomain::QiblaDirection => &self.qibla_direction,
            CacheDomain::IslamicCalendar => &self.islamic_calendar,
            CacheDomain::Mosques => &self.mosques,
            CacheDomain::UserPreferences => &self.user_preferences,
        };
        age.as_deref()
    }

    pub fn display(&self, domain: CacheDomain) -> String {
        self.get(domain).unwrap_or("never").to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FreshnessStatus;
    use crate::store::MemoryStore;
    use serde::Deserialize;
    use serde_json::json;

    const KAABA: GeoPoint = GeoPoint {
        latitude: 21.4225,
        longitude: 39.8262,
    };

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Qibla {
        bearing: f64,
        distance_km: f64,
    }

    fn setup() -> (Arc<MemoryStore>, CacheManager) {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheManager::new(store.clone());
        (store, cache)
    }

    /// Write an entry directly with a backdated `cachedAt`.
    async fn seed(
        store: &MemoryStore,
        domain: CacheDomain,
        payload: serde_json::Value,
        location: Option<GeoPoint>,
        params: BTreeMap<String, String>,
        age: Duration,
    ) {
        let mut entry = CacheEntry::new(payload, location, params);
        entry.cached_at = Utc::now() - age;
        write_json(store, domain.key(), &entry).await.unwrap();
    }

    async fn seed_last_sync(store: &MemoryStore, age: Duration) {
        write_json(store, LAST_SYNC_KEY, &(Utc::now() - age)).await.unwrap();
    }

    #[tokio::test]
    async fn test_prayer_times_write_then_read() {
        let (store, cache) = setup();
        let params = PrayerTimeParams {
            method: "UmmAlQura".to_string(),
            madhab: "Hanafi".to_string(),
        };
        cache
            .cache_prayer_times(&json!({"fajr": "05:12"}), Some(KAABA), Some(&params))
            .await;

        let hit: Option<serde_json::Value> = cache.get_cached_prayer_times().await;
        assert_eq!(hit, Some(json!({"fajr": "05:12"})));

        let raw: serde_json::Value =
            serde_json::from_str(&store.get(CacheDomain::PrayerTimes.key()).await.unwrap().unwrap())
                .unwrap();
        assert_eq!(raw["domainParams"]["method"], "UmmAlQura");
    }

    #[tokio::test]
    async fn test_expired_prayer_times_are_removed() {
        let (store, cache) = setup();
        seed(
            &store,
            CacheDomain::PrayerTimes,
            json!([1, 2, 3]),
            None,
            BTreeMap::new(),
            Duration::hours(25),
        )
        .await;

        let hit: Option<serde_json::Value> = cache.get_cached_prayer_times().await;
        assert!(hit.is_none());
        assert!(!store.contains(CacheDomain::PrayerTimes.key()));
    }

    #[tokio::test]
    async fn test_calendar_survives_until_thirty_days() {
        let (store, cache) = setup();
        seed(
            &store,
            CacheDomain::IslamicCalendar,
            json!({"month": "Ramadan"}),
            None,
            BTreeMap::new(),
            Duration::days(29),
        )
        .await;
        let hit: Option<serde_json::Value> = cache.get_cached_islamic_calendar().await;
        assert!(hit.is_some());

        seed(
            &store,
            CacheDomain::IslamicCalendar,
            json!({"month": "Ramadan"}),
            None,
            BTreeMap::new(),
            Duration::days(31),
        )
        .await;
        let hit: Option<serde_json::Value> = cache.get_cached_islamic_calendar().await;
        assert!(hit.is_none());
        assert!(!store.contains(CacheDomain::IslamicCalendar.key()));
    }

    #[tokio::test]
    async fn test_qibla_distance_miss_keeps_entry() {
        let (store, cache) = setup();
        let qibla = Qibla {
            bearing: 0.0,
            distance_km: 0.0,
        };
        cache.cache_qibla_direction(&qibla, KAABA).await;

        let far = GeoPoint::new(KAABA.latitude + 0.0135, KAABA.longitude);
        let miss: Option<Qibla> = cache.get_cached_qibla_direction(far).await;
        assert!(miss.is_none());
        assert!(store.contains(CacheDomain::QiblaDirection.key()));

        let near = GeoPoint::new(KAABA.latitude + 0.0045, KAABA.longitude);
        let hit: Option<Qibla> = cache.get_cached_qibla_direction(near).await;
        assert_eq!(hit, Some(qibla));
    }

    #[tokio::test]
    async fn test_mosque_radius_mismatch_keeps_entry() {
        let (store, cache) = setup();
        cache
            .cache_mosques(&json!(["Masjid al-Haram"]), KAABA, &MosqueSearch::new(5.0, None))
            .await;

        let miss: Option<serde_json::Value> = cache
            .get_cached_mosques(KAABA, &MosqueSearch::new(10.0, None))
            .await;
        assert!(miss.is_none());
        assert!(store.contains(CacheDomain::Mosques.key()));

        let hit: Option<serde_json::Value> = cache
            .get_cached_mosques(KAABA, &MosqueSearch::new(5.0, None))
            .await;
        assert!(hit.is_some());
    }

    #[tokio::test]
    async fn test_mosques_non_finite_radius_never_matches() {
        let (store, cache) = setup();
        cache
            .cache_mosques(&json!(["Masjid al-Haram"]), KAABA, &MosqueSearch::new(5.0, None))
            .await;

        let miss: Option<serde_json::Value> = cache
            .get_cached_mosques(KAABA, &MosqueSearch::new(f64::NAN, None))
            .await;
        assert!(miss.is_none());
        assert!(store.contains(CacheDomain::Mosques.key()));

        // A NaN search is not written over the existing entry
        cache
            .cache_mosques(&json!([]), KAABA, &MosqueSearch::new(f64::NAN, None))
            .await;
        let still: Option<serde_json::Value> = cache
            .get_cached_mosques(KAABA, &MosqueSearch::new(5.0, None))
            .await;
        assert_eq!(still, Some(json!(["Masjid al-Haram"])));
        assert!(cache
            .get_cached_mosques::<serde_json::Value>(KAABA, &MosqueSearch::new(f64::INFINITY, None))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_mosques_expire_after_two_hours() {
        let (store, cache) = setup();
        let search = MosqueSearch::new(5.0, Some("haram"));
        seed(
            &store,
            CacheDomain::Mosques,
            json!([]),
            Some(KAABA),
            search.to_params(),
            Duration::minutes(121),
        )
        .await;

        let hit: Option<serde_json::Value> = cache.get_cached_mosques(KAABA, &search).await;
        assert!(hit.is_none());
        assert!(!store.contains(CacheDomain::Mosques.key()));
    }

    #[tokio::test]
    async fn test_malformed_entry_is_a_miss() {
        let (store, cache) = setup();
        store
            .set(CacheDomain::IslamicCalendar.key(), "{\"payload\":")
            .await
            .unwrap();
        let hit: Option<serde_json::Value> = cache.get_cached_islamic_calendar().await;
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn test_failing_store_is_fail_open() {
        let (store, cache) = setup();
        store.set_failing(true);

        cache.cache_islamic_calendar(&json!({"day": 1})).await;
        let hit: Option<serde_json::Value> = cache.get_cached_islamic_calendar().await;
        assert!(hit.is_none());

        cache.update_last_sync().await;
        assert!(cache.get_last_sync().await.is_none());
        assert!(cache.needs_sync().await);
        assert_eq!(cache.get_cache_freshness().await.status, FreshnessStatus::Critical);
        assert_eq!(cache.get_cache_stats().await.total_size, 0);
        cache.clear_all_cache().await;
    }

    #[tokio::test]
    async fn test_user_preferences_do_not_expire() {
        let (store, cache) = setup();
        seed(
            &store,
            CacheDomain::UserPreferences,
            json!({"language": "ar"}),
            None,
            BTreeMap::new(),
            Duration::days(365),
        )
        .await;
        let prefs: Option<serde_json::Value> = cache.get_user_preferences().await;
        assert_eq!(prefs, Some(json!({"language": "ar"})));

        cache.clear_user_preferences().await;
        let prefs: Option<serde_json::Value> = cache.get_user_preferences().await;
        assert!(prefs.is_none());
    }

    #[tokio::test]
    async fn test_last_sync_thresholds() {
        let (store, cache) = setup();
        assert!(cache.get_last_sync().await.is_none());
        assert!(cache.needs_sync().await);
        assert!(cache.is_critically_outdated().await);

        cache.update_last_sync().await;
        assert!(cache.get_last_sync().await.is_some());
        assert!(!cache.needs_sync().await);
        assert!(!cache.is_critically_outdated().await);

        seed_last_sync(&store, Duration::hours(30)).await;
        assert!(cache.needs_sync().await);
        assert!(!cache.is_critically_outdated().await);

        seed_last_sync(&store, Duration::hours(73)).await;
        assert!(cache.is_critically_outdated().await);
    }

    #[tokio::test]
    async fn test_last_sync_accepts_bare_timestamp() {
        let (store, cache) = setup();
        store
            .set(LAST_SYNC_KEY, "2024-03-10T04:30:00Z")
            .await
            .unwrap();
        let at = cache.get_last_sync().await.unwrap();
        assert_eq!(at.to_rfc3339(), "2024-03-10T04:30:00+00:00");
    }

    #[tokio::test]
    async fn test_freshness_from_marker() {
        let (store, cache) = setup();
        let never = cache.get_cache_freshness().await;
        assert_eq!(never.status, FreshnessStatus::Critical);
        assert!(never.critically_outdated && never.should_prompt_refresh);

        seed_last_sync(&store, Duration::hours(30)).await;
        let freshness = cache.get_cache_freshness().await;
        assert_eq!(freshness.status, FreshnessStatus::Outdated);
        assert!(freshness.should_prompt_refresh);
        assert!(!freshness.critically_outdated);
    }

    #[tokio::test]
    async fn test_network_status_flag() {
        let (store, cache) = setup();
        assert_eq!(cache.get_network_status().await, None);

        cache.set_network_status(true).await;
        assert_eq!(cache.get_network_status().await, Some(true));
        cache.set_network_status(false).await;
        assert_eq!(cache.get_network_status().await, Some(false));

        store.set(NETWORK_STATUS_KEY, "online").await.unwrap();
        assert_eq!(cache.get_network_status().await, Some(true));
    }

    #[tokio::test]
    async fn test_cache_stats_and_ages() {
        let (_store, cache) = setup();
        cache.cache_islamic_calendar(&json!({"day": 1})).await;
        cache.update_last_sync().await;

        let stats = cache.get_cache_stats().await;
        assert_eq!(stats.sizes.len(), CacheDomain::ALL.len());
        assert!(stats.sizes[&CacheDomain::IslamicCalendar] > 0);
        assert_eq!(stats.sizes[&CacheDomain::Mosques], 0);
        assert_eq!(stats.total_size, stats.sizes[&CacheDomain::IslamicCalendar]);
        assert!(stats.last_sync.is_some());

        let ages = cache.get_cache_ages().await;
        assert_eq!(ages.get(CacheDomain::IslamicCalendar), Some("just now"));
        assert_eq!(ages.display(CacheDomain::Mosques), "never");
    }

    #[tokio::test]
    async fn test_clear_all_cache() {
        let (store, cache) = setup();
        cache.cache_islamic_calendar(&json!(1)).await;
        cache.cache_qibla_direction(&json!(2), KAABA).await;
        cache.cache_user_preferences(&json!(3)).await;
        cache.update_last_sync().await;
        cache.set_network_status(true).await;

        cache.clear_all_cache().await;

        for domain in CacheDomain::ALL {
            assert!(!store.contains(domain.key()));
        }
        assert!(!store.contains(LAST_SYNC_KEY));
        // Platform state is not cache data
        assert!(store.contains(NETWORK_STATUS_KEY));
    }
}
