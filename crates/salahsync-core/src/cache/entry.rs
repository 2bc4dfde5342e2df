use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

const PARAM_METHOD: &str = "method";
const PARAM_MADHAB: &str = "madhab";
const PARAM_RADIUS: &str = "radius";
const PARAM_QUERY: &str = "query";

/// The fixed set of cached domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheDomain {
    PrayerTimes,
    QiblaDirection,
    IslamicCalendar,
    Mosques,
    UserPreferences,
}

impl CacheDomain {
    pub const ALL: [CacheDomain; 5] = [
        CacheDomain::PrayerTimes,
        CacheDomain::QiblaDirection,
        CacheDomain::IslamicCalendar,
        CacheDomain::Mosques,
        CacheDomain::UserPreferences,
    ];

    /// Storage key for this domain's single entry.
    pub fn key(&self) -> &'static str {
        match self {
            CacheDomain::PrayerTimes => "cached_prayer_times",
            CacheDomain::QiblaDirection => "cached_qibla_direction",
            CacheDomain::IslamicCalendar => "cached_islamic_calendar",
            CacheDomain::Mosques => "cached_mosques",
            CacheDomain::UserPreferences => "user_preferences",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CacheDomain::PrayerTimes => "prayer times",
            CacheDomain::QiblaDirection => "qibla direction",
            CacheDomain::IslamicCalendar => "islamic calendar",
            CacheDomain::Mosques => "mosques",
            CacheDomain::UserPreferences => "user preferences",
        }
    }

    /// Maximum age before an entry is discarded. `None` never expires.
    pub fn ttl(&self) -> Option<Duration> {
        match self {
            CacheDomain::PrayerTimes => Some(Duration::hours(24)),
            CacheDomain::QiblaDirection => Some(Duration::days(7)),
            CacheDomain::IslamicCalendar => Some(Duration::days(30)),
            CacheDomain::Mosques => Some(Duration::hours(2)),
            CacheDomain::UserPreferences => None,
        }
    }

    /// Maximum distance between stored and queried location, for
    /// location-keyed domains.
    pub fn spatial_tolerance_km(&self) -> Option<f64> {
        match self {
            CacheDomain::QiblaDirection => Some(1.0),
            CacheDomain::Mosques => Some(2.0),
            _ => None,
        }
    }

    /// Parameters that must match exactly, absent on both sides included.
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            CacheDomain::Mosques => &[PARAM_RADIUS, PARAM_QUERY],
            _ => &[],
        }
    }
}

impl fmt::Display for CacheDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CacheDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "prayer-times" | "prayers" => Ok(CacheDomain::PrayerTimes),
            "qibla" | "qibla-direction" => Ok(CacheDomain::QiblaDirection),
            "calendar" | "islamic-calendar" => Ok(CacheDomain::IslamicCalendar),
            "mosques" => Ok(CacheDomain::Mosques),
            "preferences" | "user-preferences" => Ok(CacheDomain::UserPreferences),
            other => Err(format!("unknown cache domain: {}", other)),
        }
    }
}

/// Prayer-time calculation settings stored alongside the payload.
/// Recorded for reference only; reads do not compare them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerTimeParams {
    pub method: String,
    pub madhab: String,
}

impl PrayerTimeParams {
    pub fn to_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (PARAM_METHOD.to_string(), self.method.clone()),
            (PARAM_MADHAB.to_string(), self.madhab.clone()),
        ])
    }
}

/// Mosque search parameters. An empty query is the same as no query.
#[derive(Debug, Clone, PartialEq)]
pub struct MosqueSearch {
    pub radius: f64,
    pub query: Option<String>,
}

impl MosqueSearch {
    pub fn new(radius: f64, query: Option<&str>) -> Self {
        Self {
            radius,
            query: query.map(str::to_string),
        }
    }

    /// A NaN or infinite radius can never be matched against an entry.
    pub fn is_valid(&self) -> bool {
        self.radius.is_finite()
    }

    pub fn to_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert(PARAM_RADIUS.to_string(), self.radius.to_string());
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            params.insert(PARAM_QUERY.to_string(), query.to_string());
        }
        params
    }
}

/// One persisted cache entry. Serialized as camelCase JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    pub payload: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    pub cached_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub domain_params: BTreeMap<String, String>,
}

/// What a read is asking for: where, and with which domain parameters.
#[derive(Debug, Clone, Default)]
pub struct CacheQuery {
    pub location: Option<GeoPoint>,
    pub params: BTreeMap<String, String>,
}

impl CacheQuery {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn at(location: GeoPoint) -> Self {
        Self {
            location: Some(location),
            params: BTreeMap::new(),
        }
    }

    pub fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = params;
        self
    }
}

/// Outcome of checking an entry against a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Validity {
    Valid,
    Expired { age: Duration },
    OutOfRange { distance_km: f64 },
    MissingLocation,
    ParamsMismatch { param: &'static str },
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

impl<T> CacheEntry<T> {
    pub fn new(
        payload: T,
        location: Option<GeoPoint>,
        domain_params: BTreeMap<String, String>,
    ) -> Self {
        Self {
            payload,
            location,
            cached_at: Utc::now(),
            domain_params,
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.cached_at
    }

    pub fn age_minutes(&self) -> i64 {
        self.age(Utc::now()).num_minutes()
    }

    /// Check the entry against `domain`'s rules. Age is checked first so an
    /// expired entry always reports `Expired`, whatever else is wrong with it.
    pub fn validate(&self, domain: CacheDomain, query: &CacheQuery, now: DateTime<Utc>) -> Validity {
        if let Some(ttl) = domain.ttl() {
            let age = self.age(now);
            if age > ttl {
                return Validity::Expired { age };
            }
        }

        if let Some(tolerance) = domain.spatial_tolerance_km() {
            let (Some(stored), Some(wanted)) = (self.location, query.location) else {
                return Validity::MissingLocation;
            };
            let distance_km = stored.distance_km(&wanted);
            // NaN compares false against the tolerance
            if !distance_km.is_finite() || distance_km > tolerance {
                return Validity::OutOfRange { distance_km };
            }
        }

        for &param in domain.required_params() {
            if self.domain_params.get(param) != query.params.get(param) {
                return Validity::ParamsMismatch { param };
            }
        }

        Validity::Valid
    }
}
