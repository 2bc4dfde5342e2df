use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Below this many hours since the last sync, data is fresh.
pub const STALE_AFTER_HOURS: f64 = 6.0;

/// From here on the UI should suggest a refresh.
pub const OUTDATED_AFTER_HOURS: f64 = 24.0;

/// From here on the data is critically outdated.
pub const CRITICAL_AFTER_HOURS: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum FreshnessStatus {
    Fresh,
    Stale,
    Outdated,
    Critical,
}

impl FreshnessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessStatus::Fresh => "fresh",
            FreshnessStatus::Stale => "stale",
            FreshnessStatus::Outdated => "outdated",
            FreshnessStatus::Critical => "critical",
        }
    }
}

/// Staleness snapshot derived from the global last-sync marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CacheFreshness {
    pub status: FreshnessStatus,
    pub last_sync: Option<DateTime<Utc>>,
    /// `f64::INFINITY` when no sync was ever recorded.
    pub hours_old: f64,
    pub should_prompt_refresh: bool,
    pub critically_outdated: bool,
}

impl CacheFreshness {
    /// Classify the time elapsed between `last_sync` and `now`.
    ///
    /// Tiers are half-open: `[0, 6)` fresh, `[6, 24)` stale, `[24, 72)`
    /// outdated, `[72, ∞]` critical. A marker in the future counts as zero.
    pub fn classify(last_sync: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let hours_old = match last_sync {
            Some(at) => ((now - at).num_milliseconds() as f64 / 3_600_000.0).max(0.0),
            None => f64::INFINITY,
        };

        let status = if hours_old < STALE_AFTER_HOURS {
            FreshnessStatus::Fresh
        } else if hours_old < OUTDATED_AFTER_HOURS {
            FreshnessStatus::Stale
        } else if hours_old < CRITICAL_AFTER_HOURS {
            FreshnessStatus::Outdated
        } else {
            FreshnessStatus::Critical
        };

        let critically_outdated = status == FreshnessStatus::Critical;
        let should_prompt_refresh =
            critically_outdated || status == FreshnessStatus::Outdated;

        Self {
            status,
            last_sync,
            hours_old,
            should_prompt_refresh,
            critically_outdated,
        }
    }

    /// The snapshot reported when no sync has ever completed.
    pub fn never_synced() -> Self {
        Self::classify(None, Utc::now())
    }
}

impl Default for CacheFreshness {
    fn default() -> Self {
        Self::never_synced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at_age(age: Duration) -> CacheFreshness {
        let now = Utc::now();
        CacheFreshness::classify(Some(now - age), now)
    }

    #[test]
    fn test_never_synced_is_critical() {
        let freshness = CacheFreshness::never_synced();
        assert_eq!(freshness.status, FreshnessStatus::Critical);
        assert!(freshness.hours_old.is_infinite());
        assert!(freshness.critically_outdated);
        assert!(freshness.should_prompt_refresh);
        assert!(freshness.last_sync.is_none());
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(at_age(Duration::zero()).status, FreshnessStatus::Fresh);
        assert_eq!(
            at_age(Duration::hours(6) - Duration::seconds(1)).status,
            FreshnessStatus::Fresh
        );
        assert_eq!(at_age(Duration::hours(6)).status, FreshnessStatus::Stale);
        assert_eq!(at_age(Duration::hours(24)).status, FreshnessStatus::Outdated);
        assert_eq!(at_age(Duration::hours(72)).status, FreshnessStatus::Critical);
    }

    #[test]
    fn test_prompt_flags_per_tier() {
        let stale = at_age(Duration::hours(12));
        assert!(!stale.should_prompt_refresh);
        assert!(!stale.critically_outdated);

        let outdated = at_age(Duration::hours(30));
        assert!(outdated.should_prompt_refresh);
        assert!(!outdated.critically_outdated);

        let critical = at_age(Duration::days(5));
        assert!(critical.should_prompt_refresh);
        assert!(critical.critically_outdated);
    }

    #[test]
    fn test_hours_old_is_fractional() {
        let freshness = at_age(Duration::minutes(90));
        assert!((freshness.hours_old - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_future_marker_counts_as_fresh() {
        let now = Utc::now();
        let freshness = CacheFreshness::classify(Some(now + Duration::hours(2)), now);
        assert_eq!(freshness.status, FreshnessStatus::Fresh);
        assert_eq!(freshness.hours_old, 0.0);
    }
}
