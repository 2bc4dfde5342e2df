//! Offline cache for prayer-assistant domain data.
//!
//! This module provides the `CacheManager`, which persists one entry per
//! domain in a [`KeyValueStore`](crate::store::KeyValueStore) and decides on
//! every read whether the entry is still usable. Each domain has a fixed
//! TTL, and the location-keyed domains also have a spatial tolerance:
//!
//! - Prayer times: 24 hours
//! - Qibla direction: 7 days, within 1 km
//! - Islamic calendar: 30 days
//! - Mosque search results: 2 hours, within 2 km, same radius and query
//! - User preferences: never expire
//!
//! Only age expiry deletes an entry. A location or parameter mismatch is a
//! plain miss, so a later query closer to the stored point can still hit.
//!
//! The manager also owns the global last-sync marker that freshness tiers
//! and refresh prompts are derived from.

pub mod entry;
pub mod manager;

pub use entry::{CacheDomain, CacheEntry, CacheQuery, MosqueSearch, PrayerTimeParams, Validity};
pub use manager::{CacheAges, CacheManager, CacheStats};
