//! SalahSync core - offline cache and synchronization for a prayer assistant.
//!
//! This crate keeps prayer times, Qibla direction, Islamic calendar data,
//! mosque search results and user preferences available offline, tracks
//! connectivity, and decides when the UI should suggest a refresh.
//!
//! - [`cache`]: per-domain entries with TTL and spatial/parameter validity
//! - [`network`]: online/offline monitor with a confirming probe
//! - [`refresh`]: freshness-driven refresh prompts and their dismissal
//! - [`store`]: the key-value storage seam the cache is built on
//!
//! Nothing here returns an error to the UI. Store and network failures are
//! logged and degrade to a miss, a no-op, or "offline".

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod refresh;
pub mod store;
pub mod utils;

pub use cache::{CacheDomain, CacheManager, MosqueSearch, PrayerTimeParams};
pub use config::Config;
pub use error::{CacheError, ProbeError, StoreError};
pub use models::{
    CacheFreshness, ConnectionType, DismissalKind, FreshnessStatus, GeoPoint, NetworkStatus,
    PromptFrequency, RefreshPreferences,
};
pub use network::{HttpProbe, NetworkMonitor, PlatformSignal};
pub use refresh::{PromptScheduler, RefreshPolicy};
pub use store::{FileStore, KeyValueStore, MemoryStore};
