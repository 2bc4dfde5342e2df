//! Value types shared across the cache, network and refresh layers.
//!
//! - `GeoPoint`: a coordinate with haversine distance
//! - `NetworkStatus`, `ConnectionType`, `ConnectionInfo`: connectivity state
//! - `CacheFreshness`, `FreshnessStatus`: staleness tiers since the last sync
//! - `RefreshPreferences`, `PromptFrequency`, `DismissalKind`: prompt throttling

pub mod freshness;
pub mod geo;
pub mod network;
pub mod preferences;

pub use freshness::{CacheFreshness, FreshnessStatus};
pub use geo::GeoPoint;
pub use network::{ConnectionInfo, ConnectionType, NetworkStatus};
pub use preferences::{DismissalKind, PromptFrequency, RefreshPreferences};
