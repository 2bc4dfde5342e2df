//! Connectivity tracking.
//!
//! This module provides:
//! - `NetworkMonitor`: the process-wide status context with subscribe/unsubscribe
//! - `ConnectivityProbe` / `HttpProbe`: confirms that "online" really means online
//!
//! The monitor has two steady states, online and offline. Moving to online
//! goes through a short verifying step: debounce, then probe. Moving to
//! offline is immediate.

pub mod monitor;
pub mod probe;

pub use monitor::{
    ConnectionInfoSource, Listener, NetworkMonitor, NetworkMonitorBuilder, PlatformSignal,
    Subscription,
};
pub use probe::{ConnectivityProbe, HttpProbe};
