use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::probe::ConnectivityProbe;
use crate::cache::CacheManager;
use crate::models::{ConnectionInfo, NetworkStatus};

/// Delay between a platform "online" event and the confirming probe.
pub const DEFAULT_ONLINE_DEBOUNCE: Duration = Duration::from_secs(1);

/// Callback invoked with the current status on every change.
pub type Listener = Arc<dyn Fn(&NetworkStatus) + Send + Sync>;

/// Optional platform capability reporting connection quality.
pub trait ConnectionInfoSource: Send + Sync {
    fn current(&self) -> Option<ConnectionInfo>;
}

/// Raw connectivity events delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSignal {
    Online,
    Offline,
    ConnectionChanged,
}

struct MonitorState {
    status: NetworkStatus,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

struct Inner {
    cache: CacheManager,
    probe: Arc<dyn ConnectivityProbe>,
    connection_info: Option<Arc<dyn ConnectionInfoSource>>,
    debounce: Duration,
    state: Mutex<MonitorState>,
    /// Held while a status change is applied and delivered, so listeners
    /// see changes in the order they were stored.
    delivery: Mutex<()>,
    persist: tokio::sync::Mutex<()>,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, MonitorState> {
        // Listeners never run under the state lock, so a poisoned lock still
        // holds consistent state
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn delivery(&self) -> MutexGuard<'_, ()> {
        self.delivery.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct NetworkMonitorBuilder {
    cache: CacheManager,
    probe: Arc<dyn ConnectivityProbe>,
    connection_info: Option<Arc<dyn ConnectionInfoSource>>,
    debounce: Duration,
    initially_online: bool,
}

impl NetworkMonitorBuilder {
    pub fn connection_info(mut self, source: Arc<dyn ConnectionInfoSource>) -> Self {
        self.connection_info = Some(source);
        self
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// The platform's online flag at startup. Defaults to offline.
    pub fn initially_online(mut self, online: bool) -> Self {
        self.initially_online = online;
        self
    }

    pub fn build(self) -> NetworkMonitor {
        let info = self.connection_info.as_ref().and_then(|source| source.current());
        let status = NetworkStatus::from_parts(self.initially_online, info.as_ref());

        NetworkMonitor {
            inner: Arc::new(Inner {
                cache: self.cache,
                probe: self.probe,
                connection_info: self.connection_info,
                debounce: self.debounce,
                state: Mutex::new(MonitorState {
                    status,
                    listeners: Vec::new(),
                    next_listener_id: 0,
                }),
                delivery: Mutex::new(()),
                persist: tokio::sync::Mutex::new(()),
            }),
        }
    }
}

/// Process-wide connectivity context.
///
/// Owns the current [`NetworkStatus`] and the listener list. Pass a clone to
/// whatever needs it; clones share state.
///
/// Listeners run synchronously and one change at a time. They may read the
/// status or unsubscribe, but must not add listeners or drive transitions.
#[derive(Clone)]
pub struct NetworkMonitor {
    inner: Arc<Inner>,
}

impl NetworkMonitor {
    pub fn builder(cache: CacheManager, probe: Arc<dyn ConnectivityProbe>) -> NetworkMonitorBuilder {
        NetworkMonitorBuilder {
            cache,
            probe,
            connection_info: None,
            debounce: DEFAULT_ONLINE_DEBOUNCE,
            initially_online: false,
        }
    }

    pub fn status(&self) -> NetworkStatus {
        self.inner.state().status
    }

    pub fn is_online(&self) -> bool {
        self.status().is_online
    }

    /// Register a listener. It is called right away with the current status
    /// and then once per actual change.
    pub fn add_listener<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&NetworkStatus) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(callback);
        let _delivery = self.inner.delivery();
        let (id, status) = {
            let mut state = self.inner.state();
            let id = state.next_listener_id;
            state.next_listener_id += 1;
            state.listeners.push((id, listener.clone()));
            (id, state.status)
        };

        Self::invoke(id, &listener, &status);

        Subscription {
            id,
            monitor: Arc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.state().listeners.len()
    }

    fn invoke(id: u64, listener: &Listener, status: &NetworkStatus) {
        if catch_unwind(AssertUnwindSafe(|| listener(status))).is_err() {
            error!(listener_id = id, "Network listener panicked");
        }
    }

    fn read_status(&self, online: bool) -> NetworkStatus {
        let info = self
            .inner
            .connection_info
            .as_ref()
            .and_then(|source| source.current());
        NetworkStatus::from_parts(online, info.as_ref())
    }

    /// Replace the status and notify listeners in registration order.
    /// Returns false, without notifying, when nothing changed.
    fn set_status(&self, status: NetworkStatus) -> bool {
        let _delivery = self.inner.delivery();
        let listeners = {
            let mut state = self.inner.state();
            if state.status == status {
                return false;
            }
            state.status = status;
            state.listeners.clone()
        };

        debug!(
            online = status.is_online,
            connection = status.connection_type.as_str(),
            slow = status.is_slow_connection,
            listeners = listeners.len(),
            "Network status changed"
        );
        for (id, listener) in &listeners {
            Self::invoke(*id, listener, &status);
        }
        true
    }

    async fn mark_online(&self) {
        self.set_status(self.read_status(true));
        self.persist_status().await;
    }

    async fn mark_offline(&self) {
        self.set_status(self.read_status(false));
        self.persist_status().await;
    }

    // Writes are serialized and read the status under the lock, so the last
    // write always carries the latest transition
    async fn persist_status(&self) {
        let _persist = self.inner.persist.lock().await;
        self.inner.cache.set_network_status(self.is_online()).await;
    }

    async fn probe(&self) -> bool {
        match self.inner.probe.probe().await {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Connectivity probe failed");
                false
            }
        }
    }

    /// Platform reported connectivity. Debounce, confirm with a probe, and
    /// on success record a sync and go online. On failure the status is
    /// left as it was.
    pub async fn handle_online_signal(&self) -> bool {
        debug!("Platform reported online, verifying");
        if !self.inner.debounce.is_zero() {
            tokio::time::sleep(self.inner.debounce).await;
        }

        if !self.probe().await {
            warn!("Online signal not confirmed by connectivity probe");
            return false;
        }

        // Record the sync before announcing, so listeners see fresh data
        self.inner.cache.update_last_sync().await;
        self.mark_online().await;
        info!("Connectivity confirmed, back online");
        true
    }

    /// Platform reported loss of connectivity. No probe.
    pub async fn handle_offline_signal(&self) {
        self.mark_offline().await;
        info!("Platform reported offline");
    }

    /// Connection quality changed without an online/offline transition.
    pub fn handle_connection_change(&self) -> bool {
        let online = self.is_online();
        self.set_status(self.read_status(online))
    }

    /// Probe now, outside the event flow, and update the status to match.
    pub async fn test_connectivity(&self) -> bool {
        if self.probe().await {
            self.mark_online().await;
            true
        } else {
            self.mark_offline().await;
            false
        }
    }

    /// Re-verify connectivity and record a sync marker. Refetching domain
    /// data is up to the caller.
    pub async fn sync_when_online(&self) -> bool {
        if !self.is_online() {
            debug!("Skipping sync while offline");
            return false;
        }
        if !self.test_connectivity().await {
            return false;
        }
        self.inner.cache.update_last_sync().await;
        true
    }

    /// Drive the monitor from a channel of platform signals. Every online
    /// signal gets its own probe task; in-flight probes are not coalesced.
    pub fn spawn_signal_loop(&self, mut signals: mpsc::Receiver<PlatformSignal>) -> JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move {
            while let Some(signal) = signals.recv().await {
                match signal {
                    PlatformSignal::Online => {
                        let monitor = monitor.clone();
                        tokio::spawn(async move {
                            monitor.handle_online_signal().await;
                        });
                    }
                    PlatformSignal::Offline => monitor.handle_offline_signal().await,
                    PlatformSignal::ConnectionChanged => {
                        monitor.handle_connection_change();
                    }
                }
            }
            debug!("Platform signal channel closed");
        })
    }
}

/// Handle returned by [`NetworkMonitor::add_listener`].
#[must_use = "dropping a Subscription keeps the listener registered; call unsubscribe() to remove it"]
pub struct Subscription {
    id: u64,
    monitor: Weak<Inner>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn unsubscribe(self) {
        if let Some(inner) = self.monitor.upgrade() {
            inner.state().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
