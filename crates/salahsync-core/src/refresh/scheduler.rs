use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::RefreshPolicy;
use crate::models::NetworkStatus;
use crate::network::{NetworkMonitor, Subscription};

/// Periodic re-evaluation while the prompt is mounted.
pub const DEFAULT_RECHECK_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Floor for the recheck timer; `interval_at` rejects a zero period.
const MIN_RECHECK_INTERVAL: Duration = Duration::from_secs(1);

enum Trigger {
    Status(NetworkStatus),
    Recheck,
}

/// Keeps the "show refresh prompt" decision current for the UI.
///
/// The decision is published on a `watch` channel. It is re-evaluated when
/// the scheduler starts, on every network status change, on a fixed timer,
/// and on [`recheck`](Self::recheck). Going offline publishes `false`
/// straight away, and `true` is only published while the monitor is online.
pub struct PromptScheduler {
    decision: watch::Receiver<bool>,
    triggers: mpsc::UnboundedSender<Trigger>,
    subscription: Subscription,
    handle: JoinHandle<()>,
}

impl PromptScheduler {
    pub fn spawn(policy: RefreshPolicy, monitor: &NetworkMonitor, recheck_every: Duration) -> Self {
        let (decision_tx, decision) = watch::channel(false);
        let (triggers, mut trigger_rx) = mpsc::unbounded_channel();

        // Called immediately with the current status, which doubles as the
        // initial evaluation
        let status_tx = triggers.clone();
        let subscription = monitor.add_listener(move |status| {
            let _ = status_tx.send(Trigger::Status(*status));
        });

        let recheck_every = recheck_every.max(MIN_RECHECK_INTERVAL);
        let mut online = monitor.is_online();
        let monitor = monitor.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + recheck_every, recheck_every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                let evaluate = tokio::select! {
                    trigger = trigger_rx.recv() => match trigger {
                        Some(Trigger::Status(status)) => {
                            online = status.is_online;
                            online
                        }
                        Some(Trigger::Recheck) => online,
                        None => break,
                    },
                    _ = ticker.tick() => online,
                };

                let show = if evaluate {
                    // The policy read can straddle an offline transition
                    policy.should_show_refresh_prompt(true).await && monitor.is_online()
                } else {
                    false
                };

                decision_tx.send_if_modified(|current| {
                    if *current == show {
                        false
                    } else {
                        debug!(show, "Refresh prompt visibility changed");
                        *current = show;
                        true
                    }
                });
            }
        });

        Self {
            decision,
            triggers,
            subscription,
            handle,
        }
    }

    /// A receiver that observes every change of the decision.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.decision.clone()
    }

    pub fn should_show(&self) -> bool {
        *self.decision.borrow()
    }

    /// Re-evaluate now, e.g. after the user dismissed the prompt.
    pub fn recheck(&self) {
        let _ = self.triggers.send(Trigger::Recheck);
    }

    /// Unsubscribe from the monitor and stop the background task.
    pub async fn stop(self) {
        self.subscription.unsubscribe();
        self.handle.abort();
        let _ = self.handle.await;
    }
}
