//! Refresh-prompt throttling.
//!
//! `should_show_prompt` is the pure decision: given the cache freshness, the
//! online flag and the user's preferences, should the UI suggest a refresh
//! right now? `RefreshPolicy` wraps it with persisted preferences and
//! dismissal handling, and `PromptScheduler` re-evaluates it on mount, on
//! connectivity changes and on a 30 minute timer.

pub mod policy;
pub mod scheduler;

pub use policy::{should_show_prompt, RefreshPolicy, REFRESH_PREFERENCES_KEY};
pub use scheduler::{PromptScheduler, DEFAULT_RECHECK_INTERVAL};
