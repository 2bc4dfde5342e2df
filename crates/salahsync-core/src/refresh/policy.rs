use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::cache::CacheManager;
use crate::models::{CacheFreshness, DismissalKind, PromptFrequency, RefreshPreferences};
use crate::store::{read_json, write_json};

/// Key under which [`RefreshPreferences`] are persisted.
pub const REFRESH_PREFERENCES_KEY: &str = "refresh_preferences";

/// Aggressive prompting kicks in past this many hours since the last sync.
const AGGRESSIVE_PROMPT_HOURS: f64 = 12.0;

/// Decide whether a "data may be stale" prompt should be visible at `now`.
/// Offline always suppresses it.
pub fn should_show_prompt(
    freshness: &CacheFreshness,
    is_online: bool,
    prefs: &RefreshPreferences,
    now: DateTime<Utc>,
) -> bool {
    if !is_online || !prefs.enable_auto_prompts || prefs.is_dismissed_at(now) {
        return false;
    }

    match prefs.prompt_frequency {
        PromptFrequency::Conservative => freshness.critically_outdated,
        PromptFrequency::Normal => freshness.should_prompt_refresh,
        PromptFrequency::Aggressive => freshness.hours_old > AGGRESSIVE_PROMPT_HOURS,
    }
}

/// Prompt decisions backed by the cache's freshness and the persisted
/// preferences. Clone is cheap.
#[derive(Clone)]
pub struct RefreshPolicy {
    cache: CacheManager,
}

impl RefreshPolicy {
    pub fn new(cache: CacheManager) -> Self {
        Self { cache }
    }

    /// Stored preferences, or the defaults when missing or unreadable.
    pub async fn load_preferences(&self) -> RefreshPreferences {
        match read_json(self.cache.store(), REFRESH_PREFERENCES_KEY).await {
            Ok(Some(prefs)) => prefs,
            Ok(None) => RefreshPreferences::default(),
            Err(e) => {
                warn!(error = %e, "Failed to load refresh preferences, using defaults");
                RefreshPreferences::default()
            }
        }
    }

    pub async fn save_preferences(&self, prefs: &RefreshPreferences) {
        if let Err(e) = write_json(self.cache.store(), REFRESH_PREFERENCES_KEY, prefs).await {
            warn!(error = %e, "Failed to save refresh preferences");
        }
    }

    async fn update(&self, f: impl FnOnce(&mut RefreshPreferences)) -> RefreshPreferences {
        let mut prefs = self.load_preferences().await;
        f(&mut prefs);
        self.save_preferences(&prefs).await;
        prefs
    }

    pub async fn set_auto_prompts(&self, enabled: bool) -> RefreshPreferences {
        self.update(|prefs| prefs.enable_auto_prompts = enabled).await
    }

    pub async fn set_prompt_frequency(&self, frequency: PromptFrequency) -> RefreshPreferences {
        self.update(|prefs| prefs.prompt_frequency = frequency).await
    }

    /// Hide the prompt for the dismissal's duration, starting now.
    pub async fn dismiss(&self, kind: DismissalKind) -> RefreshPreferences {
        let now = Utc::now();
        let prefs = self.update(|prefs| prefs.dismiss_at(kind, now)).await;
        info!(?kind, until = ?prefs.dismissed_until, "Refresh prompt dismissed");
        prefs
    }

    pub async fn clear_dismissal(&self) -> RefreshPreferences {
        self.update(|prefs| prefs.dismissed_until = None).await
    }

    pub async fn should_show_refresh_prompt(&self, is_online: bool) -> bool {
        self.should_show_refresh_prompt_at(is_online, Utc::now()).await
    }

    async fn should_show_refresh_prompt_at(&self, is_online: bool, now: DateTime<Utc>) -> bool {
        if !is_online {
            return false;
        }
        let freshness = self.cache.get_cache_freshness().await;
        let prefs = self.load_preferences().await;
        let show = should_show_prompt(&freshness, is_online, &prefs, now);
        debug!(
            status = freshness.status.as_str(),
            hours_old = freshness.hours_old,
            frequency = prefs.prompt_frequency.as_str(),
            show,
            "Evaluated refresh prompt"
        );
        show
    }
}
