use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How eagerly the UI suggests refreshing stale data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum PromptFrequency {
    /// Only when data is critically outdated
    Conservative,
    /// When data is outdated or worse
    #[default]
    Normal,
    /// Whenever the last sync is more than 12 hours old
    Aggressive,
}

impl PromptFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptFrequency::Conservative => "conservative",
            PromptFrequency::Normal => "normal",
            PromptFrequency::Aggressive => "aggressive",
        }
    }
}

impl FromStr for PromptFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(PromptFrequency::Conservative),
            "normal" => Ok(PromptFrequency::Normal),
            "aggressive" => Ok(PromptFrequency::Aggressive),
            other => Err(format!("unknown prompt frequency: {}", other)),
        }
    }
}

/// How long a dismissed refresh prompt stays hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum DismissalKind {
    Temporary,
    Session,
    Extended,
}

impl DismissalKind {
    pub fn duration(&self) -> Duration {
        match self {
            DismissalKind::Temporary => Duration::hours(2),
            DismissalKind::Session => Duration::hours(8),
            DismissalKind::Extended => Duration::hours(24),
        }
    }
}

impl FromStr for DismissalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temporary" => Ok(DismissalKind::Temporary),
            "session" => Ok(DismissalKind::Session),
            "extended" => Ok(DismissalKind::Extended),
            other => Err(format!("unknown dismissal kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshPreferences {
    pub enable_auto_prompts: bool,
    pub prompt_frequency: PromptFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissed_until: Option<DateTime<Utc>>,
}

impl Default for RefreshPreferences {
    fn default() -> Self {
        Self {
            enable_auto_prompts: true,
            prompt_frequency: PromptFrequency::Normal,
            dismissed_until: None,
        }
    }
}

impl RefreshPreferences {
    /// True while a dismissal window is still open at `now`.
    pub fn is_dismissed_at(&self, now: DateTime<Utc>) -> bool {
        self.dismissed_until.is_some_and(|until| now < until)
    }

    pub fn dismiss_at(&mut self, kind: DismissalKind, now: DateTime<Utc>) {
        self.dismissed_until = Some(now + kind.duration());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = RefreshPreferences::default();
        assert!(prefs.enable_auto_prompts);
        assert_eq!(prefs.prompt_frequency, PromptFrequency::Normal);
        assert!(prefs.dismissed_until.is_none());
    }

    #[test]
    fn test_dismissal_durations() {
        assert_eq!(DismissalKind::Temporary.duration(), Duration::hours(2));
        assert_eq!(DismissalKind::Session.duration(), Duration::hours(8));
        assert_eq!(DismissalKind::Extended.duration(), Duration::hours(24));
    }

    #[test]
    fn test_dismissal_window_is_strict() {
        let now = Utc::now();
        let mut prefs = RefreshPreferences::default();
        prefs.dismiss_at(DismissalKind::Temporary, now);

        assert!(prefs.is_dismissed_at(now));
        assert!(prefs.is_dismissed_at(now + Duration::hours(2) - Duration::seconds(1)));
        assert!(!prefs.is_dismissed_at(now + Duration::hours(2)));
    }

    #[test]
    fn test_parse_frequency_and_kind() {
        assert_eq!("Aggressive".parse::<PromptFrequency>(), Ok(PromptFrequency::Aggressive));
        assert_eq!(" normal ".parse::<PromptFrequency>(), Ok(PromptFrequency::Normal));
        assert!("sometimes".parse::<PromptFrequency>().is_err());
        assert_eq!("session".parse::<DismissalKind>(), Ok(DismissalKind::Session));
        assert!("forever".parse::<DismissalKind>().is_err());
    }

    #[test]
    fn test_preferences_json_shape() {
        let json = r#"{"enableAutoPrompts":false,"promptFrequency":"conservative"}"#;
        let prefs: RefreshPreferences = serde_json::from_str(json).unwrap();
        assert!(!prefs.enable_auto_prompts);
        assert_eq!(prefs.prompt_frequency, PromptFrequency::Conservative);
        assert!(prefs.dismissed_until.is_none());

        let out = serde_json::to_value(&prefs).unwrap();
        assert!(out.get("dismissedUntil").is_none());
    }

    #[test]
    fn test_preferences_missing_fields_use_defaults() {
        let prefs: RefreshPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, RefreshPreferences::default());
    }
}
