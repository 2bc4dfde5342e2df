use serde::{Deserialize, Serialize};

/// Downlink below this (Mbps) counts as a slow connection.
const SLOW_DOWNLINK_MBPS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Wifi,
    Cellular,
    None,
    #[default]
    Unknown,
}

impl ConnectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Wifi => "wifi",
            ConnectionType::Cellular => "cellular",
            ConnectionType::None => "none",
            ConnectionType::Unknown => "unknown",
        }
    }
}

/// Process-wide connectivity snapshot maintained by the network monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub is_online: bool,
    pub connection_type: ConnectionType,
    pub is_slow_connection: bool,
}

impl NetworkStatus {
    pub fn offline() -> Self {
        Self::default()
    }

    /// Build a status from an online flag and optional quality info.
    /// Missing info degrades to `unknown` / not slow.
    pub fn from_parts(is_online: bool, info: Option<&ConnectionInfo>) -> Self {
        match info {
            Some(info) => Self {
                is_online,
                connection_type: info.connection_type(),
                is_slow_connection: info.is_slow(),
            },
            None => Self {
                is_online,
                connection_type: ConnectionType::Unknown,
                is_slow_connection: false,
            },
        }
    }
}

/// Raw reading from the platform's network-information capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    #[serde(default, rename = "type")]
    pub connection_type: Option<String>,
    #[serde(default)]
    pub effective_type: Option<String>,
    #[serde(default)]
    pub downlink: Option<f64>,
}

impl ConnectionInfo {
    pub fn connection_type(&self) -> ConnectionType {
        match self.connection_type.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("wifi") | Some("ethernet") => ConnectionType::Wifi,
            Some("cellular") => ConnectionType::Cellular,
            Some("none") => ConnectionType::None,
            _ => ConnectionType::Unknown,
        }
    }

    pub fn is_slow(&self) -> bool {
        let slow_type = matches!(self.effective_type.as_deref(), Some("slow-2g") | Some("2g"));
        let slow_downlink = self.downlink.is_some_and(|d| d < SLOW_DOWNLINK_MBPS);
        slow_type || slow_downlink
    }
}
