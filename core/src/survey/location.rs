use crate::signal::{SignalSeries, SignalStats};
use serde::{Deserialize, Serialize};

/// One access point as reported by a single WiFi scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReading {
    pub ssid: String,
    pub bssid: String,
    /// Received signal strength in dBm.
    pub level: i32,
}

/// Named place with the signal series captured there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub signals: SignalSeries,
    #[serde(default)]
    pub access_points: Vec<String>,
}

impl Location {
    pub fn new(name: impl Into<String>, signals: SignalSeries, access_points: Vec<String>) -> Self {
        Self {
            name: name.into(),
            signals,
            access_points,
        }
    }

    pub fn stats(&self) -> SignalStats {
        SignalStats::of(&self.signals)
    }
}

/// Name shown for an access point: surrounding quotes removed, and
/// "Unknown AP" when nothing is left.
pub fn display_ssid(raw: &str) -> String {
    let unquoted = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw);
    if unquoted.is_empty() {
        "Unknown AP".to_string()
    } else {
        unquoted.to_string()
    }
}
