use log::{debug, info};
use serde::{Deserialize, Serialize};
use sigmatcore::signal::{SignalSeries, SERIES_LEN};
use sigmatcore::survey::{display_ssid, Location, ScanReading};
use std::thread;
use std::time::{Duration, Instant};

/// Platform scanner polled by the capture loop.
pub trait ScanSource {
    /// Requests a fresh scan. Returns `false` when the platform refuses.
    fn trigger_scan(&mut self) -> bool;

    /// Results of the most recent completed scan.
    fn scan_results(&mut self) -> Vec<ScanReading>;

    /// Called before sampling a new location.
    fn move_to(&mut self, _location: &str) {}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("scan request refused by the platform")]
    ScanRefused,
    #[error("no WiFi access points found")]
    NoAccessPoints,
}

/// Timing of the strongest-AP capture loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub target_samples: usize,
    pub poll_interval_ms: u64,
    pub timeout_secs: u64,
    /// Level recorded when the tracked AP is missing and nothing was read yet.
    pub fallback_dbm: i32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            target_samples: SERIES_LEN,
            poll_interval_ms: 100,
            timeout_secs: 30,
            fallback_dbm: -70,
        }
    }
}

impl CaptureConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Readings collected for one location from its strongest access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationCapture {
    pub location: String,
    pub ap_name: String,
    pub bssid: String,
    pub readings: Vec<i32>,
}

impl LocationCapture {
    pub fn into_location(self) -> Location {
        Location::new(
            self.location,
            SignalSeries::normalize(&self.readings),
            vec![self.ap_name],
        )
    }
}

pub struct CaptureSession<'a, S: ScanSource> {
    source: &'a mut S,
    config: CaptureConfig,
}

impl<'a, S: ScanSource> CaptureSession<'a, S> {
    pub fn new(source: &'a mut S, config: CaptureConfig) -> Self {
        Self { source, config }
    }

    /// Tracks the strongest visible AP until `target_samples` readings are
    /// taken or the timeout passes, then pads with the last reading.
    pub fn run(&mut self, location: &str) -> Result<LocationCapture, CaptureError> {
        let mut initial = self.source.scan_results();
        if initial.is_empty() {
            if !self.source.trigger_scan() {
                return Err(CaptureError::ScanRefused);
            }
            initial = self.source.scan_results();
        }

        let strongest = initial
            .into_iter()
            .max_by_key(|reading| reading.level)
            .ok_or(CaptureError::NoAccessPoints)?;
        info!(
            "capturing {} from {} ({})",
            location, strongest.ssid, strongest.bssid
        );

        let target = self.config.target_samples;
        let fallback = self.config.fallback_dbm;
        let timeout = self.config.timeout();
        let started = Instant::now();
        let mut readings = Vec::with_capacity(target);

        while readings.len() < target {
            self.source.trigger_scan();
            thread::sleep(self.config.poll_interval());

            let level = self
                .source
                .scan_results()
                .into_iter()
                .find(|reading| reading.bssid == strongest.bssid)
                .map(|reading| reading.level)
                .unwrap_or_else(|| readings.last().copied().unwrap_or(fallback));
            readings.push(level);

            if started.elapsed() >= timeout {
                debug!("capture of {} timed out after {} readings", location, readings.len());
                break;
            }
        }

        let pad = readings.last().copied().unwrap_or(fallback);
        readings.resize(target, pad);

        Ok(LocationCapture {
            location: location.to_string(),
            ap_name: display_ssid(&strongest.ssid),
            bssid: strongest.bssid,
            readings,
        })
    }
}
