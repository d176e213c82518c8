use crate::capture::session::ScanSource;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sigmatcore::survey::ScanReading;

/// Configuration for the synthetic WiFi environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanProfile {
    pub access_points: usize,
    /// Strongest and weakest base level an AP can be placed at (dBm).
    pub strongest_dbm: i32,
    pub weakest_dbm: i32,
    /// Per-scan fluctuation around each AP's base level.
    pub jitter_dbm: i32,
    /// Probability that an AP is missing from a given scan.
    pub dropout: f64,
    pub seed: u64,
}

impl Default for ScanProfile {
    fn default() -> Self {
        Self {
            access_points: 6,
            strongest_dbm: -35,
            weakest_dbm: -90,
            jitter_dbm: 6,
            dropout: 0.05,
            seed: 0,
        }
    }
}

impl ScanProfile {
    fn level_bounds(&self) -> (i32, i32) {
        let low = self.weakest_dbm.min(self.strongest_dbm);
        let high = self.weakest_dbm.max(self.strongest_dbm);
        (low, high)
    }

    fn normalized_dropout(&self) -> f64 {
        if self.dropout.is_finite() {
            self.dropout.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
struct SimulatedAp {
    ssid: String,
    bssid: String,
    base_dbm: i32,
}

/// Seeded stand-in for the platform scanner.
pub struct SimulatedScanner {
    rng: StdRng,
    profile: ScanProfile,
    access_points: Vec<SimulatedAp>,
    latest: Vec<ScanReading>,
}

impl SimulatedScanner {
    pub fn new(profile: ScanProfile) -> Self {
        let mut rng = StdRng::seed_from_u64(profile.seed);
        let (low, high) = profile.level_bounds();
        let access_points = (0..profile.access_points)
            .map(|index| SimulatedAp {
                ssid: format!("\"Net_{}\"", index + 1),
                bssid: random_bssid(&mut rng),
                base_dbm: rng.gen_range(low..=high),
            })
            .collect();

        Self {
            rng,
            profile,
            access_points,
            latest: Vec::new(),
        }
    }

    fn shift_levels(&mut self, offset_dbm: i32) {
        let (low, high) = self.profile.level_bounds();
        for ap in &mut self.access_points {
            ap.base_dbm = (ap.base_dbm + offset_dbm).clamp(low, high);
        }
        self.latest.clear();
    }
}

impl ScanSource for SimulatedScanner {
    fn trigger_scan(&mut self) -> bool {
        let jitter = self.profile.jitter_dbm.abs();
        let dropout = self.profile.normalized_dropout();
        let rng = &mut self.rng;

        self.latest = self
            .access_points
            .iter()
            .filter_map(|ap| {
                if rng.gen_bool(dropout) {
                    return None;
                }
                Some(ScanReading {
                    ssid: ap.ssid.clone(),
                    bssid: ap.bssid.clone(),
                    level: ap.base_dbm + rng.gen_range(-jitter..=jitter),
                })
            })
            .collect();
        true
    }

    fn scan_results(&mut self) -> Vec<ScanReading> {
        self.latest.clone()
    }

    /// Every AP drifts by up to ±10 dBm and the cached scan is dropped.
    fn move_to(&mut self, _location: &str) {
        let offset = self.rng.gen_range(-10..=10);
        self.shift_levels(offset);
    }
}

/// Colon-separated upper-case hex MAC address.
pub fn random_bssid<R: Rng>(rng: &mut R) -> String {
    let octets: [u8; 6] = rng.gen();
    octets
        .iter()
        .map(|octet| format!("{:02X}", octet))
        .collect::<Vec<_>>()
        .join(":")
}
