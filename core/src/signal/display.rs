use crate::math::stats::StatsHelper;
use crate::signal::series::WEAK_SIGNAL_DBM;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strongest reading assumed when a series is empty (dBm).
pub const STRONG_SIGNAL_DBM: i32 = -30;

/// Upper bound of the visualization range.
pub const DISPLAY_MAX: f32 = 100.0;

/// Side length of the square heat map a full series is laid out on.
pub const HEATMAP_SIDE: usize = 10;

/// Maps readings into `[0, 100]` relative to the series' own extent.
///
/// The weakest reading maps to 0 and the strongest to 100. The range is
/// floored at 1 dBm so a flat series maps to all zeros.
pub fn to_display_range(series: &[i32]) -> Vec<f32> {
    let (min_signal, max_signal) =
        StatsHelper::extent(series).unwrap_or((WEAK_SIGNAL_DBM, STRONG_SIGNAL_DBM));
    let range = (i64::from(max_signal) - i64::from(min_signal)).abs().max(1) as f32;

    series
        .iter()
        .map(|&value| {
            let offset = (i64::from(value) - i64::from(min_signal)) as f32;
            (offset / range * DISPLAY_MAX).clamp(0.0, DISPLAY_MAX)
        })
        .collect()
}

/// Red/green weights for one heat-map cell; weak cells lean red.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalTint {
    pub red: f32,
    pub green: f32,
}

pub fn signal_tint(strength: f32) -> SignalTint {
    let level = strength.clamp(0.0, DISPLAY_MAX) / DISPLAY_MAX;
    SignalTint {
        red: 1.0 - level,
        green: level,
    }
}

/// Coarse band a reading falls in, used to color summary figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalQuality {
    /// Above -60 dBm.
    Excellent,
    /// Above -70 dBm.
    Good,
    /// Above -80 dBm.
    Fair,
    Weak,
}

impl SignalQuality {
    pub fn of(dbm: i32) -> Self {
        match dbm {
            level if level > -60 => SignalQuality::Excellent,
            level if level > -70 => SignalQuality::Good,
            level if level > -80 => SignalQuality::Fair,
            _ => SignalQuality::Weak,
        }
    }
}

impl fmt::Display for SignalQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalQuality::Excellent => "excellent",
            SignalQuality::Good => "good",
            SignalQuality::Fair => "fair",
            SignalQuality::Weak => "weak",
        };
        f.write_str(label)
    }
}

/// Row and column of a series index in the heat map.
pub fn grid_position(index: usize) -> (usize, usize) {
    (index / HEATMAP_SIDE, index % HEATMAP_SIDE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_series_maps_to_zero() {
        assert_eq!(to_display_range(&[-55, -55, -55]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn extent_maps_to_full_range() {
        let display = to_display_range(&[-90, -60, -40]);
        assert_eq!(display[0], 0.0);
        assert!((display[1] - 60.0).abs() < 1e-4);
        assert_eq!(display[2], 100.0);
    }

    #[test]
    fn empty_series_yields_empty_display() {
        assert!(to_display_range(&[]).is_empty());
    }

    #[test]
    fn tint_moves_from_red_to_green() {
        assert_eq!(signal_tint(0.0), SignalTint { red: 1.0, green: 0.0 });
        assert_eq!(signal_tint(100.0), SignalTint { red: 0.0, green: 1.0 });
        assert_eq!(signal_tint(250.0), SignalTint { red: 0.0, green: 1.0 });
    }

    #[test]
    fn quality_bands_use_exclusive_thresholds() {
        assert_eq!(SignalQuality::of(-30), SignalQuality::Excellent);
        assert_eq!(SignalQuality::of(-59), SignalQuality::Excellent);
        assert_eq!(SignalQuality::of(-60), SignalQuality::Good);
        assert_eq!(SignalQuality::of(-70), SignalQuality::Fair);
        assert_eq!(SignalQuality::of(-79), SignalQuality::Fair);
        assert_eq!(SignalQuality::of(-80), SignalQuality::Weak);
        assert_eq!(SignalQuality::of(-100).to_string(), "weak");
    }

    #[test]
    fn positions_fill_rows_first() {
        assert_eq!(grid_position(0), (0, 0));
        assert_eq!(grid_position(9), (0, 9));
        assert_eq!(grid_position(10), (1, 0));
        assert_eq!(grid_position(99), (9, 9));
    }
}
