//! Signal-series normalization and display mapping.

pub mod display;
pub mod series;

pub use display::{grid_position, signal_tint, to_display_range, SignalQuality, SignalTint};
pub use series::{normalize, SignalSeries, SERIES_LEN, WEAK_SIGNAL_DBM};

use crate::math::stats::StatsHelper;
use serde::{Deserialize, Serialize};

/// Summary figures shown next to a captured series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalStats {
    pub min: i32,
    pub max: i32,
    /// Mean reading truncated toward zero.
    pub average_dbm: i32,
}

impl SignalStats {
    pub fn of(series: &SignalSeries) -> Self {
        // A normalized series is never empty.
        let (min, max) = StatsHelper::extent(series).unwrap_or((WEAK_SIGNAL_DBM, WEAK_SIGNAL_DBM));
        let average = StatsHelper::mean(series).unwrap_or(f64::from(WEAK_SIGNAL_DBM));
        Self {
            min,
            max,
            average_dbm: average.trunc() as i32,
        }
    }

    /// Band of the average reading.
    pub fn quality(&self) -> SignalQuality {
        SignalQuality::of(self.average_dbm)
    }
}
