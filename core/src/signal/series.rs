use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Number of readings held by every normalized series.
pub const SERIES_LEN: usize = 100;

/// Reading used to pad short captures (dBm).
pub const WEAK_SIGNAL_DBM: i32 = -100;

/// Fixed-length sequence of signal readings in dBm.
///
/// A series always holds exactly [`SERIES_LEN`] readings; deserializing a
/// series of any other length normalizes it first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<i32>", into = "Vec<i32>")]
pub struct SignalSeries(Vec<i32>);

impl SignalSeries {
    /// Truncates to the first 100 readings or pads the tail with
    /// [`WEAK_SIGNAL_DBM`]. Never fails.
    pub fn normalize(raw: &[i32]) -> Self {
        Self::from(raw.to_vec())
    }

    /// Builds a series from a generator indexed by position.
    pub fn from_fn(f: impl FnMut(usize) -> i32) -> Self {
        Self((0..SERIES_LEN).map(f).collect())
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<i32> {
        self.0
    }
}

impl Default for SignalSeries {
    fn default() -> Self {
        Self(vec![WEAK_SIGNAL_DBM; SERIES_LEN])
    }
}

impl From<Vec<i32>> for SignalSeries {
    fn from(mut raw: Vec<i32>) -> Self {
        raw.truncate(SERIES_LEN);
        raw.resize(SERIES_LEN, WEAK_SIGNAL_DBM);
        Self(raw)
    }
}

impl From<SignalSeries> for Vec<i32> {
    fn from(series: SignalSeries) -> Self {
        series.0
    }
}

impl Deref for SignalSeries {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        &self.0
    }
}

/// Free-function form of [`SignalSeries::normalize`].
pub fn normalize(raw: &[i32]) -> SignalSeries {
    SignalSeries::normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_capture_becomes_all_weak() {
        let series = normalize(&[]);
        assert_eq!(series.len(), SERIES_LEN);
        assert!(series.iter().all(|&v| v == WEAK_SIGNAL_DBM));
    }

    #[test]
    fn long_capture_keeps_prefix_in_order() {
        let raw: Vec<i32> = (0..150).collect();
        let series = normalize(&raw);
        let expected: Vec<i32> = (0..100).collect();
        assert_eq!(series.as_slice(), expected.as_slice());
    }

    #[test]
    fn short_capture_is_padded_at_tail() {
        let series = normalize(&[5]);
        assert_eq!(series[0], 5);
        assert_eq!(series.len(), 100);
        assert!(series[1..].iter().all(|&v| v == -100));
    }

    #[test]
    fn exact_length_capture_is_unchanged() {
        let raw: Vec<i32> = (0..100).map(|i| -30 - i).collect();
        assert_eq!(normalize(&raw).into_inner(), raw);
    }

    #[test]
    fn deserializing_renormalizes_length() {
        let series: SignalSeries = serde_json::from_str("[-40, -41]").unwrap();
        assert_eq!(series.len(), SERIES_LEN);
        assert_eq!(&series[..3], &[-40, -41, -100]);

        let encoded = serde_json::to_string(&series).unwrap();
        assert!(encoded.starts_with("[-40,-41,-100"));
    }
}
