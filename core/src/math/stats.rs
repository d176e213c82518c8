pub struct StatsHelper;

impl StatsHelper {
    /// Arithmetic mean of integer readings, `None` for an empty slice.
    pub fn mean(samples: &[i32]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        let sum: i64 = samples.iter().map(|&v| i64::from(v)).sum();
        Some(sum as f64 / samples.len() as f64)
    }

    /// Smallest and largest reading.
    pub fn extent(samples: &[i32]) -> Option<(i32, i32)> {
        let min = samples.iter().copied().min()?;
        let max = samples.iter().copied().max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_sequence_is_none() {
        assert_eq!(StatsHelper::mean(&[]), None);
        assert_eq!(StatsHelper::extent(&[]), None);
    }

    #[test]
    fn mean_handles_negative_readings() {
        assert_eq!(StatsHelper::mean(&[-40, -50, -60]), Some(-50.0));
        assert_eq!(StatsHelper::extent(&[-40, -90, -60]), Some((-90, -40)));
    }
}
