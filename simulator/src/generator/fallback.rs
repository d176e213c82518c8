use crate::capture::session::LocationCapture;
use crate::generator::profile::random_bssid;
use rand::Rng;
use sigmatcore::signal::SERIES_LEN;

/// Placeholder capture used when the platform refuses to scan: a random AP
/// with readings scattered around a base level between -60 and -89 dBm.
pub fn fallback_capture<R: Rng>(location: &str, rng: &mut R) -> LocationCapture {
    let ap_name = format!("AP_{}", rng.gen_range(1..10));
    let bssid = random_bssid(rng);
    let base = -60 - rng.gen_range(0..30);
    let readings = (0..SERIES_LEN)
        .map(|_| base + rng.gen_range(-15..15))
        .collect();

    LocationCapture {
        location: location.to_string(),
        ap_name,
        bssid,
        readings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn fallback_fills_a_full_series() {
        let mut rng = StdRng::seed_from_u64(5);
        let capture = fallback_capture("Porch", &mut rng);
        assert_eq!(capture.location, "Porch");
        assert!(capture.ap_name.starts_with("AP_"));
        assert_eq!(capture.readings.len(), SERIES_LEN);
        assert!(capture.readings.iter().all(|&level| (-104..=-46).contains(&level)));
    }
}
