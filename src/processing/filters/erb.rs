//! ERB-rate scale (Glasberg & Moore 1990) and gammatone bandwidth helpers.

use std::f64::consts::PI;

/// Equivalent rectangular bandwidth in Hz at `hz`.
#[inline]
pub fn erb_bandwidth(hz: f64) -> f64 {
    24.7 * (4.37 * hz / 1000.0 + 1.0)
}

/// Frequency in Hz to ERB-rate (number of ERBs below `hz`).
#[inline]
pub fn hz_to_erb_rate(hz: f64) -> f64 {
    21.4 * (4.37 * hz / 1000.0 + 1.0).log10()
}

#[inline]
pub fn erb_rate_to_hz(erb: f64) -> f64 {
    (10.0_f64.powf(erb / 21.4) - 1.0) * 1000.0 / 4.37
}

/// Bandwidth scale factor that makes an order-`order` gammatone's equivalent
/// rectangular bandwidth equal to the ERB. 1.019 for order 4.
pub fn bandwidth_correction(order: usize) -> f64 {
    let n = order as i32;
    let factorial = |k: i32| (1..=k).map(f64::from).product::<f64>();
    let num = factorial(n - 1).powi(2);
    let den = PI * factorial(2 * n - 2) * 2.0_f64.powi(-(2 * n - 2));
    num / den
}

/// `num_channels` centre frequencies, ascending, evenly spaced on the ERB-rate
/// scale. Each sits at the midpoint of its ERB segment, so every value lies
/// strictly inside `(low_hz, high_hz)`.
pub fn erb_space(low_hz: f64, high_hz: f64, num_channels: usize) -> Vec<f64> {
    let erb_low = hz_to_erb_rate(low_hz);
    let step = (hz_to_erb_rate(high_hz) - erb_low) / num_channels as f64;

    (0..num_channels)
        .map(|i| erb_rate_to_hz(erb_low + (i as f64 + 0.5) * step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn erb_rate_round_trips() {
        for &hz in &[0.0, 50.0, 440.0, 1000.0, 7999.0] {
            assert_relative_eq!(erb_rate_to_hz(hz_to_erb_rate(hz)), hz, epsilon = 1e-9);
        }
    }

    #[test]
    fn erb_bandwidth_at_1khz() {
        // Glasberg & Moore: ~132.6 Hz at 1 kHz
        assert_relative_eq!(erb_bandwidth(1000.0), 132.639, epsilon = 1e-3);
    }

    #[test]
    fn order_four_correction_is_1_019() {
        assert_relative_eq!(bandwidth_correction(4), 1.019, epsilon = 1e-3);
    }

    #[test]
    fn erb_space_is_monotonic_and_interior() {
        let cfs = erb_space(100.0, 6000.0, 24);
        assert_eq!(cfs.len(), 24);
        assert!(cfs.windows(2).all(|w| w[0] < w[1]));
        assert!(cfs.iter().all(|&f| f > 100.0 && f < 6000.0));
    }

    #[test]
    fn single_channel_sits_mid_range() {
        let cfs = erb_space(100.0, 6000.0, 1);
        let mid = erb_rate_to_hz((hz_to_erb_rate(100.0) + hz_to_erb_rate(6000.0)) / 2.0);
        assert_relative_eq!(cfs[0], mid, epsilon = 1e-9);
    }
}
