use rand::Rng;
use std::f64::consts::PI;
use std::path::Path;

use crate::error::{Error, Result};

/// Peak amplitude of the uniform noise added to simulated signals.
pub const NOISE_AMPLITUDE: f64 = 0.01;

/// Longest signal `run` will generate (about 35 minutes at 48 kHz).
pub const MAX_SIMULATED_SAMPLES: usize = 100_000_000;

/// Sum of unit sinusoids at `frequencies` plus uniform noise in
/// `[-noise_amplitude, noise_amplitude)`.
pub fn simulate_signal<R: Rng>(
    rng: &mut R,
    sample_rate_hz: f64,
    num_samples: usize,
    frequencies: &[f64],
    noise_amplitude: f64,
) -> Vec<f64> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate_hz;
            let tones: f64 = frequencies
                .iter()
                .map(|&freq| (2.0 * PI * freq * t).sin())
                .sum();
            let noise = if noise_amplitude > 0.0 {
                rng.gen_range(-noise_amplitude..noise_amplitude)
            } else {
                0.0
            };
            tones + noise
        })
        .collect()
}

pub fn write_signal_csv<P: AsRef<Path>>(file_path: P, samples: &[f64]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(file_path)?;
    wtr.write_record(["signal"])?;
    for sample in samples {
        wtr.write_record([sample.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn simulated_length(sample_rate_hz: f64, seconds: f64) -> Result<usize> {
    if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
        return Err(Error::Parse(format!(
            "sample rate must be finite and positive, got {}",
            sample_rate_hz
        )));
    }
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(Error::Parse(format!(
            "duration must be finite and non-negative, got {}",
            seconds
        )));
    }
    let num_samples = (sample_rate_hz * seconds).round();
    if num_samples > MAX_SIMULATED_SAMPLES as f64 {
        return Err(Error::Parse(format!(
            "{} s at {} Hz is {} samples, more than the limit of {}",
            seconds, sample_rate_hz, num_samples, MAX_SIMULATED_SAMPLES
        )));
    }
    Ok(num_samples as usize)
}

/// Writes `seconds` of simulated signal to `output_path`; returns the sample count.
pub fn run<P: AsRef<Path>>(
    output_path: P,
    sample_rate_hz: f64,
    seconds: f64,
    frequencies: &[f64],
) -> Result<usize> {
    let num_samples = simulated_length(sample_rate_hz, seconds)?;
    if let Some(freq) = frequencies.iter().find(|f| !f.is_finite()) {
        return Err(Error::Parse(format!("tone frequency must be finite, got {}", freq)));
    }
    let mut rng = rand::thread_rng();
    let samples = simulate_signal(
        &mut rng,
        sample_rate_hz,
        num_samples,
        frequencies,
        NOISE_AMPLITUDE,
    );
    write_signal_csv(output_path, &samples)?;
    Ok(num_samples)
}
