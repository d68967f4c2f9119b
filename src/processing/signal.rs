use crate::error::SignalError;

/// Sample rates closer than this are treated as equal.
const SAMPLE_RATE_TOLERANCE_HZ: f64 = 1e-6;

/// Immutable block of samples at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate_hz: f64,
}

impl Signal {
    pub fn new(samples: Vec<f64>, sample_rate_hz: f64) -> Self {
        Signal {
            samples,
            sample_rate_hz,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Checks the signal against the rate the filterbank was built for.
    pub fn validate(&self, expected_rate_hz: f64) -> Result<(), SignalError> {
        validate_samples(&self.samples)?;
        if (self.sample_rate_hz - expected_rate_hz).abs() > SAMPLE_RATE_TOLERANCE_HZ {
            return Err(SignalError::SampleRateMismatch {
                expected: expected_rate_hz,
                got: self.sample_rate_hz,
            });
        }
        Ok(())
    }
}

pub fn validate_samples(samples: &[f64]) -> Result<(), SignalError> {
    if samples.is_empty() {
        return Err(SignalError::Empty);
    }
    match samples.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(SignalError::NonFinite { index }),
        None => Ok(()),
    }
}
