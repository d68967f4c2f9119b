// src/error.rs

/// Invalid filterbank parameters. Raised at construction, never at apply-time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("number of channels must be greater than zero")]
    NoChannels,

    #[error("invalid sample rate: {0} Hz (must be finite and positive)")]
    InvalidSampleRate(f64),

    #[error("invalid frequency range: low={low} Hz, high={high} Hz ({reason})")]
    InvalidFrequencyRange {
        low: f64,
        high: f64,
        reason: &'static str,
    },

    #[error("invalid filter order {order}: must be between 1 and {max}")]
    InvalidOrder { order: usize, max: usize },
}

/// Invalid input signal. Raised at apply-time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignalError {
    #[error("signal is empty")]
    Empty,

    #[error("signal sample rate {got} Hz does not match filterbank sample rate {expected} Hz")]
    SampleRateMismatch { expected: f64, got: f64 },

    #[error("signal contains a non-finite value at sample {index}")]
    NonFinite { index: usize },
}

/// Crate-level error for the cancellable, file and CLI paths.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("filtering was cancelled")]
    Cancelled,

    #[error("cannot append output block: {0}")]
    OutputMismatch(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
