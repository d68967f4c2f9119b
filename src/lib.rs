//! Gammatone auditory filterbank.
//!
//! Channels are spaced evenly on the ERB-rate scale between a low and a high
//! frequency bound. Each channel is a base-band impulse-invariant gammatone
//! (default order 4) producing an envelope, real-part or complex output.
//!
//! ```
//! use gammatone::{FilterbankConfig, GammatoneFilterbank, Signal};
//!
//! let filterbank = GammatoneFilterbank::new(FilterbankConfig {
//!     num_channels: 24,
//!     low_freq_hz: 100.0,
//!     high_freq_hz: 7000.0,
//!     sample_rate_hz: 16000.0,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let output = filterbank.apply(&Signal::new(vec![0.0; 1600], 16000.0)).unwrap();
//! assert_eq!(output.num_channels(), 24);
//! assert_eq!(output.num_samples(), 1600);
//! ```

pub mod config;
pub mod error;
pub mod local;
pub mod processing;
pub mod utils;

pub use config::{
    load_config, save_config, ChannelOrder, Config, FilterbankConfig, OutputMode,
    ProcessorConfig, MAX_ORDER,
};
pub use error::{ConfigError, Error, Result, SignalError};
pub use processing::cancel::{CancelToken, CANCEL_CHECK_INTERVAL};
pub use processing::filterbank::GammatoneFilterbank;
pub use processing::filters::erb::{erb_bandwidth, erb_rate_to_hz, erb_space, hz_to_erb_rate};
pub use processing::filters::gammatone::FilterChannel;
pub use processing::output::{ChannelAnalysis, ChannelOutput, FilterbankOutput};
pub use processing::signal::Signal;
pub use processing::stream::StreamingFilterbank;
