// src/config/mod.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error};

/// Highest supported gammatone order. Sizes the per-channel delay line.
pub const MAX_ORDER: usize = 8;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub filterbank: FilterbankConfig,
    #[serde(default)]
    pub processor: ProcessorConfig,
}

/// What each channel emits at the end of its pipeline.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    #[default]
    Envelope,
    RealPart,
    Complex,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FilterbankConfig {
    pub num_channels: usize,
    pub low_freq_hz: f64,
    pub high_freq_hz: f64,
    pub sample_rate_hz: f64,
    #[serde(default)]
    pub output_mode: OutputMode,
    #[serde(default = "default_filter_order")]
    pub filter_order: usize,
    #[serde(default)]
    pub channel_order: ChannelOrder,
    #[serde(default)]
    pub half_wave_rectify: bool,
}

fn default_filter_order() -> usize {
    4
}

impl Default for FilterbankConfig {
    fn default() -> Self {
        Self {
            num_channels: 32,
            low_freq_hz: 50.0,
            high_freq_hz: 7600.0,
            sample_rate_hz: 16000.0,
            output_mode: OutputMode::default(),
            filter_order: default_filter_order(),
            channel_order: ChannelOrder::default(),
            half_wave_rectify: false,
        }
    }
}

impl FilterbankConfig {
    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz / 2.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_channels == 0 {
            return Err(ConfigError::NoChannels);
        }
        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate_hz));
        }
        if self.filter_order == 0 || self.filter_order > MAX_ORDER {
            return Err(ConfigError::InvalidOrder {
                order: self.filter_order,
                max: MAX_ORDER,
            });
        }

        let range_error = |reason| ConfigError::InvalidFrequencyRange {
            low: self.low_freq_hz,
            high: self.high_freq_hz,
            reason,
        };
        if !self.low_freq_hz.is_finite() || !self.high_freq_hz.is_finite() {
            return Err(range_error("bounds must be finite"));
        }
        if self.low_freq_hz < 0.0 {
            return Err(range_error("low frequency must not be negative"));
        }
        if self.low_freq_hz >= self.high_freq_hz {
            return Err(range_error("low frequency must be below high frequency"));
        }
        if self.high_freq_hz >= self.nyquist_hz() {
            return Err(range_error("high frequency must be below Nyquist"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProcessorConfig {
    /// Run channels on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub enable_debug_logging: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            enable_debug_logging: false,
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
    let config_str = fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&config_str)?;
    config.filterbank.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), Error> {
    let yaml = serde_yaml::to_string(config)?;
    fs::write(path, yaml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_yaml_with_defaults() {
        let yaml = "
filterbank:
  num_channels: 16
  low_freq_hz: 100.0
  high_freq_hz: 4000.0
  sample_rate_hz: 16000.0
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.filterbank.num_channels, 16);
        assert_eq!(config.filterbank.output_mode, OutputMode::Envelope);
        assert_eq!(config.filterbank.filter_order, 4);
        assert_eq!(config.filterbank.channel_order, ChannelOrder::Ascending);
        assert!(!config.filterbank.half_wave_rectify);
        assert!(config.processor.parallel);
        assert!(!config.processor.enable_debug_logging);
    }

    #[test]
    fn parses_output_modes() {
        let yaml = "
filterbank:
  num_channels: 4
  low_freq_hz: 100.0
  high_freq_hz: 4000.0
  sample_rate_hz: 16000.0
  output_mode: real_part
  channel_order: descending
processor:
  parallel: false
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.filterbank.output_mode, OutputMode::RealPart);
        assert_eq!(config.filterbank.channel_order, ChannelOrder::Descending);
        assert!(!config.processor.parallel);
    }

    #[test]
    fn save_then_load_preserves_config() {
        let config = Config {
            filterbank: FilterbankConfig {
                output_mode: OutputMode::Complex,
                ..Default::default()
            },
            processor: ProcessorConfig::default(),
        };
        let path = std::env::temp_dir().join(format!(
            "gammatone-config-{}.yaml",
            std::process::id()
        ));
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_rejects_invalid_bounds() {
        let path = std::env::temp_dir().join(format!(
            "gammatone-bad-config-{}.yaml",
            std::process::id()
        ));
        let mut config = Config {
            filterbank: FilterbankConfig::default(),
            processor: ProcessorConfig::default(),
        };
        config.filterbank.high_freq_hz = 9000.0;
        save_config(&config, &path).unwrap();
        let result = load_config(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidFrequencyRange { .. }))
        ));
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let base = FilterbankConfig::default();

        let zero = FilterbankConfig {
            num_channels: 0,
            ..base.clone()
        };
        assert_eq!(zero.validate(), Err(ConfigError::NoChannels));

        let inverted = FilterbankConfig {
            low_freq_hz: 4000.0,
            high_freq_hz: 100.0,
            ..base.clone()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvalidFrequencyRange { .. })
        ));

        let equal = FilterbankConfig {
            low_freq_hz: 1000.0,
            high_freq_hz: 1000.0,
            ..base.clone()
        };
        assert!(equal.validate().is_err());

        let at_nyquist = FilterbankConfig {
            high_freq_hz: 8000.0,
            sample_rate_hz: 16000.0,
            ..base.clone()
        };
        assert!(at_nyquist.validate().is_err());

        let bad_order = FilterbankConfig {
            filter_order: MAX_ORDER + 1,
            ..base.clone()
        };
        assert_eq!(
            bad_order.validate(),
            Err(ConfigError::InvalidOrder {
                order: MAX_ORDER + 1,
                max: MAX_ORDER
            })
        );

        let bad_rate = FilterbankConfig {
            sample_rate_hz: f64::NAN,
            ..base
        };
        assert!(matches!(
            bad_rate.validate(),
            Err(ConfigError::InvalidSampleRate(_))
        ));
    }
}
