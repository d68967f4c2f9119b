use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;
use std::time::Instant;

use super::cancel::{CancelToken, CANCEL_CHECK_INTERVAL};
use super::filters::erb::erb_space;
use super::filters::gammatone::FilterChannel;
use super::output::{ChannelAnalysis, ChannelOutput, FilterbankOutput};
use super::signal::Signal;
use super::stream::StreamingFilterbank;
use crate::config::{ChannelOrder, Config, FilterbankConfig, OutputMode, ProcessorConfig};
use crate::error::{ConfigError, Error, Result};
use crate::utils::log::debug_log;

// -----------------------------------------------------------------------------
// GAMMATONE FILTERBANK
// -----------------------------------------------------------------------------

/// Bank of ERB-spaced gammatone channels. Immutable once built; every
/// [`apply`](Self::apply) starts from zeroed channel state.
#[derive(Debug, Clone)]
pub struct GammatoneFilterbank {
    config: FilterbankConfig,
    processor: ProcessorConfig,
    channels: Vec<FilterChannel>,
}

impl GammatoneFilterbank {
    pub fn new(config: FilterbankConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_processor(config, ProcessorConfig::default())
    }

    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        Self::with_processor(config.filterbank.clone(), config.processor.clone())
    }

    pub fn with_processor(
        config: FilterbankConfig,
        processor: ProcessorConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let mut center_frequencies =
            erb_space(config.low_freq_hz, config.high_freq_hz, config.num_channels);
        if config.channel_order == ChannelOrder::Descending {
            center_frequencies.reverse();
        }

        let channels = center_frequencies
            .into_iter()
            .map(|cf| FilterChannel::new(cf, config.filter_order, config.sample_rate_hz))
            .collect();

        let filterbank = GammatoneFilterbank {
            config,
            processor,
            channels,
        };

        if filterbank.processor.enable_debug_logging {
            debug_log("filterbank created", &filterbank.describe());
        }

        Ok(filterbank)
    }

    pub fn config(&self) -> &FilterbankConfig {
        &self.config
    }

    pub fn processor_config(&self) -> &ProcessorConfig {
        &self.processor
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn channels(&self) -> &[FilterChannel] {
        &self.channels
    }

    pub fn center_frequencies(&self) -> Vec<f64> {
        self.channels.iter().map(FilterChannel::center_hz).collect()
    }

    pub fn bandwidths(&self) -> Vec<f64> {
        self.channels.iter().map(FilterChannel::bandwidth_hz).collect()
    }

    /// Filters `signal` through every channel.
    pub fn apply(&self, signal: &Signal) -> Result<FilterbankOutput> {
        self.run(signal, None)
    }

    /// As [`apply`](Self::apply), aborting with [`Error::Cancelled`] once
    /// `token` is set. Checked every [`CANCEL_CHECK_INTERVAL`] samples.
    pub fn apply_with_cancel(
        &self,
        signal: &Signal,
        token: &CancelToken,
    ) -> Result<FilterbankOutput> {
        self.run(signal, Some(token))
    }

    /// Displacement, envelope, instantaneous phase and frequency per channel.
    pub fn analyse(&self, signal: &Signal) -> Result<Vec<ChannelAnalysis>> {
        signal.validate(self.config.sample_rate_hz)?;

        let start = Instant::now();
        let samples = signal.samples();
        let fs = self.config.sample_rate_hz;
        let hrect = self.config.half_wave_rectify;

        let run = |channel: &FilterChannel| {
            let mut channel = channel.clone();
            analyse_channel(&mut channel, samples, fs, hrect)
        };
        let analyses: Vec<ChannelAnalysis> = if self.processor.parallel {
            self.channels.par_iter().map(run).collect()
        } else {
            self.channels.iter().map(run).collect()
        };

        if self.processor.enable_debug_logging {
            debug_log(
                "analyse",
                &format!(
                    "samples: {}, channels: {}, elapsed: {:?}",
                    samples.len(),
                    analyses.len(),
                    start.elapsed()
                ),
            );
        }

        Ok(analyses)
    }

    /// Stateful front end for block-wise processing of one logical stream.
    pub fn stream(&self) -> StreamingFilterbank {
        StreamingFilterbank::new(
            self.config.clone(),
            self.processor.clone(),
            self.channels.clone(),
        )
    }

    fn run(&self, signal: &Signal, token: Option<&CancelToken>) -> Result<FilterbankOutput> {
        signal.validate(self.config.sample_rate_hz)?;

        let start = Instant::now();
        let mut channels = self.channels.clone();
        let output = filter_channels(
            &mut channels,
            signal.samples(),
            &self.config,
            self.processor.parallel,
            token,
        )?;

        if self.processor.enable_debug_logging {
            debug_log(
                "apply",
                &format!(
                    "samples: {}, channels: {}, mode: {:?}, parallel: {}, elapsed: {:?}",
                    signal.len(),
                    output.num_channels(),
                    self.config.output_mode,
                    self.processor.parallel,
                    start.elapsed()
                ),
            );
        }

        Ok(output)
    }

    fn describe(&self) -> String {
        let mut lines = vec![format!(
            "channels: {}, range: {}-{} Hz, fs: {} Hz, order: {}, mode: {:?}",
            self.config.num_channels,
            self.config.low_freq_hz,
            self.config.high_freq_hz,
            self.config.sample_rate_hz,
            self.config.filter_order,
            self.config.output_mode
        )];
        for (index, channel) in self.channels.iter().enumerate() {
            lines.push(format!(
                "  [{}] cf: {:.2} Hz, bw: {:.2} Hz",
                index,
                channel.center_hz(),
                channel.bandwidth_hz()
            ));
        }
        lines.join("\n")
    }
}

// -----------------------------------------------------------------------------
// CHANNEL PIPELINES
// -----------------------------------------------------------------------------

/// Runs `samples` through each channel, carrying on from the channel's
/// current state. Shared by one-shot and streaming filtering.
pub(crate) fn filter_channels(
    channels: &mut [FilterChannel],
    samples: &[f64],
    config: &FilterbankConfig,
    parallel: bool,
    token: Option<&CancelToken>,
) -> Result<FilterbankOutput> {
    let mode = config.output_mode;
    let hrect = config.half_wave_rectify;
    let run = |channel: &mut FilterChannel| filter_channel(channel, samples, mode, hrect, token);

    let outputs: Result<Vec<ChannelOutput>> = if parallel {
        channels.par_iter_mut().map(run).collect()
    } else {
        channels.iter_mut().map(run).collect()
    };

    Ok(FilterbankOutput::new(outputs?))
}

fn filter_channel(
    channel: &mut FilterChannel,
    samples: &[f64],
    mode: OutputMode,
    hrect: bool,
    token: Option<&CancelToken>,
) -> Result<ChannelOutput> {
    let mut real = Vec::new();
    let mut complex = Vec::new();
    match mode {
        OutputMode::Complex => complex.reserve_exact(samples.len()),
        _ => real.reserve_exact(samples.len()),
    }

    for block in samples.chunks(CANCEL_CHECK_INTERVAL) {
        if token.map_or(false, CancelToken::is_cancelled) {
            return Err(Error::Cancelled);
        }

        for &sample in block {
            let filtered = channel.process_sample(sample);
            match mode {
                OutputMode::Envelope => real.push(filtered.baseband.norm()),
                OutputMode::RealPart => real.push(rectify(filtered.output.re, hrect)),
                OutputMode::Complex => complex.push(filtered.output),
            }
        }
    }

    Ok(match mode {
        OutputMode::Complex => ChannelOutput::Complex(complex),
        _ => ChannelOutput::Real(real),
    })
}

fn analyse_channel(
    channel: &mut FilterChannel,
    samples: &[f64],
    sample_rate_hz: f64,
    hrect: bool,
) -> ChannelAnalysis {
    let n = samples.len();
    let center_hz = channel.center_hz();
    let mut analysis = ChannelAnalysis {
        center_hz,
        basilar_membrane: Vec::with_capacity(n),
        envelope: Vec::with_capacity(n),
        instantaneous_phase: Vec::with_capacity(n),
        instantaneous_frequency: Vec::with_capacity(n),
    };

    let mut previous_phase = 0.0;
    let mut unwrapped_phase = 0.0;

    for &sample in samples {
        let filtered = channel.process_sample(sample);
        let phase = phase_of(filtered.baseband);
        let delta = wrap_phase(phase - previous_phase);
        previous_phase = phase;
        unwrapped_phase += delta;

        analysis
            .basilar_membrane
            .push(rectify(filtered.output.re, hrect));
        analysis.envelope.push(filtered.baseband.norm());
        analysis.instantaneous_phase.push(unwrapped_phase);
        analysis
            .instantaneous_frequency
            .push(center_hz + delta * sample_rate_hz / (2.0 * PI));
    }

    analysis
}

#[inline]
fn rectify(value: f64, hrect: bool) -> f64 {
    if hrect && value < 0.0 {
        0.0
    } else {
        value
    }
}

#[inline]
fn phase_of(value: Complex64) -> f64 {
    value.im.atan2(value.re)
}

/// Wraps a phase difference into (-π, π].
#[inline]
fn wrap_phase(delta: f64) -> f64 {
    let mut d = delta;
    while d > PI {
        d -= 2.0 * PI;
    }
    while d <= -PI {
        d += 2.0 * PI;
    }
    d
}
