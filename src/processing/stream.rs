use std::time::Instant;

use super::filterbank::filter_channels;
use super::filters::gammatone::FilterChannel;
use super::output::FilterbankOutput;
use super::signal::validate_samples;
use crate::config::{FilterbankConfig, ProcessorConfig};
use crate::error::Result;
use crate::utils::log::debug_log;

/// Filterbank that keeps channel state between calls, so consecutive chunks
/// of one stream filter exactly as if they were a single signal.
#[derive(Debug, Clone)]
pub struct StreamingFilterbank {
    config: FilterbankConfig,
    processor: ProcessorConfig,
    channels: Vec<FilterChannel>,
    chunk_index: usize,
}

impl StreamingFilterbank {
    pub(crate) fn new(
        config: FilterbankConfig,
        processor: ProcessorConfig,
        mut channels: Vec<FilterChannel>,
    ) -> Self {
        channels.iter_mut().for_each(FilterChannel::reset);
        StreamingFilterbank {
            config,
            processor,
            channels,
            chunk_index: 0,
        }
    }

    /// Filters the next chunk of the stream. An empty or non-finite chunk is
    /// rejected and leaves the state untouched.
    pub fn process_chunk(&mut self, chunk: &[f64]) -> Result<FilterbankOutput> {
        validate_samples(chunk)?;

        let start = Instant::now();
        let output = filter_channels(
            &mut self.channels,
            chunk,
            &self.config,
            self.processor.parallel,
            None,
        )?;
        self.chunk_index += 1;

        if self.processor.enable_debug_logging {
            debug_log(
                "stream chunk",
                &format!(
                    "chunk: {}, samples: {}, total: {}, elapsed: {:?}",
                    self.chunk_index,
                    chunk.len(),
                    self.samples_processed(),
                    start.elapsed()
                ),
            );
        }

        Ok(output)
    }

    /// Drops all carried state; the next chunk starts a new stream.
    pub fn reset(&mut self) {
        self.channels.iter_mut().for_each(FilterChannel::reset);
        self.chunk_index = 0;
    }

    pub fn samples_processed(&self) -> u64 {
        self.channels
            .first()
            .map_or(0, FilterChannel::samples_processed)
    }

    pub fn chunks_processed(&self) -> usize {
        self.chunk_index
    }

    pub fn config(&self) -> &FilterbankConfig {
        &self.config
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{FilterbankConfig, OutputMode};
    use crate::error::{Error, SignalError};
    use crate::processing::filterbank::GammatoneFilterbank;
    use crate::processing::signal::Signal;

    fn filterbank() -> GammatoneFilterbank {
        GammatoneFilterbank::new(FilterbankConfig {
            num_channels: 8,
            low_freq_hz: 80.0,
            high_freq_hz: 3500.0,
            sample_rate_hz: 8000.0,
            output_mode: OutputMode::RealPart,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn counts_samples_and_chunks() {
        let mut stream = filterbank().stream();
        stream.process_chunk(&[0.5; 100]).unwrap();
        stream.process_chunk(&[0.5; 28]).unwrap();
        assert_eq!(stream.samples_processed(), 128);
        assert_eq!(stream.chunks_processed(), 2);

        stream.reset();
        assert_eq!(stream.samples_processed(), 0);
        assert_eq!(stream.chunks_processed(), 0);
    }

    #[test]
    fn reset_restarts_the_stream() {
        let fb = filterbank();
        let chunk: Vec<f64> = (0..256).map(|i| ((i * 7) % 13) as f64 - 6.0).collect();

        let mut stream = fb.stream();
        let first = stream.process_chunk(&chunk).unwrap();
        stream.reset();
        let second = stream.process_chunk(&chunk).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, fb.apply(&Signal::new(chunk, 8000.0)).unwrap());
    }

    #[test]
    fn rejects_bad_chunks_without_advancing() {
        let mut stream = filterbank().stream();
        assert!(matches!(
            stream.process_chunk(&[]),
            Err(Error::Signal(SignalError::Empty))
        ));
        assert!(matches!(
            stream.process_chunk(&[0.0, f64::NAN]),
            Err(Error::Signal(SignalError::NonFinite { index: 1 }))
        ));
        assert_eq!(stream.samples_processed(), 0);
    }
}
