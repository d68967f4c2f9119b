use num_complex::Complex64;

use crate::error::{Error, Result};

/// Filtered samples of one channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelOutput {
    Real(Vec<f64>),
    Complex(Vec<Complex64>),
}

impl ChannelOutput {
    pub fn len(&self) -> usize {
        match self {
            ChannelOutput::Real(samples) => samples.len(),
            ChannelOutput::Complex(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            ChannelOutput::Real(samples) => Some(samples),
            ChannelOutput::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<&[Complex64]> {
        match self {
            ChannelOutput::Complex(samples) => Some(samples),
            ChannelOutput::Real(_) => None,
        }
    }

    fn same_mode(&self, other: &ChannelOutput) -> bool {
        matches!(
            (self, other),
            (ChannelOutput::Real(_), ChannelOutput::Real(_))
                | (ChannelOutput::Complex(_), ChannelOutput::Complex(_))
        )
    }

    fn mode_name(&self) -> &'static str {
        match self {
            ChannelOutput::Real(_) => "real",
            ChannelOutput::Complex(_) => "complex",
        }
    }

    /// Appends `other`; callers check [`same_mode`](Self::same_mode) first.
    fn extend(&mut self, other: ChannelOutput) {
        match (self, other) {
            (ChannelOutput::Real(a), ChannelOutput::Real(b)) => a.extend(b),
            (ChannelOutput::Complex(a), ChannelOutput::Complex(b)) => a.extend(b),
            (a, b) => unreachable!(
                "{} block appended to {} channel",
                b.mode_name(),
                a.mode_name()
            ),
        }
    }
}

/// One output sequence per channel, in channel order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterbankOutput {
    channels: Vec<ChannelOutput>,
}

impl FilterbankOutput {
    pub fn new(channels: Vec<ChannelOutput>) -> Self {
        Self { channels }
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Length of every channel (they are all equal).
    pub fn num_samples(&self) -> usize {
        self.channels.first().map_or(0, ChannelOutput::len)
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelOutput> {
        self.channels.get(index)
    }

    pub fn channels(&self) -> &[ChannelOutput] {
        &self.channels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChannelOutput> {
        self.channels.iter()
    }

    pub fn into_channels(self) -> Vec<ChannelOutput> {
        self.channels
    }

    /// Concatenates a following block of the same stream onto this one.
    ///
    /// The block must have the same channel count and output mode; otherwise
    /// `Error::OutputMismatch` is returned and `self` is left unchanged.
    pub fn append(&mut self, next: FilterbankOutput) -> Result<()> {
        if self.channels.is_empty() {
            self.channels = next.channels;
            return Ok(());
        }
        if next.channels.len() != self.channels.len() {
            return Err(Error::OutputMismatch(format!(
                "{} channels appended to {}",
                next.channels.len(),
                self.channels.len()
            )));
        }
        if let Some((channel, tail)) = self
            .channels
            .iter()
            .zip(&next.channels)
            .find(|(channel, tail)| !channel.same_mode(tail))
        {
            return Err(Error::OutputMismatch(format!(
                "{} block appended to {} output",
                tail.mode_name(),
                channel.mode_name()
            )));
        }

        for (channel, tail) in self.channels.iter_mut().zip(next.channels) {
            channel.extend(tail);
        }
        Ok(())
    }
}

/// Full per-channel decomposition: displacement, envelope, phase, frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelAnalysis {
    pub center_hz: f64,
    /// Real part of the channel output (basilar membrane displacement).
    pub basilar_membrane: Vec<f64>,
    pub envelope: Vec<f64>,
    /// Unwrapped base-band phase in radians.
    pub instantaneous_phase: Vec<f64>,
    pub instantaneous_frequency: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_concatenates_each_channel() {
        let mut out = FilterbankOutput::default();
        out.append(FilterbankOutput::new(vec![
            ChannelOutput::Real(vec![1.0]),
            ChannelOutput::Real(vec![2.0]),
        ]))
        .unwrap();
        out.append(FilterbankOutput::new(vec![
            ChannelOutput::Real(vec![3.0, 4.0]),
            ChannelOutput::Real(vec![5.0, 6.0]),
        ]))
        .unwrap();

        assert_eq!(out.num_channels(), 2);
        assert_eq!(out.num_samples(), 3);
        assert_eq!(out.channel(0).unwrap().as_real(), Some(&[1.0, 3.0, 4.0][..]));
        assert_eq!(out.channel(1).unwrap().as_real(), Some(&[2.0, 5.0, 6.0][..]));
    }

    #[test]
    fn append_rejects_mismatched_blocks() {
        let mut out = FilterbankOutput::new(vec![
            ChannelOutput::Real(vec![1.0]),
            ChannelOutput::Real(vec![2.0]),
        ]);
        let before = out.clone();

        let fewer_channels =
            out.append(FilterbankOutput::new(vec![ChannelOutput::Real(vec![3.0])]));
        assert!(matches!(fewer_channels, Err(Error::OutputMismatch(_))));

        let other_mode = out.append(FilterbankOutput::new(vec![
            ChannelOutput::Real(vec![3.0]),
            ChannelOutput::Complex(vec![Complex64::new(4.0, 0.0)]),
        ]));
        assert!(matches!(other_mode, Err(Error::OutputMismatch(_))));

        assert_eq!(out, before);
    }

    #[test]
    fn accessors_match_variant() {
        let real = ChannelOutput::Real(vec![0.0; 3]);
        let complex = ChannelOutput::Complex(vec![Complex64::new(0.0, 1.0)]);
        assert!(real.as_complex().is_none());
        assert_eq!(complex.as_complex().map(|c| c.len()), Some(1));
        assert!(!complex.is_empty());
    }
}
