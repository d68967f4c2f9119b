//! Single gammatone channel.
//!
//! Base-band impulse-invariant gammatone (Cooke 1993): each input sample is
//! shifted down by the channel's centre frequency, smoothed by `order`
//! cascaded one-pole complex low-pass sections, then shifted back up.

use num_complex::Complex64;
use std::f64::consts::PI;

use super::erb::{bandwidth_correction, erb_bandwidth};
use crate::config::MAX_ORDER;

/// The oscillator phasor is pulled back onto the unit circle this often.
const RENORMALISE_INTERVAL: u64 = 1024;

/// One filtered sample: the smoothed base-band value and its remodulated form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSample {
    pub baseband: Complex64,
    pub output: Complex64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ChannelState {
    delay_line: [Complex64; MAX_ORDER],
    // e^{jωn} for the next sample n
    oscillator: Complex64,
    samples: u64,
}

impl ChannelState {
    fn new() -> Self {
        Self {
            delay_line: [Complex64::new(0.0, 0.0); MAX_ORDER],
            oscillator: Complex64::new(1.0, 0.0),
            samples: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterChannel {
    center_hz: f64,
    bandwidth_hz: f64,
    order: usize,
    // pole radius of each one-pole section
    a: f64,
    rotation: Complex64,
    state: ChannelState,
}

impl FilterChannel {
    /// `order` must be in `1..=MAX_ORDER`; the filterbank config checks this.
    pub fn new(center_hz: f64, order: usize, sample_rate_hz: f64) -> Self {
        debug_assert!(
            (1..=MAX_ORDER).contains(&order),
            "filter order {} outside 1..={}",
            order,
            MAX_ORDER
        );
        let bandwidth_hz = bandwidth_correction(order) * erb_bandwidth(center_hz);
        let tpt = 2.0 * PI / sample_rate_hz;

        FilterChannel {
            center_hz,
            bandwidth_hz,
            order,
            a: (-bandwidth_hz * tpt).exp(),
            rotation: Complex64::from_polar(1.0, center_hz * tpt),
            state: ChannelState::new(),
        }
    }

    pub fn center_hz(&self) -> f64 {
        self.center_hz
    }

    pub fn bandwidth_hz(&self) -> f64 {
        self.bandwidth_hz
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn pole_radius(&self) -> f64 {
        self.a
    }

    pub fn samples_processed(&self) -> u64 {
        self.state.samples
    }

    pub fn reset(&mut self) {
        self.state = ChannelState::new();
    }

    #[inline]
    pub fn process_sample(&mut self, sample: f64) -> ChannelSample {
        let oscillator = self.state.oscillator;
        let gain = 1.0 - self.a;

        // x2 restores unit gain lost to the discarded 2ω image
        let mut value = oscillator.conj() * (2.0 * sample);
        for stage in self.state.delay_line[..self.order].iter_mut() {
            *stage = *stage * self.a + value * gain;
            value = *stage;
        }

        let output = value * oscillator;

        self.state.samples += 1;
        self.state.oscillator = oscillator * self.rotation;
        if self.state.samples % RENORMALISE_INTERVAL == 0 {
            let norm = self.state.oscillator.norm();
            self.state.oscillator = self.state.oscillator.unscale(norm);
        }

        ChannelSample {
            baseband: value,
            output,
        }
    }
}
