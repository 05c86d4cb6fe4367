use std::f64::consts::PI;

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::converter::Converter;
use super::types::{DataRate, Gain, PHASE_COUNT};

const PHASE_SPACING_DEG: f64 = 120.0;

fn offset(deg: f64) -> f64 {
    deg * 2.0 * PI / 360.0
}

/// Waveform produced by a simulated converter.
#[derive(Debug, Clone)]
pub struct SimulationProfile {
    pub address: u8,          // Bus address the converter answers on
    pub offset_codes: f64,    // DC bias of every channel
    pub peak_codes: f64,      // Amplitude of the sine
    pub line_frequency: f64,  // Hz
    pub sample_rate: f64,     // Reads per second
    pub phase_shift_deg: f64, // Added to every channel, e.g. the load angle of the currents
    pub noise_percent: f64,   // Uniform noise, percent of peak
    pub seed: u64,
}

impl SimulationProfile {
    pub fn voltage() -> Self {
        Self {
            address: 0x48,
            offset_codes: 13200.0,
            peak_codes: 10000.0,
            line_frequency: 50.0,
            sample_rate: 860.0,
            phase_shift_deg: 0.0,
            noise_percent: 0.0,
            seed: 1,
        }
    }

    pub fn current() -> Self {
        Self {
            address: 0x49,
            peak_codes: 8000.0,
            seed: 2,
            ..Self::voltage()
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("no device at address {0:#04x}")]
    NotAcknowledged(u8),
    #[error("converter is offline")]
    Offline,
    #[error("channel {0} does not exist")]
    InvalidChannel(u8),
}

/// Converter that plays back synthetic three-phase sinusoids.
///
/// One second of each channel is generated up front; every read, whatever the
/// channel, moves the converter's sample clock forward by one sample.
#[derive(Debug, Clone)]
pub struct SimulatedAdc {
    profile: SimulationProfile,
    waves: Array2<f64>,
    position: usize,
    rng: StdRng,
    online: bool,
    setup: Option<(Gain, DataRate)>,
    reads: u64,
}

impl SimulatedAdc {
    pub fn new(profile: SimulationProfile) -> Self {
        let length = (profile.sample_rate.round() as usize).max(1);
        let samples = Array1::range(0.0, length as f64, 1.0);
        let mut waves = Array2::zeros((PHASE_COUNT, length));

        for channel in 0..PHASE_COUNT {
            let shift = offset(profile.phase_shift_deg - channel as f64 * PHASE_SPACING_DEG);
            let step = 2.0 * PI * profile.line_frequency / profile.sample_rate;
            let wave = samples.mapv(|s| {
                profile.offset_codes + profile.peak_codes * (shift + step * s).sin()
            });
            waves.row_mut(channel).assign(&wave);
        }

        Self {
            rng: StdRng::seed_from_u64(profile.seed),
            profile,
            waves,
            position: 0,
            online: false,
            setup: None,
            reads: 0,
        }
    }

    /// Gain and data rate last written by `configure`.
    pub fn setup(&self) -> Option<(Gain, DataRate)> {
        self.setup
    }

    /// Successful reads since construction.
    pub fn reads(&self) -> u64 {
        self.reads
    }

    fn noise(&mut self) -> f64 {
        if self.profile.noise_percent <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-1.0..1.0) * self.profile.peak_codes * self.profile.noise_percent / 100.0
    }
}

impl Converter for SimulatedAdc {
    type Error = SimulationError;

    fn begin(&mut self, address: u8) -> Result<(), Self::Error> {
        if address != self.profile.address {
            return Err(SimulationError::NotAcknowledged(address));
        }
        self.online = true;
        Ok(())
    }

    fn configure(&mut self, gain: Gain, data_rate: DataRate) -> Result<(), Self::Error> {
        if !self.online {
            return Err(SimulationError::Offline);
        }
        self.setup = Some((gain, data_rate));
        Ok(())
    }

    fn read_channel(&mut self, channel: u8) -> Result<i16, Self::Error> {
        if !self.online {
            return Err(SimulationError::Offline);
        }
        if channel as usize >= PHASE_COUNT {
            return Err(SimulationError::InvalidChannel(channel));
        }

        let value = self.waves[[channel as usize, self.position]] + self.noise();
        self.position = (self.position + 1) % self.waves.ncols();
        self.reads += 1;

        Ok(value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16)
    }
}
