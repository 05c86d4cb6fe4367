use super::calibration;
use super::clock::Clock;
use super::converter::{Converter, Quantity};
use super::error::MonitorError;
use super::sampler::RoundRobinSampler;
use super::types::*;

/// Three-phase measurement engine driven by repeated calls to `tick`.
///
/// Owns both converters and all per-phase state. Nothing in here is shared:
/// exclusive `&mut self` access is the whole synchronization story, so a
/// caller that feeds it from several threads wraps it in a `Mutex`.
pub struct ThreePhaseMonitor<V: Converter, I: Converter, C: Clock> {
    pub(super) adc_voltage: V,
    pub(super) adc_current: I,
    pub(super) clock: C,
    pub(super) config: MonitorConfig,
    pub(super) phases: [PhaseState; PHASE_COUNT],
    pub(super) sampler: RoundRobinSampler,
    pub(super) initialized: bool,
    pub(super) ready: bool,
    pub(super) last_calculation_ms: u64,
    pub(super) read_errors: u32,
}

impl<V: Converter, I: Converter, C: Clock> ThreePhaseMonitor<V, I, C> {
    pub fn new(adc_voltage: V, adc_current: I, clock: C, config: MonitorConfig) -> Self {
        let seed = config.offset_seed;
        Self {
            adc_voltage,
            adc_current,
            clock,
            config,
            phases: core::array::from_fn(|_| PhaseState::seeded(PhaseCalibration::default(), seed)),
            sampler: RoundRobinSampler::default(),
            initialized: false,
            ready: false,
            last_calculation_ms: 0,
            read_errors: 0,
        }
    }

    /*
    * @brief Bring up both converters and reset the measurement state.
    * @param voltage_address Bus address of the voltage converter
    * @param current_address Bus address of the current converter
    * @return Ok once both converters acknowledged and accepted their setup
    * @note No phase state is touched unless both converters come up. Calibration
    *       constants set with configure_phase are kept.
    */
    pub fn initialize(
        &mut self,
        voltage_address: u8,
        current_address: u8,
    ) -> Result<(), MonitorError> {
        self.adc_voltage.begin(voltage_address).map_err(|e| {
            log::warn!("voltage converter at {:#04x} not responding: {:?}", voltage_address, e);
            MonitorError::NotAcknowledged {
                quantity: Quantity::Voltage,
                address: voltage_address,
            }
        })?;
        self.adc_current.begin(current_address).map_err(|e| {
            log::warn!("current converter at {:#04x} not responding: {:?}", current_address, e);
            MonitorError::NotAcknowledged {
                quantity: Quantity::Current,
                address: current_address,
            }
        })?;

        let (gain, data_rate) = (self.config.gain, self.config.data_rate);
        self.adc_voltage
            .configure(gain, data_rate)
            .map_err(|e| MonitorError::Configure {
                quantity: Quantity::Voltage,
                detail: format!("{:?}", e),
            })?;
        self.adc_current
            .configure(gain, data_rate)
            .map_err(|e| MonitorError::Configure {
                quantity: Quantity::Current,
                detail: format!("{:?}", e),
            })?;

        let seed = self.config.offset_seed;
        for phase in self.phases.iter_mut() {
            *phase = PhaseState::seeded(phase.calibration, seed);
        }
        self.sampler.reset();
        self.ready = false;
        self.read_errors = 0;
        self.last_calculation_ms = self.clock.now_ms();
        self.initialized = true;

        log::info!(
            "converters up (voltage {:#04x}, current {:#04x}), gain {:?}, {} SPS, interval {} ms",
            voltage_address,
            current_address,
            gain,
            data_rate.samples_per_second(),
            self.config.interval_ms
        );

        Ok(())
    }

    /// Sets the sensor scaling of one phase. Indices outside 0..3 are ignored,
    /// as are ratios and burdens that are not finite and positive.
    pub fn configure_phase(
        &mut self,
        phase: usize,
        voltage_ratio: f64,
        current_ratio: f64,
        burden_ohms: f64,
    ) {
        let Some(phase) = Phase::from_index(phase) else {
            return;
        };

        if !is_positive_scale(burden_ohms) {
            log::warn!("{}: rejecting burden resistance {} ohm", phase.as_str(), burden_ohms);
            return;
        }
        if !(is_positive_scale(voltage_ratio) && is_positive_scale(current_ratio)) {
            log::warn!(
                "{}: rejecting transformer ratios V {} / I {}",
                phase.as_str(),
                voltage_ratio,
                current_ratio
            );
            return;
        }

        self.phases[phase.index()].calibration = PhaseCalibration {
            voltage_ratio,
            current_ratio,
            burden_ohms,
        };
    }

    pub fn calibrate_offsets_default(&mut self) {
        self.calibrate_offsets(DEFAULT_CALIBRATION_SAMPLES);
    }

    /*
    * @brief Seed every channel's offset with the mean of sample_count readings.
    * @param sample_count Passes over the three channels (0 does nothing)
    * @note Blocking. The interval timer restarts afterwards so the calibration
    *       time is not charged to the first calculation cycle.
    */
    pub fn calibrate_offsets(&mut self, sample_count: u16) {
        if sample_count == 0 {
            log::warn!("offset calibration requested with zero samples, keeping current offsets");
            return;
        }

        let measured = calibration::measure_offsets(
            &mut self.adc_voltage,
            &mut self.adc_current,
            sample_count,
        );
        self.read_errors = self.read_errors.saturating_add(measured.read_errors);

        for phase in Phase::ALL {
            let state = &mut self.phases[phase.index()];
            if let Some(offset) = measured.voltage[phase.index()] {
                state.offsets.voltage = offset;
            }
            if let Some(offset) = measured.current[phase.index()] {
                state.offsets.current = offset;
            }
            log::info!(
                "{} -> V offset: {:.1}, I offset: {:.1}",
                phase.as_str(),
                state.offsets.voltage,
                state.offsets.current
            );
        }

        if measured.read_errors > 0 {
            log::warn!("{} converter reads failed during offset calibration", measured.read_errors);
        }

        self.last_calculation_ms = self.clock.now_ms();
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Gives the converters back, e.g. to hand the bus to someone else.
    pub fn release(self) -> (V, I) {
        (self.adc_voltage, self.adc_current)
    }
}

fn is_positive_scale(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
