use super::clock::Clock;
use super::converter::Converter;
use super::energy;
use super::monitor::ThreePhaseMonitor;
use super::power;
use super::types::{Phase, Tick};

impl<V: Converter, I: Converter, C: Clock> ThreePhaseMonitor<V, I, C> {
    /*
    * @brief Advance the monitor by one step.
    * @return What the step did
    * @note Before the interval elapses this reads one voltage/current pair on the
    *       selected channel and moves to the next channel. Once it has elapsed, all
    *       three phases are recalculated instead and no sample is taken.
    */
    pub fn tick(&mut self) -> Tick {
        if !self.initialized {
            return Tick::Idle;
        }

        let now = self.clock.now_ms();
        if now.saturating_sub(self.last_calculation_ms) >= self.config.interval_ms {
            self.last_calculation_ms = now;
            self.calculate_all();
            return Tick::Calculated;
        }

        let phase = self.sampler.advance();
        let v_raw = self.adc_voltage.read_channel(phase.channel());
        let i_raw = self.adc_current.read_channel(phase.channel());

        match (v_raw, i_raw) {
            (Ok(v_raw), Ok(i_raw)) => {
                self.submit_sample(phase, v_raw, i_raw);
                Tick::Sampled(phase)
            }
            (v_raw, i_raw) => {
                self.read_errors = self.read_errors.saturating_add(1);
                log::warn!(
                    "{} sample dropped (voltage: {:?}, current: {:?})",
                    phase.as_str(),
                    v_raw.err(),
                    i_raw.err()
                );
                Tick::ReadFailed(phase)
            }
        }
    }

    /*
    * @brief Feed one raw sample pair of a phase into its offset filter and window.
    * @param phase Phase the pair was read from
    * @param v_raw Raw voltage code
    * @param i_raw Raw current code
    * @note Entry point for callers that acquire samples themselves.
    */
    pub fn submit_sample(&mut self, phase: Phase, v_raw: i16, i_raw: i16) {
        let state = &mut self.phases[phase.index()];
        let (v_sample, i_sample) = state.offsets.update(v_raw, i_raw);
        state.window.push(v_sample, i_sample);
    }

    /// Closes the current window of every phase and publishes fresh results.
    pub(super) fn calculate_all(&mut self) {
        let lsb_volts = self.config.lsb_volts();
        let interval_ms = self.config.interval_ms;

        for phase in Phase::ALL {
            let state = &mut self.phases[phase.index()];
            let window = std::mem::take(&mut state.window);

            state.metrics = power::calculate_phase(&window, &state.calibration, lsb_volts);
            energy::update_total_energy(state, interval_ms);

            log::debug!(
                "{}: {} samples, {:.2} V, {:.3} A, {:.1} W, pf {:.3}",
                phase.as_str(),
                window.sample_count,
                state.metrics.vrms,
                state.metrics.irms,
                state.metrics.real_power,
                state.metrics.power_factor
            );
        }

        self.ready = true;
    }
}
