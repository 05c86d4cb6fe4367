use super::clock::Clock;
use super::converter::Converter;
use super::monitor::ThreePhaseMonitor;
use super::types::{Phase, PhaseState, PowerMetrics};

// Index based getters return 0.0 for anything outside 0..3.
impl<V: Converter, I: Converter, C: Clock> ThreePhaseMonitor<V, I, C> {
    fn metric_at(&self, phase: usize, pick: impl Fn(&PhaseState) -> f64) -> f64 {
        self.phases.get(phase).map(pick).unwrap_or(0.0)
    }

    pub fn vrms(&self, phase: usize) -> f64 {
        self.metric_at(phase, |p| p.metrics.vrms)
    }

    pub fn irms(&self, phase: usize) -> f64 {
        self.metric_at(phase, |p| p.metrics.irms)
    }

    pub fn real_power(&self, phase: usize) -> f64 {
        self.metric_at(phase, |p| p.metrics.real_power)
    }

    pub fn apparent_power(&self, phase: usize) -> f64 {
        self.metric_at(phase, |p| p.metrics.apparent_power)
    }

    pub fn reactive_power(&self, phase: usize) -> f64 {
        self.metric_at(phase, |p| p.metrics.reactive_power)
    }

    pub fn power_factor(&self, phase: usize) -> f64 {
        self.metric_at(phase, |p| p.metrics.power_factor)
    }

    pub fn energy_kwh(&self, phase: usize) -> f64 {
        self.metric_at(phase, |p| p.energy_kwh)
    }

    pub fn metrics(&self, phase: Phase) -> &PowerMetrics {
        &self.phases[phase.index()].metrics
    }

    pub fn phase_state(&self, phase: Phase) -> &PhaseState {
        &self.phases[phase.index()]
    }

    /// True once at least one calculation cycle has completed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Converter reads that failed since the last initialize.
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    pub fn total_real_power(&self) -> f64 {
        self.phases.iter().map(|p| p.metrics.real_power).sum()
    }

    pub fn total_apparent_power(&self) -> f64 {
        self.phases.iter().map(|p| p.metrics.apparent_power).sum()
    }

    pub fn total_energy_kwh(&self) -> f64 {
        self.phases.iter().map(|p| p.energy_kwh).sum()
    }
}
