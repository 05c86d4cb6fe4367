use super::clock::Clock;
use super::converter::Converter;
use super::monitor::ThreePhaseMonitor;
use super::types::{Phase, PhaseState};

/*
* @brief Print the results of one phase.
* @param phase Phase being reported
* @param data PhaseState holding the last cycle's results
*/
pub fn print_phase(phase: Phase, data: &PhaseState) {
    log::info!("Phase {}:", phase.as_str());
    log::info!("  Voltage: {:.2} V", data.metrics.vrms);
    log::info!("  Current: {:.3} A", data.metrics.irms);
    log::info!("  Active: {:.2} W", data.metrics.real_power);
    log::info!("  Reactive: {:.2} VAR", data.metrics.reactive_power);
    log::info!("  Apparent: {:.2} VA", data.metrics.apparent_power);
    log::info!("  Factor: {:.3}", data.metrics.power_factor);
    log::info!("  Energy: {:.6} kWh\n", data.energy_kwh);
}

/*
* @brief Print every phase plus the totals.
* @param monitor Monitor to report on
*/
pub fn print_all<V: Converter, I: Converter, C: Clock>(monitor: &ThreePhaseMonitor<V, I, C>) {
    for phase in Phase::ALL {
        print_phase(phase, monitor.phase_state(phase));
    }
    log::info!("Total:");
    log::info!("  Active: {:.2} W", monitor.total_real_power());
    log::info!("  Apparent: {:.2} VA", monitor.total_apparent_power());
    log::info!("  Energy: {:.6} kWh", monitor.total_energy_kwh());
    if monitor.read_errors() > 0 {
        log::warn!("  Failed reads: {}", monitor.read_errors());
    }
}
