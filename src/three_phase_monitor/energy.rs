use super::types::{PhaseState, JOULES_PER_KWH};

/*
 * Energy delivered during one calculation cycle, in kWh.
 *
 * Only positive flow is counted: a cycle with zero or negative real power adds
 * nothing and never subtracts from the running total.
 */
pub fn energy_increment_kwh(real_power: f64, interval_ms: u64) -> f64 {
    let elapsed_seconds = interval_ms as f64 / 1000.0;
    let joules = real_power * elapsed_seconds;

    if joules > 0.0 {
        joules / JOULES_PER_KWH
    } else {
        0.0
    }
}

/// Adds the cycle's energy to the phase's cumulative counter.
pub fn update_total_energy(phase: &mut PhaseState, interval_ms: u64) {
    phase.energy_kwh += energy_increment_kwh(phase.metrics.real_power, interval_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_kilowatt_for_an_hour_is_one_kwh() {
        let per_second = energy_increment_kwh(1000.0, 1000);
        assert!((per_second * 3600.0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reverse_flow_is_not_subtracted() {
        assert_eq!(energy_increment_kwh(-500.0, 1000), 0.0);
        assert_eq!(energy_increment_kwh(0.0, 1000), 0.0);
    }

    #[test]
    fn total_follows_configured_interval() {
        let mut phase = PhaseState::default();
        phase.metrics.real_power = 3600.0;

        update_total_energy(&mut phase, 2000);
        assert!((phase.energy_kwh - 0.002).abs() < 1e-12);

        phase.metrics.real_power = -3600.0;
        update_total_energy(&mut phase, 2000);
        assert!((phase.energy_kwh - 0.002).abs() < 1e-12);
    }
}
