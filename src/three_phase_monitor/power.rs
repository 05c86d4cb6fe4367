use super::accumulator::AccumulationWindow;
use super::types::{
    PhaseCalibration, PowerMetrics, APPARENT_POWER_NOISE_FLOOR, MIN_SAMPLES_PER_CYCLE,
};

pub fn calculate_apparent_power_from_rms(vrms: f64, irms: f64) -> f64 {
    vrms * irms
}

pub fn calculate_power_factor_from_apparent_and_real_power(
    apparent_power: f64,
    real_power: f64,
) -> f64 {
    let ratio = real_power / apparent_power;
    if !ratio.is_finite() {
        return 1.0;
    }

    ratio.clamp(-1.0, 1.0)
}

/*
* @brief Reactive power from apparent and real power.
* @note Rounding can leave |P| >= S, in which case there is no reactive part to report.
*/
pub fn calculate_react_power_from_apparent_and_real_power(
    apparent_power: f64,
    real_power: f64,
) -> f64 {
    if apparent_power > real_power.abs() {
        (apparent_power.powi(2) - real_power.powi(2)).sqrt()
    } else {
        0.0
    }
}

/*
* @brief Turn a finished accumulation window into calibrated power metrics.
* @param window Sums collected for the phase during the cycle
* @param calibration Sensor scaling of the phase
* @param lsb_volts Volts per converter code (full scale / max code)
* @return PowerMetrics for the cycle
* @note Fewer than MIN_SAMPLES_PER_CYCLE samples, or a scaling that overflows,
*       yields PowerMetrics::idle().
*/
pub fn calculate_phase(
    window: &AccumulationWindow,
    calibration: &PhaseCalibration,
    lsb_volts: f64,
) -> PowerMetrics {
    if window.sample_count < MIN_SAMPLES_PER_CYCLE {
        return PowerMetrics::idle();
    }

    let v_rms_codes = window.voltage_rms_codes();
    let i_rms_codes = window.current_rms_codes();

    let vrms = v_rms_codes * lsb_volts * calibration.voltage_ratio;
    let irms = i_rms_codes * lsb_volts / calibration.burden_ohms * calibration.current_ratio;

    let apparent_power = calculate_apparent_power_from_rms(vrms, irms);
    if !apparent_power.is_finite() {
        log::warn!("apparent power overflowed ({} V, {} A), check the phase ratios", vrms, irms);
        return PowerMetrics::idle();
    }

    // Real power reuses the per-channel scale implied by the RMS values so that
    // the power factor stays consistent with them.
    let (real_power, power_factor) = if apparent_power > APPARENT_POWER_NOISE_FLOOR {
        let calibration_factor = (vrms / v_rms_codes) * (irms / i_rms_codes);
        let real_power = window.mean_power_codes() * calibration_factor;
        (
            real_power,
            calculate_power_factor_from_apparent_and_real_power(apparent_power, real_power),
        )
    } else {
        (0.0, 1.0)
    };

    PowerMetrics {
        vrms,
        irms,
        real_power,
        apparent_power,
        reactive_power: calculate_react_power_from_apparent_and_real_power(
            apparent_power,
            real_power,
        ),
        power_factor,
    }
}
