use super::types::OFFSET_ALPHA;

/*
* @brief Exponential moving average step.
* @param previous Current filter output
* @param input New raw value
* @param alpha Weight of the new value
* @return Updated filter output
*/
pub fn smooth(previous: f64, input: f64, alpha: f64) -> f64 {
    (1.0 - alpha) * previous + alpha * input
}

/// DC bias estimate of one phase's voltage and current channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OffsetTracker {
    pub voltage: f64,
    pub current: f64,
}

impl OffsetTracker {
    pub fn seeded(seed: f64) -> Self {
        Self {
            voltage: seed,
            current: seed,
        }
    }

    /*
    * @brief Track the offset with a raw sample pair and remove it.
    * @param v_raw Raw voltage code
    * @param i_raw Raw current code
    * @return (voltage, current) samples centred on zero
    * @note The filter runs on the raw codes and the freshly updated offset is subtracted.
    */
    pub fn update(&mut self, v_raw: i16, i_raw: i16) -> (f64, f64) {
        let v_raw = v_raw as f64;
        let i_raw = i_raw as f64;

        self.voltage = smooth(self.voltage, v_raw, OFFSET_ALPHA);
        self.current = smooth(self.current, i_raw, OFFSET_ALPHA);

        (v_raw - self.voltage, i_raw - self.current)
    }
}
