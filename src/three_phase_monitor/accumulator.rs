/// Sufficient statistics of one phase over one calculation cycle.
///
/// A fresh window is started every cycle; the finished one is moved out with
/// `std::mem::take` and handed to the calculator. No raw samples are kept.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccumulationWindow {
    pub sum_v_sq: f64, // Sum of squared zero-centred voltage codes
    pub sum_i_sq: f64, // Sum of squared zero-centred current codes
    pub sum_vi: f64,   // Sum of voltage x current
    pub sample_count: u32,
}

impl AccumulationWindow {
    pub fn push(&mut self, v_sample: f64, i_sample: f64) {
        self.sum_v_sq += v_sample * v_sample;
        self.sum_i_sq += i_sample * i_sample;
        self.sum_vi += v_sample * i_sample;
        self.sample_count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    /// RMS of the voltage channel in converter codes.
    pub fn voltage_rms_codes(&self) -> f64 {
        mean_sqrt(self.sum_v_sq, self.sample_count)
    }

    /// RMS of the current channel in converter codes.
    pub fn current_rms_codes(&self) -> f64 {
        mean_sqrt(self.sum_i_sq, self.sample_count)
    }

    /// Mean instantaneous power in codes squared.
    pub fn mean_power_codes(&self) -> f64 {
        if self.sample_count == 0 {
            return 0.0;
        }
        self.sum_vi / self.sample_count as f64
    }
}

fn mean_sqrt(sum: f64, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }

    let mean = sum / count as f64;
    if mean > 0.0 {
        mean.sqrt()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_collects_squares_and_cross_product() {
        let mut window = AccumulationWindow::default();
        window.push(3.0, -2.0);
        window.push(-1.0, 4.0);

        assert_eq!(window.sum_v_sq, 10.0);
        assert_eq!(window.sum_i_sq, 20.0);
        assert_eq!(window.sum_vi, -10.0);
        assert_eq!(window.sample_count, 2);
        assert_eq!(window.mean_power_codes(), -5.0);
    }

    #[test]
    fn empty_window_has_no_rms() {
        let window = AccumulationWindow::default();
        assert!(window.is_empty());
        assert_eq!(window.voltage_rms_codes(), 0.0);
        assert_eq!(window.mean_power_codes(), 0.0);
    }

    #[test]
    fn take_hands_over_and_restarts_the_window() {
        let mut window = AccumulationWindow::default();
        window.push(5.0, 5.0);

        let finished = std::mem::take(&mut window);

        assert_eq!(finished.sample_count, 1);
        assert_eq!(window, AccumulationWindow::default());
    }
}
