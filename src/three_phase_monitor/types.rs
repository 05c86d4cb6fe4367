use super::accumulator::AccumulationWindow;
use super::offset::OffsetTracker;

/// Number of phases in the supply. Physical invariant, not a tunable.
pub const PHASE_COUNT: usize = 3;

pub const OFFSET_ALPHA: f64 = 0.001; // Smoothing coefficient of the DC offset filter
pub const MIN_SAMPLES_PER_CYCLE: u32 = 10;
pub const APPARENT_POWER_NOISE_FLOOR: f64 = 1.0; // VA

pub const DEFAULT_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_OFFSET_SEED: f64 = 13200.0; // Raw codes, mid-rail of a biased sensor
pub const DEFAULT_CALIBRATION_SAMPLES: u16 = 1024;

pub const ADC_MAX_CODE: f64 = 32767.0; // 16 bit signed converter
pub const JOULES_PER_KWH: f64 = 3_600_000.0;

/// One leg of the three-phase supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    L1,
    L2,
    L3,
}

impl Phase {
    pub const ALL: [Phase; PHASE_COUNT] = [Phase::L1, Phase::L2, Phase::L3];

    pub fn index(self) -> usize {
        match self {
            Phase::L1 => 0,
            Phase::L2 => 1,
            Phase::L3 => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Phase> {
        Phase::ALL.get(index).copied()
    }

    /// Converter channel wired to this phase.
    pub fn channel(self) -> u8 {
        self.index() as u8
    }

    pub fn next(self) -> Phase {
        match self {
            Phase::L1 => Phase::L2,
            Phase::L2 => Phase::L3,
            Phase::L3 => Phase::L1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::L1 => "L1",
            Phase::L2 => "L2",
            Phase::L3 => "L3",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::L1
    }
}

/// Programmable gain of the converter front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gain {
    TwoThirds,
    One,
    Two,
    Four,
    Eight,
    Sixteen,
}

impl Gain {
    /// Input voltage that maps to the maximum code.
    pub fn full_scale_volts(&self) -> f64 {
        match self {
            Gain::TwoThirds => 6.144,
            Gain::One => 4.096,
            Gain::Two => 2.048,
            Gain::Four => 1.024,
            Gain::Eight => 0.512,
            Gain::Sixteen => 0.256,
        }
    }
}

impl Default for Gain {
    fn default() -> Self {
        Gain::One
    }
}

/// Conversion rate of the converter, in samples per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRate {
    Sps8,
    Sps16,
    Sps32,
    Sps64,
    Sps128,
    Sps250,
    Sps475,
    Sps860,
}

impl DataRate {
    pub fn samples_per_second(&self) -> u32 {
        match self {
            DataRate::Sps8 => 8,
            DataRate::Sps16 => 16,
            DataRate::Sps32 => 32,
            DataRate::Sps64 => 64,
            DataRate::Sps128 => 128,
            DataRate::Sps250 => 250,
            DataRate::Sps475 => 475,
            DataRate::Sps860 => 860,
        }
    }
}

impl Default for DataRate {
    fn default() -> Self {
        DataRate::Sps860
    }
}

/// Monitor-wide settings, fixed at construction.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub interval_ms: u64,     // Length of a calculation cycle
    pub gain: Gain,           // Applied to both converters
    pub data_rate: DataRate,  // Applied to both converters
    pub offset_seed: f64,     // Offset written to every channel on initialize
}

impl MonitorConfig {
    pub fn full_scale_volts(&self) -> f64 {
        self.gain.full_scale_volts()
    }

    /// Volts represented by one converter code.
    pub fn lsb_volts(&self) -> f64 {
        self.full_scale_volts() / ADC_MAX_CODE
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            gain: Gain::default(),
            data_rate: DataRate::default(),
            offset_seed: DEFAULT_OFFSET_SEED,
        }
    }
}

/// Sensor scaling for one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseCalibration {
    pub voltage_ratio: f64, // Voltage transformer ratio (e.g. 220.0/11.0 = 20.0)
    pub current_ratio: f64, // Current transformer ratio (e.g. 100A/50mA = 2000.0)
    pub burden_ohms: f64,   // Burden resistor across the CT secondary
}

impl Default for PhaseCalibration {
    fn default() -> Self {
        Self {
            voltage_ratio: 1.0,
            current_ratio: 1.0,
            burden_ohms: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerMetrics {
    pub vrms: f64,           // V
    pub irms: f64,           // A
    pub real_power: f64,     // W
    pub apparent_power: f64, // VA
    pub reactive_power: f64, // VAR
    pub power_factor: f64,
}

impl PowerMetrics {
    /// Result reported when a cycle did not collect enough samples.
    pub fn idle() -> Self {
        Self {
            power_factor: 1.0,
            ..Default::default()
        }
    }
}

/// Everything the monitor knows about one phase.
#[derive(Debug, Clone, Default)]
pub struct PhaseState {
    pub calibration: PhaseCalibration,
    pub offsets: OffsetTracker,
    pub window: AccumulationWindow,
    pub metrics: PowerMetrics,
    pub energy_kwh: f64, // Cumulative, positive flow only
}

impl PhaseState {
    pub fn seeded(calibration: PhaseCalibration, offset_seed: f64) -> Self {
        Self {
            calibration,
            offsets: OffsetTracker::seeded(offset_seed),
            ..Default::default()
        }
    }
}

/// What a single call to `tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Idle,              // Monitor not initialized
    Sampled(Phase),    // One voltage/current pair accumulated
    ReadFailed(Phase), // Converter read failed, channel still advanced
    Calculated,        // Interval elapsed, all phases recalculated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_cycle_in_order() {
        assert_eq!(Phase::L1.next(), Phase::L2);
        assert_eq!(Phase::L2.next(), Phase::L3);
        assert_eq!(Phase::L3.next(), Phase::L1);
    }

    #[test]
    fn phase_index_outside_supply_is_rejected() {
        assert_eq!(Phase::from_index(2), Some(Phase::L3));
        assert_eq!(Phase::from_index(3), None);
    }

    #[test]
    fn default_config_matches_unity_gain_converter() {
        let config = MonitorConfig::default();
        assert_eq!(config.interval_ms, 1000);
        assert_eq!(config.full_scale_volts(), 4.096);
        assert!((config.lsb_volts() - 4.096 / 32767.0).abs() < 1e-15);
    }

    #[test]
    fn idle_metrics_report_unity_power_factor() {
        let idle = PowerMetrics::idle();
        assert_eq!(idle.vrms, 0.0);
        assert_eq!(idle.real_power, 0.0);
        assert_eq!(idle.power_factor, 1.0);
    }
}
