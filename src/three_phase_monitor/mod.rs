mod accumulator;
mod calibration;
mod clock;
mod converter;
mod energy;
mod error;
mod generate_signal;
mod monitor;
mod offset;
mod power;
mod print;
mod processing;
mod readings;
mod sampler;
mod types;

pub use accumulator::AccumulationWindow;
pub use calibration::{measure_offsets, BulkOffsets};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use converter::{Converter, Quantity};
pub use energy::energy_increment_kwh;
pub use error::MonitorError;
pub use generate_signal::{SimulatedAdc, SimulationError, SimulationProfile};
pub use monitor::ThreePhaseMonitor;
pub use offset::OffsetTracker;
pub use power::calculate_phase;
pub use print::{print_all, print_phase};
pub use sampler::RoundRobinSampler;
pub use types::*;
