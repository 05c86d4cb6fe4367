mod three_phase_monitor;

pub use three_phase_monitor::*;
