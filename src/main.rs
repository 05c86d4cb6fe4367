use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use signal_hook::consts::signal::{SIGINT, SIGTERM};

use three_phase_monitor::{
    print_all, MonitorConfig, MonotonicClock, SimulatedAdc, SimulationProfile, ThreePhaseMonitor,
    Tick, DEFAULT_CALIBRATION_SAMPLES, DEFAULT_INTERVAL_MS, PHASE_COUNT,
};

/// Three-phase monitor running on simulated converters
#[derive(Parser, Debug)]
#[command(author, version, about = "Three-phase power monitor simulation", long_about = None)]
struct Args {
    /// Calculation interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    /// Voltage transformer ratio applied to every phase
    #[arg(long, default_value_t = 20.0)]
    voltage_ratio: f64,

    /// Current transformer ratio applied to every phase
    #[arg(long, default_value_t = 2000.0)]
    current_ratio: f64,

    /// Burden resistor in ohms
    #[arg(long, default_value_t = 33.0)]
    burden: f64,

    /// Passes over the channels used to seed the offsets
    #[arg(long, default_value_t = DEFAULT_CALIBRATION_SAMPLES)]
    calibration_samples: u16,

    /// Angle by which the simulated currents lag the voltages, in degrees
    #[arg(long, default_value_t = 0.0)]
    load_angle: f64,

    /// Uniform noise added to the simulated samples, percent of peak
    #[arg(long, default_value_t = 0.0)]
    noise: f64,

    /// Pause between ticks in microseconds
    #[arg(long, default_value_t = 1163)]
    tick_us: u64,

    /// Stop after this many calculation cycles (0 runs until interrupted)
    #[arg(long, default_value_t = 0)]
    cycles: u64,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let stop = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        if let Err(e) = signal_hook::flag::register(signal, Arc::clone(&stop)) {
            log::error!("Unable to register signal {}: {}", signal, e);
            return;
        }
    }

    let voltage_profile = SimulationProfile {
        noise_percent: args.noise,
        ..SimulationProfile::voltage()
    };
    let current_profile = SimulationProfile {
        noise_percent: args.noise,
        phase_shift_deg: -args.load_angle,
        ..SimulationProfile::current()
    };
    let (voltage_address, current_address) = (voltage_profile.address, current_profile.address);

    let config = MonitorConfig {
        interval_ms: args.interval_ms,
        ..Default::default()
    };

    let mut monitor = ThreePhaseMonitor::new(
        SimulatedAdc::new(voltage_profile),
        SimulatedAdc::new(current_profile),
        MonotonicClock::new(),
        config,
    );

    if let Err(e) = monitor.initialize(voltage_address, current_address) {
        log::error!("Initialization failed: {}", e);
        return;
    }

    for phase in 0..PHASE_COUNT {
        monitor.configure_phase(phase, args.voltage_ratio, args.current_ratio, args.burden);
    }

    log::info!("Calibrating offsets with {} samples", args.calibration_samples);
    monitor.calibrate_offsets(args.calibration_samples);

    let pause = Duration::from_micros(args.tick_us);
    let mut cycles = 0;

    while !stop.load(Ordering::Relaxed) {
        if monitor.tick() == Tick::Calculated {
            print_all(&monitor);

            cycles += 1;
            if args.cycles != 0 && cycles >= args.cycles {
                break;
            }
        }
        spin_sleep::sleep(pause);
    }

    log::info!("Stopped after {} cycles, {:.6} kWh total", cycles, monitor.total_energy_kwh());
}
