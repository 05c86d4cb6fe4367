use super::converter::{Converter, Quantity};
use super::types::{Phase, PHASE_COUNT};

/// Running sum of one converter channel.
#[derive(Debug, Clone, Copy, Default)]
struct ChannelSum {
    sum: i64,
    count: u32,
}

impl ChannelSum {
    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }
}

/// Mean raw code of every channel after a bulk read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BulkOffsets {
    pub voltage: [Option<f64>; PHASE_COUNT], // None when no read succeeded
    pub current: [Option<f64>; PHASE_COUNT],
    pub read_errors: u32,
}

fn read_into<A: Converter>(
    adc: &mut A,
    quantity: Quantity,
    phase: Phase,
    slot: &mut ChannelSum,
) -> bool {
    match adc.read_channel(phase.channel()) {
        Ok(raw) => {
            slot.sum += raw as i64;
            slot.count += 1;
            true
        }
        Err(e) => {
            log::debug!(
                "{} read on {} failed during calibration: {:?}",
                quantity,
                phase.as_str(),
                e
            );
            false
        }
    }
}

/*
* @brief Average raw readings of all channels of both converters.
* @param voltage Voltage converter
* @param current Current converter
* @param sample_count Number of passes over the three channels
* @return BulkOffsets with the per-channel means
* @note Blocks for sample_count * 6 conversions. Failed reads are skipped and counted.
*/
pub fn measure_offsets<V: Converter, I: Converter>(
    voltage: &mut V,
    current: &mut I,
    sample_count: u16,
) -> BulkOffsets {
    let mut sum_v = [ChannelSum::default(); PHASE_COUNT];
    let mut sum_i = [ChannelSum::default(); PHASE_COUNT];
    let mut read_errors = 0;

    for _ in 0..sample_count {
        for phase in Phase::ALL {
            if !read_into(voltage, Quantity::Voltage, phase, &mut sum_v[phase.index()]) {
                read_errors += 1;
            }
            if !read_into(current, Quantity::Current, phase, &mut sum_i[phase.index()]) {
                read_errors += 1;
            }
        }
    }

    BulkOffsets {
        voltage: sum_v.map(|s| s.mean()),
        current: sum_i.map(|s| s.mean()),
        read_errors,
    }
}
