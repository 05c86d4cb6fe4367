use core::fmt::Debug;

use super::types::{DataRate, Gain};

/// Which electrical quantity a converter digitizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Voltage,
    Current,
}

impl Quantity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Voltage => "voltage",
            Quantity::Current => "current",
        }
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multi-channel analog-to-digital converter reached over a shared bus.
///
/// The monitor uses two of these, one wired to the voltage sensors and one to
/// the current sensors, with phase `n` on channel `n` of each.
pub trait Converter {
    type Error: Debug;

    /// Probe the device at `address`. An error means it did not acknowledge.
    fn begin(&mut self, address: u8) -> Result<(), Self::Error>;

    fn configure(&mut self, gain: Gain, data_rate: DataRate) -> Result<(), Self::Error>;

    /// Blocking single-ended conversion of one channel.
    fn read_channel(&mut self, channel: u8) -> Result<i16, Self::Error>;
}

impl<T: Converter + ?Sized> Converter for &mut T {
    type Error = T::Error;

    fn begin(&mut self, address: u8) -> Result<(), Self::Error> {
        (**self).begin(address)
    }

    fn configure(&mut self, gain: Gain, data_rate: DataRate) -> Result<(), Self::Error> {
        (**self).configure(gain, data_rate)
    }

    fn read_channel(&mut self, channel: u8) -> Result<i16, Self::Error> {
        (**self).read_channel(channel)
    }
}
