//! Errors reported while bringing the converters up.

use thiserror::Error;

use super::converter::Quantity;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MonitorError {
    /// Nothing answered at the given bus address.
    #[error("{quantity} converter did not acknowledge at address {address:#04x}")]
    NotAcknowledged { quantity: Quantity, address: u8 },

    /// The converter answered but rejected its gain/data-rate setup.
    #[error("{quantity} converter configuration failed: {detail}")]
    Configure { quantity: Quantity, detail: String },
}
