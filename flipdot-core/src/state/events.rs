//! Events that trigger state transitions

/// A lifecycle sequence finished transmitting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Unlock/address/arm lines sent
    InitSent,
    /// Begin, register and commit lines sent
    UpdateSent,
    /// Shutdown lines sent
    CloseSent,
}
