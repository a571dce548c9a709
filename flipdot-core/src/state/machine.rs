//! State machine definition

use super::events::Event;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Nothing sent since the session was created
    #[default]
    Uninitialized,
    /// Init sent; the sign waits for image data
    Ready,
    /// At least one image committed since Init
    Displaying,
    /// Shutdown sent; the sign needs a power cycle before Init works again
    Closed,
}

impl SessionState {
    /// Check if an update is expected to reach the sign
    pub fn accepts_update(&self) -> bool {
        matches!(self, SessionState::Ready | SessionState::Displaying)
    }

    /// Check if close is expected to reach the sign
    pub fn accepts_close(&self) -> bool {
        matches!(self, SessionState::Ready | SessionState::Displaying)
    }

    /// Process an event and return the next state
    ///
    /// Sequences sent out of order are still recorded: Init always leads
    /// to `Ready` and Close always to `Closed`, but an update sent to a
    /// sign that was never initialized (or was closed) does not make it
    /// display anything, so the state stays put.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use SessionState::*;

        match (self, event) {
            // Init is sent after a power cycle, whatever came before
            (_, InitSent) => Ready,

            (Ready | Displaying, UpdateSent) => Displaying,
            (Uninitialized | Closed, UpdateSent) => self,

            (_, CloseSent) => Closed,
        }
    }
}
