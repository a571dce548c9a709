//! Session errors

use flipdot_protocol::FrameError;

/// Errors surfaced by a sign session
///
/// `E` is the transport's own error type. Any error abandons the lifecycle
/// sequence in progress; nothing is retried and the sign is left wherever
/// the last complete line put it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignError<E> {
    /// Write, flush or drain failed
    Transport(E),
    /// A line could not be built
    Frame(FrameError),
}

impl<E> From<FrameError> for SignError<E> {
    fn from(e: FrameError) -> Self {
        SignError::Frame(e)
    }
}

impl<E> SignError<E> {
    /// Whether the serial link itself failed
    pub fn is_transport(&self) -> bool {
        matches!(self, SignError::Transport(_))
    }
}
