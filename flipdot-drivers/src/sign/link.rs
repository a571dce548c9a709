//! Line transmission
//!
//! One line on the wire is: drain whatever the sign sent, write the frame
//! and CRLF, flush, wait, drain again. The wait differs between blocking
//! and async sessions, so it is left to the caller between [`transmit`]
//! and [`drain`].

use flipdot_hal::{Uart, UartError};
use flipdot_protocol::{Frame, LINE_END};

use crate::error::SignError;

/// Drop every byte the sign has sent back
pub(crate) fn drain<U: Uart>(uart: &mut U) -> Result<(), SignError<UartError<U>>> {
    let discarded = uart.discard_pending().map_err(SignError::Transport)?;
    if discarded > 0 {
        #[cfg(feature = "defmt")]
        defmt::trace!("discarded {} bytes from sign", discarded);
    }
    Ok(())
}

/// Drain, then write one frame as a CRLF-terminated line and flush it
pub(crate) fn transmit<U: Uart>(
    uart: &mut U,
    frame: &Frame,
) -> Result<(), SignError<UartError<U>>> {
    drain(uart)?;

    #[cfg(feature = "defmt")]
    defmt::trace!("-> {}", frame);

    uart.write_blocking(frame.as_bytes())
        .map_err(SignError::Transport)?;
    uart.write_blocking(LINE_END).map_err(SignError::Transport)?;
    uart.flush().map_err(SignError::Transport)
}
