//! Async sign session
//!
//! Same lines, same order and same state handling as [`FlipdotSign`], but
//! the inter-frame and post-update waits are awaited so other tasks run
//! while the sign processes a line. Writing, flushing and draining stay
//! blocking: a line is never left half-sent.
//!
//! Dropping an in-flight future between lines leaves the sign wherever the
//! last complete line put it, exactly like a transport error.
//!
//! [`FlipdotSign`]: super::FlipdotSign

use embedded_hal_async::delay::DelayNs;
use flipdot_core::{ProfileError, SignProfile};
use flipdot_hal::{Uart, UartError};

use super::link;
use super::plan::Operation;
use super::session::Session;
use crate::error::SignError;

/// Sign session for async executors such as embassy
pub struct AsyncFlipdotSign<'p, U, D> {
    session: Session<'p>,
    uart: U,
    delay: D,
}

impl<'p, U, D> AsyncFlipdotSign<'p, U, D>
where
    U: Uart,
    D: DelayNs,
{
    /// Open a session on a validated profile; sends nothing
    pub fn new(profile: &'p SignProfile, uart: U, delay: D) -> Result<Self, ProfileError> {
        Ok(Self {
            session: Session::new(profile)?,
            uart,
            delay,
        })
    }

    /// Unlock the sign, set its address and arm it for image data
    pub async fn init(&mut self) -> Result<(), SignError<UartError<U>>> {
        self.run(Operation::Init).await
    }

    /// Send the current matrix and make the sign show it
    pub async fn update(&mut self) -> Result<(), SignError<UartError<U>>> {
        self.run(Operation::Update).await
    }

    /// Blank the sign and stop its controller
    pub async fn close(&mut self) -> Result<(), SignError<UartError<U>>> {
        self.run(Operation::Close).await
    }

    async fn run(&mut self, op: Operation) -> Result<(), SignError<UartError<U>>> {
        let plan = self.session.begin(op);

        for step in plan {
            let frame = step.frame(&self.session.stream)?;
            link::transmit(&mut self.uart, &frame)?;
            self.delay
                .delay_ms(self.session.timing.inter_frame_delay_ms)
                .await;
            link::drain(&mut self.uart)?;
        }

        if let Some(ms) = self.session.settle_ms(op) {
            self.delay.delay_ms(ms).await;
        }

        self.session.finish(op);
        Ok(())
    }
}

super::session_accessors!(AsyncFlipdotSign);
