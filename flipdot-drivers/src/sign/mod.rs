//! Sign sessions
//!
//! A session owns one sign's dot matrix, its serial transport and a delay
//! source. Drawing happens on the matrix at any time; nothing reaches the
//! sign until [`FlipdotSign::update`] runs.
//!
//! ```text
//! Uninitialized --init--> Ready --update--> Displaying --close--> Closed
//!                           ^                  |  ^
//!                           |                  +--+ update
//!                           +------- init (after a power cycle) ------+
//! ```
//!
//! A session is not reentrant: callers sharing one across tasks must
//! serialize access themselves.

mod asynch;
mod link;
mod plan;
mod session;

#[cfg(test)]
mod mock;

pub use asynch::AsyncFlipdotSign;
pub use plan::{FramePlan, Operation, Step};

use embedded_hal::delay::DelayNs;
use flipdot_core::{ProfileError, SignProfile};
use flipdot_hal::{Uart, UartError};

use crate::error::SignError;
use session::Session;

/// Drawing, timing and state accessors shared by both session types
macro_rules! session_accessors {
    ($sign:ident) => {
        impl<'p, U, D> $sign<'p, U, D> {
            /// Profile this session drives
            pub fn profile(&self) -> &'p flipdot_core::SignProfile {
                self.session.profile
            }

            /// Lifecycle state as last recorded
            pub fn state(&self) -> flipdot_core::SessionState {
                self.session.state
            }

            /// Delays in use
            pub fn timing(&self) -> flipdot_core::SignTiming {
                self.session.timing
            }

            /// Override the profile's delays
            pub fn set_timing(&mut self, timing: flipdot_core::SignTiming) {
                if !timing.is_safe() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "inter-frame delay {}ms is below what the sign tolerates",
                        timing.inter_frame_delay_ms
                    );
                }
                self.session.timing = timing;
            }

            /// Dot matrix sent on the next update
            pub fn matrix(&self) -> &flipdot_core::PixelMatrix {
                &self.session.matrix
            }

            /// Mutable dot matrix, e.g. as an `embedded-graphics` draw target
            pub fn matrix_mut(&mut self) -> &mut flipdot_core::PixelMatrix {
                &mut self.session.matrix
            }

            /// Turn a dot on; coordinates must lie inside the sign
            pub fn dot_on(&mut self, x: usize, y: usize) {
                self.session.matrix.dot_on(x, y);
            }

            /// Turn a dot off; coordinates must lie inside the sign
            pub fn dot_off(&mut self, x: usize, y: usize) {
                self.session.matrix.dot_off(x, y);
            }

            /// Set every dot on
            pub fn all_on(&mut self) {
                self.session.matrix.clear(true);
            }

            /// Set every dot off
            pub fn all_off(&mut self) {
                self.session.matrix.clear(false);
            }

            /// Flip every dot
            pub fn invert(&mut self) {
                self.session.matrix.invert();
            }

            /// Take the session apart, returning transport and delay
            pub fn release(self) -> (U, D) {
                (self.uart, self.delay)
            }
        }

        impl<'p, U, D> flipdot_core::PixelSink for $sign<'p, U, D> {
            fn width(&self) -> u16 {
                self.session.matrix.width()
            }

            fn height(&self) -> u16 {
                self.session.matrix.height()
            }

            fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
                self.session.matrix.set(x, y, on);
            }
        }
    };
}

pub(crate) use session_accessors;

/// Blocking sign session
///
/// Every lifecycle call runs to completion before returning. An update
/// takes a couple of hundred milliseconds with the reference timing.
pub struct FlipdotSign<'p, U, D> {
    session: Session<'p>,
    uart: U,
    delay: D,
}

impl<'p, U, D> FlipdotSign<'p, U, D>
where
    U: Uart,
    D: DelayNs,
{
    /// Open a session on a validated profile
    ///
    /// Sends nothing; call [`FlipdotSign::init`] once the sign has been
    /// powered up.
    pub fn new(profile: &'p SignProfile, uart: U, delay: D) -> Result<Self, ProfileError> {
        Ok(Self {
            session: Session::new(profile)?,
            uart,
            delay,
        })
    }

    /// Unlock the sign, set its address and arm it for image data
    pub fn init(&mut self) -> Result<(), SignError<UartError<U>>> {
        self.run(Operation::Init)
    }

    /// Send the current matrix and make the sign show it
    ///
    /// Expects a prior [`FlipdotSign::init`]. Without one the lines are
    /// still sent, but the sign ignores them and the state does not move.
    pub fn update(&mut self) -> Result<(), SignError<UartError<U>>> {
        self.run(Operation::Update)
    }

    /// Blank the sign and stop its controller
    ///
    /// The sign needs a power cycle before it accepts [`FlipdotSign::init`]
    /// again.
    pub fn close(&mut self) -> Result<(), SignError<UartError<U>>> {
        self.run(Operation::Close)
    }

    fn run(&mut self, op: Operation) -> Result<(), SignError<UartError<U>>> {
        let plan = self.session.begin(op);

        for step in plan {
            let frame = step.frame(&self.session.stream)?;
            link::transmit(&mut self.uart, &frame)?;
            self.delay.delay_ms(self.session.timing.inter_frame_delay_ms);
            link::drain(&mut self.uart)?;
        }

        if let Some(ms) = self.session.settle_ms(op) {
            self.delay.delay_ms(ms);
        }

        self.session.finish(op);
        Ok(())
    }
}

session_accessors!(FlipdotSign);

#[cfg(test)]
mod tests {
    use super::mock::{Entry, Log, MockDelay, MockUart};
    use super::*;
    use flipdot_core::{PixelSink, SessionState, SignTiming, MEGAMAX_3000_FRONT};
    use flipdot_protocol::{lrc, Frame, FrameError};

    const INIT_LINES: [&str; 6] = [
        ":01000502FFF9",
        ":01000602FFF8",
        ":01000603A155",
        ":100000000447000F101C1C1C1C1000000000000006",
        ":00000101FE",
        ":0100060200F7",
    ];

    const CLOSE_LINES: [&str; 5] = [
        ":01000603A94D",
        ":01000603AA4C",
        ":01007F02FF7F",
        ":0100060255A2",
        ":01000603A650",
    ];

    fn open(log: &Log) -> FlipdotSign<'static, MockUart, MockDelay> {
        FlipdotSign::new(
            &MEGAMAX_3000_FRONT,
            MockUart::new(log),
            MockDelay::new(log),
        )
        .unwrap()
    }

    #[test]
    fn test_new_sends_nothing() {
        let log = Log::default();
        let sign = open(&log);
        assert_eq!(sign.state(), SessionState::Uninitialized);
        assert_eq!(sign.timing(), SignTiming::REFERENCE);
        assert!(log.entries().is_empty());
        assert_eq!(sign.matrix().count_on(), 0);
    }

    #[test]
    fn test_rejects_invalid_profile() {
        let profile = SignProfile {
            width: 97,
            ..MEGAMAX_3000_FRONT
        };
        let log = Log::default();
        let result = FlipdotSign::new(&profile, MockUart::new(&log), MockDelay::new(&log));
        assert!(matches!(result, Err(ProfileError::Layout(_))));
    }

    #[test]
    fn test_init_lines() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.init().unwrap();

        assert_eq!(log.lines(), INIT_LINES);
        assert_eq!(sign.state(), SessionState::Ready);
    }

    #[test]
    fn test_every_line_is_crlf_terminated() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.init().unwrap();

        let wire = log.wire();
        assert!(wire.starts_with(b":01000502FFF9\r\n:01000602FFF8\r\n"));
        assert!(wire.ends_with(b":0100060200F7\r\n"));
    }

    #[test]
    fn test_line_discipline() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.close().unwrap();

        // drain, write, CRLF, flush, delay, drain for each line
        let entries = log.entries();
        assert_eq!(entries.len(), 5 * 6);
        for (line, chunk) in entries.chunks(6).enumerate() {
            assert_eq!(chunk[0], Entry::Drain(0));
            assert_eq!(chunk[1], Entry::Write(CLOSE_LINES[line].as_bytes().to_vec()));
            assert_eq!(chunk[2], Entry::Write(b"\r\n".to_vec()));
            assert_eq!(chunk[3], Entry::Flush);
            assert_eq!(chunk[4], Entry::DelayMs(10));
            assert_eq!(chunk[5], Entry::Drain(0));
        }
    }

    #[test]
    fn test_sign_replies_are_discarded() {
        let log = Log::default();
        let mut uart = MockUart::new(&log);
        uart.queue_rx(b"junk");
        uart.reply_on_flush(b"\x06\r\n");
        let mut sign =
            FlipdotSign::new(&MEGAMAX_3000_FRONT, uart, MockDelay::new(&log)).unwrap();
        sign.init().unwrap();

        let drains: std::vec::Vec<usize> = log
            .entries()
            .iter()
            .filter_map(|e| match e {
                Entry::Drain(n) => Some(*n),
                _ => None,
            })
            .collect();
        // Stale bytes before the first line, then one reply after every line
        assert_eq!(drains[0], 4);
        assert!(drains[1..].iter().step_by(2).all(|&n| n == 3));
        assert!(drains[2..].iter().step_by(2).all(|&n| n == 0));

        let (uart, _) = sign.release();
        assert_eq!(uart.pending(), 0);
    }

    #[test]
    fn test_update_lines() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.init().unwrap();
        log.clear();

        sign.set_pixel(0, 0, true);
        sign.set_pixel(97, 15, true);
        sign.update().unwrap();

        let lines = log.lines();
        assert_eq!(lines.len(), 21);
        assert_eq!(lines[0], ":01000603A254");
        assert_eq!(lines[1], ":10000000010A0000010000000000000000000000E4");
        assert_eq!(lines[3], ":1000200000000000000000000000000000000000D0");
        assert_eq!(lines[15], ":1000E0000000008000000000000000000000000090");
        assert_eq!(
            &lines[16..],
            [
                ":00000F01F0",
                ":0100060200F7",
                ":0100060600F3",
                ":0100060200F7",
                ":01000603A94D",
            ]
        );
        for line in &lines {
            let frame = Frame::from_literal(line).unwrap();
            assert!(lrc::verify(frame.bytes()));
        }
        assert_eq!(sign.state(), SessionState::Displaying);
    }

    #[test]
    fn test_update_reflects_latest_matrix() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.init().unwrap();

        sign.all_on();
        sign.update().unwrap();
        sign.all_off();
        log.clear();
        sign.update().unwrap();

        assert_eq!(
            log.lines()[1],
            ":10000000010A0000000000000000000000000000E5"
        );
        assert_eq!(sign.state(), SessionState::Displaying);
    }

    #[test]
    fn test_update_delays() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.set_timing(SignTiming {
            inter_frame_delay_ms: 9,
            post_update_delay_ms: 500,
        });
        sign.init().unwrap();
        log.clear();
        sign.update().unwrap();

        let delays = log.delays();
        assert_eq!(delays.len(), 22);
        assert!(delays[..21].iter().all(|&ms| ms == 9));
        assert_eq!(delays[21], 500);
        assert_eq!(log.entries().last(), Some(&Entry::DelayMs(500)));
    }

    #[test]
    fn test_no_post_delay_by_default() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.init().unwrap();
        log.clear();
        sign.update().unwrap();

        assert_eq!(log.delays(), [10; 21]);
        assert_eq!(
            SignTiming::REFERENCE.update_wait_ms(MEGAMAX_3000_FRONT.update_frame_count()),
            log.delays().iter().sum::<u32>()
        );
    }

    #[test]
    fn test_update_before_init_still_sends() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.update().unwrap();

        assert_eq!(log.lines().len(), 21);
        assert_eq!(sign.state(), SessionState::Uninitialized);
    }

    #[test]
    fn test_close_and_reinit() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.init().unwrap();
        sign.update().unwrap();
        log.clear();
        sign.close().unwrap();
        assert_eq!(log.lines(), CLOSE_LINES);
        assert_eq!(sign.state(), SessionState::Closed);

        // Update after close is sent but does not reopen the session
        sign.update().unwrap();
        assert_eq!(sign.state(), SessionState::Closed);

        sign.init().unwrap();
        assert_eq!(sign.state(), SessionState::Ready);
    }

    #[test]
    fn test_transport_error_aborts() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.init().unwrap();
        log.clear();

        // Third line's frame write fails
        sign.uart.fail_after_writes(4);
        assert_eq!(sign.update(), Err(SignError::Transport(super::mock::MockError)));
        assert_eq!(log.lines().len(), 2);
        assert_eq!(log.delays().len(), 2);
        assert_eq!(sign.state(), SessionState::Ready);
    }

    #[test]
    fn test_drain_error_aborts() {
        let log = Log::default();
        let mut sign = open(&log);
        sign.uart.fail_reads();
        sign.uart.queue_rx(b"x");

        let err = sign.init().unwrap_err();
        assert!(err.is_transport());
        assert!(log.lines().is_empty());
        assert_eq!(sign.state(), SessionState::Uninitialized);
    }

    #[test]
    fn test_drawing_on_the_session() {
        use embedded_graphics::pixelcolor::BinaryColor;
        use embedded_graphics::prelude::*;
        use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

        let log = Log::default();
        let mut sign = open(&log);
        assert_eq!((sign.width(), sign.height()), (98, 16));

        // Clipped to the 3x3 visible corner
        Rectangle::new(Point::new(-3, -3), Size::new(6, 6))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(sign.matrix_mut())
            .unwrap();
        assert_eq!(sign.matrix().count_on(), 9);
        sign.set_pixel(98, 0, true);
        assert_eq!(sign.matrix().count_on(), 9);

        sign.dot_on(50, 8);
        assert!(sign.matrix().get(50, 8));
        sign.dot_off(50, 8);
        assert!(!sign.matrix().get(50, 8));

        sign.invert();
        assert_eq!(sign.matrix().count_on(), 98 * 16 - 9);
        sign.all_off();

        Line::new(Point::new(0, 15), Point::new(200, 15))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(sign.matrix_mut())
            .unwrap();
        assert_eq!(sign.matrix().count_on(), 98);
        assert!(sign.matrix().get(97, 15));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_over_embedded_io_stream() {
        use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};
        use flipdot_hal::IoUart;

        #[derive(Default)]
        struct Port {
            tx: std::vec::Vec<u8>,
            rx: std::vec::Vec<u8>,
        }

        impl ErrorType for Port {
            type Error = ErrorKind;
        }

        impl Write for Port {
            fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
                self.tx.extend_from_slice(buf);
                // The sign acknowledges every complete line
                if buf.ends_with(b"\n") {
                    self.rx.push(0x06);
                }
                Ok(buf.len())
            }

            fn flush(&mut self) -> Result<(), ErrorKind> {
                Ok(())
            }
        }

        impl Read for Port {
            fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
                let n = buf.len().min(self.rx.len());
                buf[..n].copy_from_slice(&self.rx[..n]);
                self.rx.drain(..n);
                Ok(n)
            }
        }

        impl ReadReady for Port {
            fn read_ready(&mut self) -> Result<bool, ErrorKind> {
                Ok(!self.rx.is_empty())
            }
        }

        let log = Log::default();
        let uart = IoUart::new(Port::default());
        let mut sign = FlipdotSign::new(&MEGAMAX_3000_FRONT, uart, MockDelay::new(&log)).unwrap();
        sign.close().unwrap();

        let (uart, _) = sign.release();
        let port = uart.into_inner();
        let expected: std::string::String =
            CLOSE_LINES.iter().map(|l| std::format!("{}\r\n", l)).collect();
        assert_eq!(port.tx, expected.as_bytes());
        assert!(port.rx.is_empty());
    }

    #[test]
    fn test_closed_stream_aborts_instead_of_hanging() {
        use embedded_io::{ErrorKind, ErrorType, Read, ReadExactError, ReadReady, Write};
        use flipdot_hal::IoUart;

        // Reports data ready forever but every read hits end of file
        struct Hangup;

        impl ErrorType for Hangup {
            type Error = ErrorKind;
        }

        impl Write for Hangup {
            fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
                Ok(buf.len())
            }

            fn flush(&mut self) -> Result<(), ErrorKind> {
                Ok(())
            }
        }

        impl Read for Hangup {
            fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ErrorKind> {
                Ok(0)
            }
        }

        impl ReadReady for Hangup {
            fn read_ready(&mut self) -> Result<bool, ErrorKind> {
                Ok(true)
            }
        }

        let log = Log::default();
        let mut sign =
            FlipdotSign::new(&MEGAMAX_3000_FRONT, IoUart::new(Hangup), MockDelay::new(&log))
                .unwrap();
        assert_eq!(
            sign.init(),
            Err(SignError::Transport(ReadExactError::UnexpectedEof))
        );
        assert_eq!(sign.state(), SessionState::Uninitialized);
        assert!(log.delays().is_empty());
    }

    #[test]
    fn test_frame_error_converts() {
        let err: SignError<super::mock::MockError> = FrameError::Overflow.into();
        assert_eq!(err, SignError::Frame(FrameError::Overflow));
        assert!(!err.is_transport());
    }
}
