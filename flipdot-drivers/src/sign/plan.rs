//! Frame plans
//!
//! Every lifecycle operation is a fixed list of lines. A plan walks that
//! list without building anything; each [`Step`] is turned into a
//! [`Frame`] just before it goes on the wire.
//!
//! ```text
//! Init    init[0] .. init[n]
//! Update  begin_image..  register[0] .. register[m]  commit_image..
//! Close   close[0] .. close[n]
//! ```

use flipdot_core::SignProfile;
use flipdot_protocol::{Frame, FrameError, RegisterEntry};

/// Lifecycle operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Unlock, address and arm the sign
    Init,
    /// Send the current image and flip the dots
    Update,
    /// Blank the sign and stop its controller
    Close,
}

/// One line of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Canned control line, sent verbatim
    Control(&'static str),
    /// Register line built from the bytestream
    Register(RegisterEntry),
}

impl Step {
    /// Build the line for this step
    ///
    /// `stream` is only read by register steps.
    pub fn frame(&self, stream: &[u8]) -> Result<Frame, FrameError> {
        match self {
            Step::Control(literal) => Frame::from_literal(literal),
            Step::Register(entry) => entry.frame(stream),
        }
    }
}

const NO_LINES: &[&str] = &[];
const NO_REGISTERS: &[RegisterEntry] = &[];

/// Ordered lines of one lifecycle operation
#[derive(Debug, Clone)]
pub struct FramePlan {
    head: &'static [&'static str],
    registers: &'static [RegisterEntry],
    tail: &'static [&'static str],
    pos: usize,
}

impl FramePlan {
    /// Plan `op` for a sign model
    pub fn new(profile: &SignProfile, op: Operation) -> Self {
        let control = &profile.control;
        let (head, registers, tail) = match op {
            Operation::Init => (control.init, NO_REGISTERS, NO_LINES),
            Operation::Update => (
                control.begin_image,
                profile.layout.entries(),
                control.commit_image,
            ),
            Operation::Close => (control.close, NO_REGISTERS, NO_LINES),
        };

        Self {
            head,
            registers,
            tail,
            pos: 0,
        }
    }

    /// Total number of lines, including those already yielded
    pub fn total(&self) -> usize {
        self.head.len() + self.registers.len() + self.tail.len()
    }
}

impl Iterator for FramePlan {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let mut i = self.pos;
        let step = if i < self.head.len() {
            Step::Control(self.head[i])
        } else {
            i -= self.head.len();
            if i < self.registers.len() {
                Step::Register(self.registers[i])
            } else {
                i -= self.registers.len();
                Step::Control(*self.tail.get(i)?)
            }
        };
        self.pos += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total().saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl ExactSizeIterator for FramePlan {}
