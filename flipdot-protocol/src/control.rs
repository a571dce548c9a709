//! Fixed control frames
//!
//! Everything around the image data is a canned command line: unlocking
//! the sign, announcing a new image, committing it, and shutting down.
//! These lines embed the sign address and their own checksums, so they
//! are stored verbatim per sign model rather than built at runtime.

use crate::frame::{Frame, FrameError};

/// The literal command lines for one sign model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlFrames {
    /// Sent once after power-up: unlock, set address, arm for image data
    pub init: &'static [&'static str],
    /// Sent before the register frames of every update
    pub begin_image: &'static [&'static str],
    /// Sent after the register frames to flip the dots
    pub commit_image: &'static [&'static str],
    /// Sent before power-down: blank every dot, stop the controller
    pub close: &'static [&'static str],
}

impl ControlFrames {
    /// Every literal, in init / begin / commit / close order
    pub fn all(&self) -> impl Iterator<Item = &'static str> {
        let (init, begin, commit, close) =
            (self.init, self.begin_image, self.commit_image, self.close);
        init.iter()
            .chain(begin)
            .chain(commit)
            .chain(close)
            .copied()
    }

    /// Check that every literal is a well-formed frame with a valid checksum
    pub fn verify(&self) -> Result<(), FrameError> {
        self.all()
            .try_for_each(|literal| Frame::from_literal(literal).map(|_| ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: ControlFrames = ControlFrames {
        init: &[":01000502FFF9", ":00000101FE"],
        begin_image: &[":01000603A254"],
        commit_image: &[":00000F01F0"],
        close: &[":01000603A650"],
    };

    #[test]
    fn test_all_in_order() {
        let all: std::vec::Vec<_> = GOOD.all().collect();
        assert_eq!(
            all,
            [
                ":01000502FFF9",
                ":00000101FE",
                ":01000603A254",
                ":00000F01F0",
                ":01000603A650"
            ]
        );
    }

    #[test]
    fn test_verify() {
        assert_eq!(GOOD.verify(), Ok(()));

        let bad = ControlFrames {
            commit_image: &[":00000F01F1"],
            ..GOOD
        };
        assert_eq!(
            bad.verify(),
            Err(FrameError::InvalidChecksum {
                expected: 0xF0,
                found: 0xF1
            })
        );
    }
}
