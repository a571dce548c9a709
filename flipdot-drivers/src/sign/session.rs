//! Transport-independent session state

use flipdot_core::encoder::{self, Bytestream};
use flipdot_core::{Event, PixelMatrix, ProfileError, SessionState, SignProfile, SignTiming};

use super::plan::{FramePlan, Operation};

/// Everything a session owns apart from its transport and delay
#[derive(Debug, Clone)]
pub(crate) struct Session<'p> {
    pub(crate) profile: &'p SignProfile,
    pub(crate) timing: SignTiming,
    pub(crate) matrix: PixelMatrix,
    pub(crate) stream: Bytestream,
    pub(crate) state: SessionState,
}

impl<'p> Session<'p> {
    pub(crate) fn new(profile: &'p SignProfile) -> Result<Self, ProfileError> {
        profile.validate()?;

        Ok(Self {
            profile,
            timing: profile.timing,
            matrix: profile.new_matrix()?,
            stream: Bytestream::new(),
            state: SessionState::default(),
        })
    }

    /// Prepare to run `op`: encode the image for updates and hand back the plan
    pub(crate) fn begin(&mut self, op: Operation) -> FramePlan {
        #[cfg(feature = "defmt")]
        {
            let expected = match op {
                Operation::Init => true,
                Operation::Update => self.state.accepts_update(),
                Operation::Close => self.state.accepts_close(),
            };
            if !expected {
                defmt::warn!("{} while {}, sending anyway", op, self.state);
            }
        }

        if op == Operation::Update {
            encoder::encode(&self.matrix, &mut self.stream);
        }

        let plan = FramePlan::new(self.profile, op);

        #[cfg(feature = "defmt")]
        defmt::debug!("{}: {} ({} lines)", self.profile.name, op, plan.total());

        plan
    }

    /// Record that every line of `op` went out
    pub(crate) fn finish(&mut self, op: Operation) {
        let event = match op {
            Operation::Init => Event::InitSent,
            Operation::Update => Event::UpdateSent,
            Operation::Close => Event::CloseSent,
        };
        self.state = self.state.transition(event);

        #[cfg(feature = "defmt")]
        defmt::debug!("{} done, sign {}", op, self.state);
    }

    /// Extra wait owed after `op`, if any
    pub(crate) fn settle_ms(&self, op: Operation) -> Option<u32> {
        match op {
            Operation::Update if self.timing.post_update_delay_ms > 0 => {
                Some(self.timing.post_update_delay_ms)
            }
            _ => None,
        }
    }
}
