//! Sign profiles
//!
//! A profile is everything model-specific about a sign: its geometry, how
//! its memory is split into registers, and the canned control lines that
//! carry its address. Profiles are `'static` tables built at compile time
//! and checked once with [`SignProfile::validate`] before a session uses
//! them.

mod megamax;

use flipdot_protocol::{ControlFrames, FrameError, LayoutError, RegisterLayout};

use crate::config::SignTiming;
use crate::encoder::{self, MAX_BYTESTREAM_LEN};
use crate::matrix::{self, GeometryError, PixelMatrix};

pub use megamax::MEGAMAX_3000_FRONT;

/// Profile validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileError {
    /// Width/height cannot be packed
    Geometry(GeometryError),
    /// Register table does not send every bytestream byte exactly once
    Layout(LayoutError),
    /// A register's fixed bytes do not form a valid frame
    Register { id: u8, error: FrameError },
    /// A control literal is malformed or carries a wrong checksum
    ControlFrame(FrameError),
}

impl From<GeometryError> for ProfileError {
    fn from(e: GeometryError) -> Self {
        ProfileError::Geometry(e)
    }
}

impl From<LayoutError> for ProfileError {
    fn from(e: LayoutError) -> Self {
        ProfileError::Layout(e)
    }
}

/// Model description for one sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignProfile {
    /// Human-readable model name
    pub name: &'static str,
    /// Width in dots
    pub width: u16,
    /// Height in dots, a multiple of 8
    pub height: u16,
    /// Register table, in transmission order
    pub layout: RegisterLayout,
    /// Canned control lines
    pub control: ControlFrames,
    /// Timing the model needs
    pub timing: SignTiming,
}

impl SignProfile {
    /// Packed image size in bytes
    pub const fn stream_len(&self) -> usize {
        encoder::stream_len(self.width, self.height)
    }

    /// Number of lines one update sends
    pub fn update_frame_count(&self) -> usize {
        self.control.begin_image.len() + self.layout.len() + self.control.commit_image.len()
    }

    /// Check every invariant the protocol code relies on
    pub fn validate(&self) -> Result<(), ProfileError> {
        matrix::check_geometry(self.width, self.height)?;
        self.layout.check_coverage(self.stream_len())?;

        // Build each register once from a blank image so bad header or
        // trailer hex surfaces here, not halfway through an update.
        let blank = [0u8; MAX_BYTESTREAM_LEN];
        let blank = &blank[..self.stream_len()];
        for entry in self.layout.entries() {
            entry
                .frame(blank)
                .map_err(|error| ProfileError::Register { id: entry.id, error })?;
        }

        self.control.verify().map_err(ProfileError::ControlFrame)
    }

    /// All-off matrix sized for this sign
    pub fn new_matrix(&self) -> Result<PixelMatrix, ProfileError> {
        Ok(PixelMatrix::new(self.width, self.height)?)
    }
}
