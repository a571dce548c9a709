//! Inter-frame timing

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pause after every line so the controller can process it
pub const DEFAULT_INTER_FRAME_DELAY_MS: u32 = 10;

/// Shortest inter-frame pause the MegaMax controllers tolerate
pub const MIN_INTER_FRAME_DELAY_MS: u32 = 9;

/// Delays applied while talking to a sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SignTiming {
    /// Wait after each transmitted line, in milliseconds
    pub inter_frame_delay_ms: u32,
    /// Extra wait once a whole update has been sent, in milliseconds
    pub post_update_delay_ms: u32,
}

impl SignTiming {
    /// Timing that works for the MegaMax 3000 family
    pub const REFERENCE: Self = Self {
        inter_frame_delay_ms: DEFAULT_INTER_FRAME_DELAY_MS,
        post_update_delay_ms: 0,
    };

    /// Whether the inter-frame delay is long enough for the controller
    pub fn is_safe(&self) -> bool {
        self.inter_frame_delay_ms >= MIN_INTER_FRAME_DELAY_MS
    }

    /// Total time spent waiting while sending `frames` lines of an update
    pub fn update_wait_ms(&self, frames: usize) -> u32 {
        let frames = u32::try_from(frames).unwrap_or(u32::MAX);
        frames
            .saturating_mul(self.inter_frame_delay_ms)
            .saturating_add(self.post_update_delay_ms)
    }
}

impl Default for SignTiming {
    fn default() -> Self {
        Self::REFERENCE
    }
}
