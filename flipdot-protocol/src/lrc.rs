//! Longitudinal redundancy check
//!
//! The same additive checksum ASCII Modbus uses: sum every byte, keep the
//! low eight bits, and take the two's complement.

/// Compute the LRC of a byte run
pub fn lrc(bytes: &[u8]) -> u8 {
    let mut acc = Lrc::new();
    acc.update(bytes);
    acc.finish()
}

/// Check that a byte run ending in its own LRC sums to zero
pub fn verify(bytes_with_checksum: &[u8]) -> bool {
    sum(bytes_with_checksum) == 0
}

fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Incremental LRC accumulator
///
/// Lets a frame's header and payload be fed separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lrc {
    sum: u8,
}

impl Lrc {
    /// Start an empty checksum
    pub const fn new() -> Self {
        Self { sum: 0 }
    }

    /// Add bytes to the running sum
    pub fn update(&mut self, bytes: &[u8]) {
        self.sum = self.sum.wrapping_add(sum(bytes));
    }

    /// Checksum byte for everything fed so far
    pub fn finish(&self) -> u8 {
        self.sum.wrapping_neg()
    }
}
