//! Register layout and bytestream segmentation
//!
//! A register is a fixed block of sign memory written by exactly one frame.
//! Each [`RegisterEntry`] says which slice of the packed dot bytestream the
//! register carries and which fixed bytes surround it:
//!
//! ```text
//! frame = ':' HEADER  stream[start .. start + len]  TRAILER  LRC
//! ```
//!
//! The header holds everything up to the first data byte, including any
//! leading padding. Registers covering a physical gap in the dot matrix
//! take no bytes from the stream (`len == 0`) and carry only fixed bytes.

use core::ops::Range;

use heapless::Vec;

use crate::frame::{self, Frame, FrameError, MAX_FRAME_BYTES};

/// One row of a register layout table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterEntry {
    /// Register number, used for logging only
    pub id: u8,
    /// First bytestream byte carried by this register
    pub start: usize,
    /// Number of bytestream bytes carried
    pub len: usize,
    /// Fixed hex before the data (length, address, register, leading padding)
    pub header: &'static str,
    /// Fixed hex after the data, possibly empty
    pub trailer: &'static str,
}

impl RegisterEntry {
    /// A register carrying `len` bytestream bytes from `start`
    pub const fn data(id: u8, start: usize, len: usize, header: &'static str) -> Self {
        Self {
            id,
            start,
            len,
            header,
            trailer: "",
        }
    }

    /// A register that carries no image data, only fixed bytes
    pub const fn blank(id: u8, header: &'static str, trailer: &'static str) -> Self {
        Self {
            id,
            start: 0,
            len: 0,
            header,
            trailer,
        }
    }

    /// Append fixed trailing bytes after the data
    pub const fn with_trailer(self, trailer: &'static str) -> Self {
        Self { trailer, ..self }
    }

    /// Whether this register is purely synthetic
    pub const fn is_blank(&self) -> bool {
        self.len == 0
    }

    /// Bytestream range carried by this register
    pub const fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Build this register's frame from a packed bytestream
    pub fn frame(&self, stream: &[u8]) -> Result<Frame, FrameError> {
        let data = if self.is_blank() {
            &[][..]
        } else {
            stream.get(self.range()).ok_or(FrameError::ShortPayload)?
        };

        let mut payload: Vec<u8, MAX_FRAME_BYTES> = Vec::new();
        payload
            .extend_from_slice(data)
            .map_err(|_| FrameError::Overflow)?;
        frame::decode_hex(self.trailer, &mut payload)?;

        Frame::build(self.header, &payload)
    }
}

/// Layout errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// No register carries the bytestream byte at `offset`
    Gap { offset: usize },
    /// Two registers carry some of the same bytestream bytes
    Overlap { first: u8, second: u8 },
    /// A register reaches past the end of the bytestream
    RangeOutOfBounds { id: u8 },
}

/// Ordered register table for one sign model
///
/// Frames are sent in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterLayout {
    entries: &'static [RegisterEntry],
}

impl RegisterLayout {
    /// Wrap a static register table
    pub const fn new(entries: &'static [RegisterEntry]) -> Self {
        Self { entries }
    }

    /// Registers in transmission order
    pub fn entries(&self) -> &'static [RegisterEntry] {
        self.entries
    }

    /// Number of registers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytestream bytes the table claims
    pub fn covered_len(&self) -> usize {
        self.entries.iter().map(|entry| entry.len).sum()
    }

    /// Check that the table sends every byte of a `stream_len` bytestream exactly once
    ///
    /// Data registers may appear in any order, but together they must tile
    /// `0..stream_len` with no gap and no overlap. Blank registers are not
    /// considered.
    pub fn check_coverage(&self, stream_len: usize) -> Result<(), LayoutError> {
        let data = || self.entries.iter().filter(|entry| !entry.is_blank());

        if let Some(entry) = data().find(|e| e.range().end > stream_len) {
            return Err(LayoutError::RangeOutOfBounds { id: entry.id });
        }

        for (i, a) in data().enumerate() {
            let clash = data()
                .skip(i + 1)
                .find(|b| a.start < b.range().end && b.start < a.range().end);
            if let Some(b) = clash {
                return Err(LayoutError::Overlap {
                    first: a.id,
                    second: b.id,
                });
            }
        }

        // Ranges are disjoint and in bounds, so walking register ends from
        // zero either reaches the end of the stream or stops at a hole.
        let mut offset = 0;
        while offset < stream_len {
            match data().find(|e| e.start == offset) {
                Some(entry) => offset = entry.range().end,
                None => return Err(LayoutError::Gap { offset }),
            }
        }
        Ok(())
    }

    /// Build every register frame for a bytestream, in table order
    pub fn frames<'a>(
        &self,
        stream: &'a [u8],
    ) -> impl Iterator<Item = Result<Frame, FrameError>> + 'a {
        let entries = self.entries;
        entries.iter().map(move |entry| entry.frame(stream))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RegisterLayout {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RegisterLayout[{} registers]", self.entries.len());
    }
}
