//! Frame encoding and verification for the ASCII register protocol.
//!
//! Frame format:
//! - START: `:`
//! - HEADER: fixed hex prefix (length, address, register, any fixed bytes)
//! - PAYLOAD: hex-encoded data bytes
//! - CHECKSUM: two hex digits, LRC over HEADER and PAYLOAD bytes
//!
//! All hex is uppercase. On the wire every frame is followed by [`LINE_END`].

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::lrc;

/// Frame start character
pub const FRAME_START: u8 = b':';

/// Line terminator sent after every frame
pub const LINE_END: &[u8] = b"\r\n";

/// Maximum raw bytes in a frame (header + payload + checksum)
pub const MAX_FRAME_BYTES: usize = 64;

/// Maximum frame length in ASCII characters, start character included
pub const MAX_FRAME_LEN: usize = 1 + 2 * MAX_FRAME_BYTES;

/// Errors that can occur while building or parsing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Frame has no bytes after the start character
    Empty,
    /// Literal does not begin with `:`
    MissingStart,
    /// Character outside `0-9A-F`, or an odd number of hex digits
    InvalidHex,
    /// Frame would exceed [`MAX_FRAME_BYTES`]
    Overflow,
    /// Payload source is shorter than the requested byte range
    ShortPayload,
    /// Trailing checksum does not match the frame contents
    InvalidChecksum { expected: u8, found: u8 },
}

/// One checksum-protected command line
///
/// Holds both the ASCII text and the raw bytes it encodes; frames are only
/// produced by [`Frame::build`] or [`Frame::from_literal`], so the two
/// always agree and the checksum always verifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    text: String<MAX_FRAME_LEN>,
    raw: Vec<u8, MAX_FRAME_BYTES>,
}

impl Frame {
    /// Build a frame from a fixed hex header and raw payload bytes
    ///
    /// The checksum covers the decoded header bytes as well as the payload.
    pub fn build(header_hex: &str, payload: &[u8]) -> Result<Self, FrameError> {
        let mut raw = Vec::new();
        decode_hex(header_hex, &mut raw)?;
        raw.extend_from_slice(payload)
            .map_err(|_| FrameError::Overflow)?;

        let checksum = lrc::lrc(&raw);
        raw.push(checksum).map_err(|_| FrameError::Overflow)?;

        Self::from_raw(raw)
    }

    /// Parse and verify a complete ASCII frame such as `:0100060600F3`
    ///
    /// A trailing CRLF is tolerated.
    pub fn from_literal(literal: &str) -> Result<Self, FrameError> {
        let literal = literal.trim_end_matches(['\r', '\n']);
        let hex = literal
            .strip_prefix(FRAME_START as char)
            .ok_or(FrameError::MissingStart)?;

        let mut raw = Vec::new();
        decode_hex(hex, &mut raw)?;

        let Some((&found, body)) = raw.split_last() else {
            return Err(FrameError::Empty);
        };
        if !lrc::verify(&raw) {
            return Err(FrameError::InvalidChecksum {
                expected: lrc::lrc(body),
                found,
            });
        }

        Self::from_raw(raw)
    }

    fn from_raw(raw: Vec<u8, MAX_FRAME_BYTES>) -> Result<Self, FrameError> {
        let mut text = String::new();
        text.push(FRAME_START as char)
            .map_err(|_| FrameError::Overflow)?;
        for byte in &raw {
            write!(text, "{:02X}", byte).map_err(|_| FrameError::Overflow)?;
        }
        Ok(Self { text, raw })
    }

    /// ASCII form, start character included, without line terminator
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// ASCII form as bytes, ready for the wire
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Decoded bytes, checksum included
    pub fn bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Decoded bytes before the checksum
    pub fn body(&self) -> &[u8] {
        &self.raw[..self.raw.len() - 1]
    }

    /// The trailing LRC byte
    pub fn checksum(&self) -> u8 {
        self.raw[self.raw.len() - 1]
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.text.as_str());
    }
}

/// Check that a string is a well-formed hex run (uppercase, even length)
pub(crate) fn validate_hex(hex: &str) -> Result<(), FrameError> {
    let digits = hex.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(FrameError::InvalidHex);
    }
    digits.iter().try_for_each(|&c| nibble(c).map(|_| ()))
}

/// Decode uppercase hex pairs, appending to `out`
pub(crate) fn decode_hex<const N: usize>(
    hex: &str,
    out: &mut Vec<u8, N>,
) -> Result<(), FrameError> {
    validate_hex(hex)?;
    for pair in hex.as_bytes().chunks_exact(2) {
        let byte = (nibble(pair[0])? << 4) | nibble(pair[1])?;
        out.push(byte).map_err(|_| FrameError::Overflow)?;
    }
    Ok(())
}

fn nibble(c: u8) -> Result<u8, FrameError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(FrameError::InvalidHex),
    }
}
