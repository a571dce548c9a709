//! Luminator ASCII Register Protocol
//!
//! This crate defines the line protocol spoken by Luminator MegaMax flip-dot
//! sign controllers over RS-485. It is a checksum-only cousin of ASCII
//! Modbus: every command is one line of uppercase hex, prefixed with `:`
//! and terminated by CRLF.
//!
//! # Frame Overview
//!
//! ```text
//! ┌───────┬──────────────┬──────────────────┬──────────┬──────┐
//! │ START │ HEADER       │ PAYLOAD          │ LRC      │ EOL  │
//! │ ':'   │ hex, fixed   │ hex, 0–n bytes   │ 2 hex    │ CRLF │
//! └───────┴──────────────┴──────────────────┴──────────┴──────┘
//! ```
//!
//! The LRC is the two's complement of the byte sum of everything between
//! the `:` and the checksum itself, so the bytes of a valid frame sum to
//! zero modulo 256.
//!
//! The image is written as a series of *registers*, fixed blocks of sign
//! memory. A [`RegisterLayout`] table maps each register onto a slice of
//! the packed dot bytestream. The fixed lock/unlock/commit commands around
//! the image are carried verbatim in [`ControlFrames`].
//!
//! The sign answers some lines, but nothing in the protocol depends on
//! those answers; drivers discard them.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod control;
pub mod frame;
pub mod lrc;
pub mod register;

pub use control::ControlFrames;
pub use frame::{Frame, FrameError, FRAME_START, LINE_END, MAX_FRAME_BYTES, MAX_FRAME_LEN};
pub use lrc::{lrc, Lrc};
pub use register::{LayoutError, RegisterEntry, RegisterLayout};
