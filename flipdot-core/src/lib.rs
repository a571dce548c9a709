//! Board-agnostic core logic for flip-dot sign drivers
//!
//! This crate contains everything that does not touch a serial port:
//!
//! - The logical dot matrix and the pixel-sink capability drawing code uses
//! - Packing the matrix into the sign's column-major bytestream
//! - Sign profiles: geometry, register layout and control frames per model
//! - The session lifecycle state machine
//! - Timing configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod encoder;
pub mod matrix;
pub mod profile;
pub mod state;
pub mod traits;

pub use config::SignTiming;
pub use encoder::{Bytestream, MAX_BYTESTREAM_LEN};
pub use matrix::{GeometryError, PixelMatrix, MAX_DOTS};
pub use profile::{ProfileError, SignProfile, MEGAMAX_3000_FRONT};
pub use state::{Event, SessionState};
pub use traits::PixelSink;
