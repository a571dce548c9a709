//! Capability traits
//!
//! The core only needs a narrow pixel sink from whatever draws on the
//! sign; anything that can set a dot by coordinate plugs in here.

pub mod pixel;

pub use pixel::PixelSink;
