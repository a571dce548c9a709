//! Configuration types
//!
//! Sign geometry and protocol constants are fixed per model and live in
//! [`crate::profile`]. The only values an installation tunes are timings,
//! which a board can load from TOML or flash through `serde`.

mod timing;

pub use timing::{SignTiming, DEFAULT_INTER_FRAME_DELAY_MS, MIN_INTER_FRAME_DELAY_MS};
