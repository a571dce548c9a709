//! Sign session drivers
//!
//! This crate ties the board-agnostic pieces together and talks to a real
//! sign over a [`flipdot_hal::Uart`]:
//!
//! - [`FlipdotSign`]: blocking session, delays through `embedded_hal::delay::DelayNs`
//! - [`AsyncFlipdotSign`]: the same session with the inter-frame delay as
//!   its only await point, through `embedded_hal_async::delay::DelayNs`
//!
//! Both execute the same [`FramePlan`] per lifecycle operation, so the
//! order of lines on the wire is defined once.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod error;
pub mod sign;

pub use error::SignError;
pub use sign::{AsyncFlipdotSign, FlipdotSign, FramePlan, Operation, Step};
