//! Flip-dot Hardware Abstraction Layer
//!
//! This crate defines the serial transport traits the sign drivers talk
//! through. Chip-specific HALs (or host serial ports) implement them, so
//! the same protocol code runs against an RS-485 transceiver on a
//! microcontroller or a USB adapter on a desktop.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  flipdot-drivers (session, sequencing)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  flipdot-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip UART    │       │ embedded-io   │
//! │  (RS-485)     │       │ stream (IoUart│
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`uart::Uart`] - Both directions sharing one error type

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod io;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use io::IoUart;
pub use uart::{Uart, UartConfig, UartError, UartRx, UartTx};
