//! Host-testable library interface for padlink.
//!
//! Everything in here is pure logic shared by the two binaries:
//! the control-pad packet codec, the LED policy applied by the
//! firmware, and the keyboard-command mapping used by the sender.
//!
//! Usage: `cargo test` (no features required)
//!
//! The embedded peripheral binary is `src/main.rs` (feature `embedded`,
//! #![no_std] + #![no_main]); the desktop sender is `src/ctl.rs`
//! (feature `host`).

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod input;
pub mod leds;
pub mod packet;
