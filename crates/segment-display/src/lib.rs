//! Multiplexed seven-segment display controller
//!
//! A cycle-accurate model of the classic FPGA scan controller that drives `N`
//! seven-segment digits from a single packed value while only one digit line
//! is active at a time.
//!
//! # Architecture
//!
//! ```text
//! RefreshTimer ──advance──▶ DigitScanner ──one-hot──▶ NibbleSelector ──nibble──▶ SegmentDecoder
//!                                 │                         ▲                          │
//!                                 ▼                         │                          ▼
//!                           digit_select              ValueRegister                segments
//! ```
//!
//! Every stateful component is a plain value with a pure `next` function
//! (`(state, inputs) -> (new_state, outputs)`). [`DisplayController`] composes
//! them and reads the externally written [`ValueRegister`] once per tick.
//!
//! # Features
//!
//! - `std`: Enable standard library support (`std::error::Error`, tracing std)
//! - `serde`: Serialize/deserialize configuration and outputs
//! - `defmt`: Enable defmt formatting on hardware builds
//!
//! # Example
//!
//! ```
//! use segment_display::{ControllerConfig, TripleDigitController, ValueRegister};
//!
//! let register = ValueRegister::<3>::new("seven_seg_ctrl_value");
//! register.write(0xABC);
//!
//! let config = ControllerConfig::new(10_000.0);
//! let mut ctrl = TripleDigitController::new(&config, &register).unwrap();
//!
//! // Reset state: digit one-hot 0b001 shows the most significant nibble.
//! assert_eq!(ctrl.outputs().digit_select, 0b001);
//! assert_eq!(ctrl.outputs().segments.to_string(), "0001000");
//!
//! ctrl.run(ctrl.refresh_count() + 1);
//! assert_eq!(ctrl.outputs().digit_select, 0b100);
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)] // value accessors — callers decide

pub mod config;
pub mod controller;
pub mod decoder;
pub mod refresh;
pub mod register;
pub mod scanner;
pub mod selector;

pub use config::{ConfigError, ControllerConfig, DEFAULT_CLOCK_HZ, DEFAULT_REFRESH_INTERVAL_NS};
pub use controller::{
    ControllerState, DisplayController, DisplayOutputs, Tick, TripleDigitController,
};
pub use decoder::{decode, Nibble, NibbleOutOfRange, PatternOutOfRange, Segment, SegmentPattern};
pub use refresh::{refresh_count, RefreshTimer};
pub use register::{RegisterError, ValueRegister};
pub use scanner::DigitScanner;
pub use selector::select;

/// Width in bits of the field each digit displays.
pub const NIBBLE_BITS: u32 = 4;

/// Largest supported digit count (the packed value must fit in a `u32`).
pub const MAX_DIGITS: usize = 8;
