//! CyberClock library - testable modules for the desk appliance firmware.
//!
//! This library contains the core logic that can be tested on the host machine:
//! the mode state machine, input decoding, environment history, the alarm
//! trigger checker and the alert/LED coordinator. The simulator binary
//! (`main.rs`, behind the `simulator` feature) uses this library and adds the
//! SDL window plus fake hardware collaborators.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware core stays `no_std`.
//!
//! # Architecture
//!
//! One cooperative loop, no preemption. Each cycle:
//!
//! ```text
//! sample inputs -> Dispatcher::update (apply pending transition, run active
//! mode once) -> alarm trigger check (may force a transition) -> alert/LED
//! coordinator (side effects only)
//! ```
//!
//! Exactly one [`modes::Mode`] is active at a time, stored inline in the
//! dispatcher's single slot. Hardware (display, LED, buzzer, sensors, the
//! provisioning portal, the wall clock) sits behind the narrow traits in
//! [`hal`] so the whole state machine runs against stubs in unit tests.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod alert;
pub mod app;
pub mod colors;
pub mod config;
pub mod env;
pub mod hal;
pub mod input;
pub mod modes;
pub mod settings;
pub mod styles;
pub mod widgets;

#[cfg(test)]
pub mod testutil;

pub use app::App;
