//! Access controller orchestration.
//!
//! Owns the poll-decide-actuate cycle: polls the card reader, runs each scan
//! through the decision engine, drives the actuator bank (steady state and
//! transient flash feedback), and feeds the notification sink. All timing
//! (debounce, flash intervals) lives here, not in the decision logic.

pub mod config;
pub mod controller;

pub use config::ControllerConfig;
pub use controller::{AccessController, ControllerError, Result};
