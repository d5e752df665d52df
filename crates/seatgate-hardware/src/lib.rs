//! Hardware abstractions for the seatgate access controller.
//!
//! Defines the trait seams for the two external collaborators the core
//! depends on (a proximity-card reader and an actuator bank), plus mock
//! implementations for development and testing without physical hardware.
//! All traits use native `async fn` methods (Edition 2024 RPITIT), so no
//! `async_trait` macro is needed.

pub mod error;
pub mod mock;
pub mod traits;

pub use error::{HardwareError, Result};
pub use traits::{Actuator, CardReader, ScanData};
