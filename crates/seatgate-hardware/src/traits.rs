//! Hardware device trait definitions.
//!
//! These traits are the contract between the access controller core and its
//! two external collaborators: the proximity-card reader (sole input device)
//! and the actuator bank (relays or LEDs, one per resource). Real drivers
//! own pin mapping, bus bring-up and debouncing electronics; the core only
//! sees these methods.
//!
//! # Object Safety and Dynamic Dispatch
//!
//! Native `async fn` methods return `impl Future`, so these traits are not
//! object-safe; use generic type parameters (the controller is generic over
//! `R: CardReader, A: Actuator`).

#![allow(async_fn_in_trait)]

use crate::error::Result;
use seatgate_core::CardUid;

/// One card presentation as reported by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanData {
    /// Card unique identifier.
    pub uid: CardUid,

    /// When the reader captured the card.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ScanData {
    /// Create scan data stamped with the current time.
    #[must_use]
    pub fn now(uid: CardUid) -> Self {
        Self {
            uid,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Proximity-card reader abstraction.
///
/// The poll cycle is: [`poll_presence`](Self::poll_presence), then on `true`
/// [`read_identifier`](Self::read_identifier), then after handling
/// [`release_card`](Self::release_card) so the next poll can detect a fresh
/// presentation — including the same physical card tapped again.
pub trait CardReader: Send + Sync {
    /// Check whether a card is in the reader field.
    ///
    /// Non-blocking; a `false` return costs nothing and the loop polls again.
    ///
    /// # Errors
    /// Returns an error if the reader is disconnected or the bus fails.
    async fn poll_presence(&mut self) -> Result<bool>;

    /// Read the identifier of the presented card.
    ///
    /// Returns `None` when the card left the field between presence check
    /// and read, or could not be selected; that is a normal outcome, the
    /// loop simply restarts.
    ///
    /// # Errors
    /// Returns an error on communication failure with the reader.
    async fn read_identifier(&mut self) -> Result<Option<ScanData>>;

    /// Halt/deselect the current card.
    ///
    /// Must be called after every handled presentation; without it some
    /// readers keep reporting the lingering card forever.
    ///
    /// # Errors
    /// Returns an error on communication failure with the reader.
    async fn release_card(&mut self) -> Result<()>;
}

/// Actuator bank abstraction: one on/off channel per resource.
///
/// Used both for steady-state assignment/release and for transient flash
/// sequences. A flash sequence must always end with a final
/// [`set_state`](Self::set_state) carrying the resource's authoritative
/// occupancy, never an assumed value.
pub trait Actuator: Send + Sync {
    /// Drive one channel on or off.
    ///
    /// # Errors
    /// Returns an error if the channel index is out of range for this bank
    /// or the underlying driver fails.
    async fn set_state(&mut self, resource: usize, on: bool) -> Result<()>;

    /// Number of channels this bank drives.
    fn channel_count(&self) -> usize;
}
