//! Core constants for the seatgate access controller.
//!
//! These values define the timing and capacity behavior shared by the
//! decision engine, the notification sink, and the controller loop.
//! Changing them changes observable feedback behavior, so tests assert
//! against the constants rather than repeating literals.

// ============================================================================
// Card Format
// ============================================================================

/// Card identifier length in bytes.
///
/// Proximity cards used by the system report a fixed 4-byte UID. Identifiers
/// of any other length are rejected at parse time.
pub const CARD_UID_LENGTH: usize = 4;

// ============================================================================
// Timing Configuration
// ============================================================================

/// How long an alert overlay stays visible (milliseconds).
///
/// An alert raised at time T is shown for all queries in `[T, T + 3000ms)`
/// and is absent at `T + 3000ms` or later. Expiry is polled, never pushed.
///
/// # Value: 3000ms (3 seconds)
pub const ALERT_DURATION_MS: u64 = 3000;

/// Post-handling debounce delay (milliseconds).
///
/// After a card presentation is fully handled, polling pauses for this long
/// so a card still in reader range does not re-trigger.
///
/// # Value: 1000ms (1 second)
pub const DEBOUNCE_MS: u64 = 1000;

/// Interval between actuator transitions during a flash sequence (milliseconds).
pub const FLASH_INTERVAL_MS: u64 = 100;

/// Flash cycles when a requested resource is already occupied.
///
/// The target actuator is flashed off/on this many times, then restored to
/// its authoritative state.
pub const FLASH_CYCLES_OCCUPIED: u32 = 2;

/// Flash cycles across all actuators for an unauthorized card.
pub const FLASH_CYCLES_UNAUTHORIZED: u32 = 3;

// ============================================================================
// Notification Sink
// ============================================================================

/// Number of slots in the circular event log.
///
/// The log is sized for a small status display: insertion always takes the
/// next circular slot and the oldest entry is silently overwritten.
///
/// # Value: 5 entries
pub const EVENT_LOG_CAPACITY: usize = 5;
