//! Bounded circular event log.

use seatgate_core::constants::EVENT_LOG_CAPACITY;

/// Circular buffer of short status messages.
///
/// Insertion always takes the next circular slot; once the buffer wraps,
/// the oldest entry is silently overwritten. Entries are never explicitly
/// deleted. Reading skips slots that have not been written yet, which only
/// matters before the first wrap.
///
/// # Examples
///
/// ```
/// use seatgate_notify::EventLog;
///
/// let mut log = EventLog::new();
/// log.push("Seat 1 assigned");
/// log.push("Seat 2 assigned");
///
/// let view = log.recent();
/// assert_eq!(view, vec!["Seat 2 assigned", "Seat 1 assigned"]);
/// ```
#[derive(Debug, Clone)]
pub struct EventLog {
    slots: Vec<Option<String>>,
    /// Next slot to write.
    next: usize,
    /// Total insertions, for tests and diagnostics.
    inserted: u64,
}

impl EventLog {
    /// Create a log with the standard display capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }

    /// Create a log with a custom slot count.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            next: 0,
            inserted: 0,
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Total messages ever inserted (including overwritten ones).
    #[must_use]
    pub fn inserted(&self) -> u64 {
        self.inserted
    }

    /// Record a message in the next circular slot.
    pub fn push(&mut self, message: impl Into<String>) {
        self.slots[self.next] = Some(message.into());
        self.next = (self.next + 1) % self.slots.len();
        self.inserted += 1;
    }

    /// Most recent non-empty entries, newest first.
    ///
    /// Empty slots are skipped, so before the buffer fills the view simply
    /// contains fewer lines.
    #[must_use]
    pub fn recent(&self) -> Vec<&str> {
        let capacity = self.slots.len();
        (1..=capacity)
            .map(|k| (self.next + capacity - k) % capacity)
            .filter_map(|slot| self.slots[slot].as_deref())
            .collect()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
