//! Mock actuator bank.
//!
//! Records every transition so tests can assert on flash sequences and on
//! the mandatory restore-to-authoritative-state at the end of them.

use crate::{HardwareError, Result, traits::Actuator};

/// Mock actuator bank with inspectable pin state.
///
/// # Examples
///
/// ```
/// use seatgate_hardware::mock::MockActuator;
/// use seatgate_hardware::traits::Actuator;
///
/// #[tokio::main]
/// async fn main() -> seatgate_hardware::Result<()> {
///     let mut bank = MockActuator::new(2);
///     bank.set_state(0, true).await?;
///
///     assert_eq!(bank.states(), &[true, false]);
///     assert_eq!(bank.transitions(), &[(0, true)]);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MockActuator {
    /// Current logical state of each channel.
    states: Vec<bool>,

    /// Every transition ever requested, in order.
    transitions: Vec<(usize, bool)>,
}

impl MockActuator {
    /// Create a bank with `channels` channels, all off.
    #[must_use]
    pub fn new(channels: usize) -> Self {
        Self {
            states: vec![false; channels],
            transitions: Vec::new(),
        }
    }

    /// Current state of every channel.
    #[must_use]
    pub fn states(&self) -> &[bool] {
        &self.states
    }

    /// Full transition history, oldest first.
    #[must_use]
    pub fn transitions(&self) -> &[(usize, bool)] {
        &self.transitions
    }

    /// Transitions recorded since the given history length.
    #[must_use]
    pub fn transitions_since(&self, mark: usize) -> &[(usize, bool)] {
        &self.transitions[mark.min(self.transitions.len())..]
    }

    /// Forget the transition history (states are kept).
    pub fn clear_history(&mut self) {
        self.transitions.clear();
    }
}

impl Actuator for MockActuator {
    async fn set_state(&mut self, resource: usize, on: bool) -> Result<()> {
        let state = self.states.get_mut(resource).ok_or_else(|| {
            HardwareError::invalid_data(format!("Actuator channel {resource} out of range"))
        })?;
        *state = on;
        self.transitions.push((resource, on));
        Ok(())
    }

    fn channel_count(&self) -> usize {
        self.states.len()
    }
}
