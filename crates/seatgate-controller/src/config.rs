//! Controller timing configuration.

use seatgate_core::constants::{ALERT_DURATION_MS, DEBOUNCE_MS, FLASH_INTERVAL_MS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default reader poll interval when no card is present (milliseconds).
const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Timing knobs for the controller loop.
///
/// Every field has a production default, so a configuration file only needs
/// to name the values it overrides. Tests shrink these to single-digit
/// milliseconds to keep loop tests fast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Pause after a fully handled presentation, so a card still in reader
    /// range does not immediately re-trigger.
    pub debounce_ms: u64,

    /// Delay between actuator transitions within a flash sequence.
    pub flash_interval_ms: u64,

    /// How long a rejection alert stays on the display.
    pub alert_duration_ms: u64,

    /// Sleep between presence polls when the reader field is empty.
    pub poll_interval_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            flash_interval_ms: FLASH_INTERVAL_MS,
            alert_duration_ms: ALERT_DURATION_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ControllerConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn flash_interval(&self) -> Duration {
        Duration::from_millis(self.flash_interval_ms)
    }

    #[must_use]
    pub fn alert_duration(&self) -> Duration {
        Duration::from_millis(self.alert_duration_ms)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = ControllerConfig::default();
        assert_eq!(config.debounce_ms, DEBOUNCE_MS);
        assert_eq!(config.flash_interval_ms, FLASH_INTERVAL_MS);
        assert_eq!(config.alert_duration_ms, ALERT_DURATION_MS);
        assert_eq!(config.debounce(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_override_from_json() {
        let config: ControllerConfig = serde_json::from_str(r#"{"debounce_ms": 250}"#).unwrap();
        assert_eq!(config.debounce_ms, 250);
        // Unnamed fields keep their defaults.
        assert_eq!(config.flash_interval_ms, FLASH_INTERVAL_MS);
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_round_trip() {
        let config = ControllerConfig {
            debounce_ms: 5,
            flash_interval_ms: 1,
            alert_duration_ms: 20,
            poll_interval_ms: 2,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ControllerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
