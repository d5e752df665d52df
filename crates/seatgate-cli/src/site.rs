//! Site configuration file handling.

use anyhow::{Context, Result};
use seatgate_access::AuthorizationList;
use seatgate_controller::ControllerConfig;
use seatgate_core::CardUid;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Demo card enrolled for seat 1 when no configuration file is given.
pub const DEMO_CARD_SEAT_1: &str = "13A35011";

/// Demo card enrolled for seat 2 when no configuration file is given.
pub const DEMO_CARD_SEAT_2: &str = "0332C00D";

/// One site: the enrolled cards (in seat order) plus controller timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Authorized card UIDs as hex strings; card *i* is bound to seat *i+1*.
    pub cards: Vec<String>,

    /// Controller timing overrides.
    #[serde(default)]
    pub controller: ControllerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            cards: vec![DEMO_CARD_SEAT_1.to_string(), DEMO_CARD_SEAT_2.to_string()],
            controller: ControllerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load a site configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SiteConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate the enrolled cards into an authorization list.
    pub fn authorization(&self) -> Result<AuthorizationList> {
        let cards = self
            .cards
            .iter()
            .map(|hex| {
                CardUid::from_hex(hex).with_context(|| format!("Invalid card UID '{hex}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        AuthorizationList::new(cards).context("Invalid authorization list")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_site_uses_demo_cards() {
        let site = SiteConfig::default();
        let auth = site.authorization().unwrap();

        assert_eq!(auth.len(), 2);
        assert_eq!(
            auth.card_for(0),
            Some(&CardUid::new([0x13, 0xA3, 0x50, 0x11]))
        );
        assert_eq!(
            auth.card_for(1),
            Some(&CardUid::new([0x03, 0x32, 0xC0, 0x0D]))
        );
    }

    #[test]
    fn test_parse_site_json() {
        let json = r#"{
            "cards": ["DEADBEEF"],
            "controller": { "debounce_ms": 500 }
        }"#;
        let site: SiteConfig = serde_json::from_str(json).unwrap();

        assert_eq!(site.authorization().unwrap().len(), 1);
        assert_eq!(site.controller.debounce_ms, 500);
        // Unspecified timings keep their defaults.
        assert_eq!(site.controller.flash_interval_ms, 100);
    }

    #[test]
    fn test_invalid_card_rejected() {
        let site = SiteConfig {
            cards: vec!["nothex!".to_string()],
            controller: ControllerConfig::default(),
        };
        assert!(site.authorization().is_err());
    }

    #[test]
    fn test_duplicate_cards_rejected() {
        let site = SiteConfig {
            cards: vec![DEMO_CARD_SEAT_1.to_string(), DEMO_CARD_SEAT_1.to_string()],
            controller: ControllerConfig::default(),
        };
        assert!(site.authorization().is_err());
    }
}
