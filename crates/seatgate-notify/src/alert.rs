//! Time-boxed alert overlay.
//!
//! An alert temporarily replaces the normal log view on the status display.
//! Expiry is polled: the consumer calls [`AlertState::update`] at the top of
//! each cycle (and opportunistically after state changes) and reverts to the
//! log view the first time it observes the alert gone.

use seatgate_core::constants::ALERT_DURATION_MS;
use std::time::{Duration, Instant};

/// One raised alert: up to two display lines plus the raise timestamp.
#[derive(Debug, Clone)]
pub struct Alert {
    pub line1: String,
    pub line2: Option<String>,
    raised_at: Instant,
}

impl Alert {
    /// Time since this alert was raised.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.raised_at.elapsed()
    }
}

/// Holder for the current alert, if any.
///
/// At most one alert is active at a time; raising a new one replaces the
/// old immediately. An alert raised at time T is visible for all queries in
/// `[T, T + duration)` and absent at `T + duration` or later, regardless of
/// whether [`update`](Self::update) has run yet: the view itself checks
/// elapsed time.
#[derive(Debug, Clone)]
pub struct AlertState {
    current: Option<Alert>,
    duration: Duration,
}

impl AlertState {
    /// Create with the standard 3-second duration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_duration(Duration::from_millis(ALERT_DURATION_MS))
    }

    /// Create with a custom duration (test hook).
    #[must_use]
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Raise an alert, replacing any current one.
    pub fn raise(&mut self, line1: impl Into<String>, line2: Option<String>) {
        self.current = Some(Alert {
            line1: line1.into(),
            line2,
            raised_at: Instant::now(),
        });
    }

    /// Whether an unexpired alert is present.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|alert| alert.elapsed() < self.duration)
    }

    /// The current alert lines, or `None` once expired.
    #[must_use]
    pub fn view(&self) -> Option<(&str, Option<&str>)> {
        self.current
            .as_ref()
            .filter(|alert| alert.elapsed() < self.duration)
            .map(|alert| (alert.line1.as_str(), alert.line2.as_deref()))
    }

    /// Drop an expired alert.
    ///
    /// Returns `true` exactly once per expiry, so the consumer can redraw
    /// the log view on that first observation and not flicker afterwards.
    pub fn update(&mut self) -> bool {
        if let Some(alert) = &self.current
            && alert.elapsed() >= self.duration
        {
            self.current = None;
            return true;
        }
        false
    }

    /// Forcibly clear the alert (reset path, not normal expiry).
    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl Default for AlertState {
    fn default() -> Self {
        Self::new()
    }
}
