//! Outcome-to-notification mapping.

use crate::alert::AlertState;
use crate::event_log::EventLog;
use seatgate_access::Outcome;
use seatgate_core::constants::{FLASH_CYCLES_OCCUPIED, FLASH_CYCLES_UNAUTHORIZED};
use std::time::Duration;

/// Transient actuator feedback requested by the sink.
///
/// Flash sequences are bounded and must always end with the actuator
/// restored to its authoritative registry state; the sink only requests,
/// the controller executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// No transient feedback.
    None,

    /// Flash one actuator off/on `cycles` times, then restore.
    FlashResource { resource: usize, cycles: u32 },

    /// Flash every actuator on/off `cycles` times, then restore each.
    FlashAll { cycles: u32 },
}

/// What a status display should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayView {
    /// An active alert overlay: it replaces the log view entirely.
    Alert {
        line1: String,
        line2: Option<String>,
    },

    /// Normal operation: recent log lines, newest first.
    Log(Vec<String>),
}

/// Records human-readable events and raises alert overlays for rejections.
///
/// One sink instance is owned by the controller; a display driver polls
/// [`view`](Self::view) every iteration.
#[derive(Debug, Clone, Default)]
pub struct NotificationSink {
    log: EventLog,
    alert: AlertState,
}

impl NotificationSink {
    /// Create a sink with standard log capacity and alert duration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink with a custom alert duration (test hook).
    #[must_use]
    pub fn with_alert_duration(duration: Duration) -> Self {
        Self {
            log: EventLog::new(),
            alert: AlertState::with_duration(duration),
        }
    }

    /// Record an outcome and return the feedback the actuator driver owes.
    ///
    /// Grants and releases log two lines and raise nothing. Rejections log
    /// one line and raise an alert; the flash request is suppressed for the
    /// unauthorized-while-full case so the "full" signal is not masked by
    /// the generic denial flash.
    pub fn notify(&mut self, outcome: &Outcome) -> Feedback {
        match *outcome {
            Outcome::Assign(index) => {
                let seat = index + 1;
                self.log.push(format!("Actuator {seat} on"));
                self.log.push(format!("Seat {seat} assigned to user"));
                Feedback::None
            }
            Outcome::Release(index) => {
                let seat = index + 1;
                self.log.push(format!("Actuator {seat} off"));
                self.log.push(format!("User has left seat {seat}"));
                Feedback::None
            }
            Outcome::AlreadyOccupied(index) => {
                let seat = index + 1;
                self.log.push(format!("Seat {seat} request refused"));
                self.alert
                    .raise(format!("Resource {seat} already"), Some("occupied".into()));
                Feedback::FlashResource {
                    resource: index,
                    cycles: FLASH_CYCLES_OCCUPIED,
                }
            }
            Outcome::Unauthorized { all_full } => {
                self.log.push("Unknown card - access denied");
                if all_full {
                    self.alert
                        .raise("ACCESS DENIED", Some("All rooms occupied".into()));
                    Feedback::None
                } else {
                    self.alert
                        .raise("ACCESS DENIED", Some("Unauthorized card".into()));
                    Feedback::FlashAll {
                        cycles: FLASH_CYCLES_UNAUTHORIZED,
                    }
                }
            }
        }
    }

    /// Poll alert expiry.
    ///
    /// Returns `true` the first time an expired alert is reclaimed, which
    /// is the consumer's cue to redraw the log view.
    pub fn update(&mut self) -> bool {
        self.alert.update()
    }

    /// Current log lines, newest first, empty slots skipped.
    #[must_use]
    pub fn log_view(&self) -> Vec<&str> {
        self.log.recent()
    }

    /// Current alert lines, if an unexpired alert is up.
    #[must_use]
    pub fn alert_view(&self) -> Option<(&str, Option<&str>)> {
        self.alert.view()
    }

    /// Whether an alert overlay is currently active.
    #[must_use]
    pub fn alert_active(&self) -> bool {
        self.alert.is_active()
    }

    /// What the display should show right now: an active alert wins over
    /// the log view.
    #[must_use]
    pub fn view(&self) -> DisplayView {
        match self.alert.view() {
            Some((line1, line2)) => DisplayView::Alert {
                line1: line1.to_string(),
                line2: line2.map(str::to_string),
            },
            None => DisplayView::Log(self.log.recent().iter().map(|s| s.to_string()).collect()),
        }
    }
}
