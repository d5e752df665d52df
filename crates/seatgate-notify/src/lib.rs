//! Notification sink for the seatgate access controller.
//!
//! Consumes access [`Outcome`](seatgate_access::Outcome)s and turns them
//! into operator-visible artifacts: bounded event log lines, a time-boxed
//! alert overlay, and actuator feedback requests. A display driver polls
//! the sink's views; nothing here pushes.

pub mod alert;
pub mod event_log;
pub mod sink;

pub use alert::{Alert, AlertState};
pub use event_log::EventLog;
pub use sink::{DisplayView, Feedback, NotificationSink};
