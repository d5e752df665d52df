//! The access controller state machine.

use crate::config::ControllerConfig;
use seatgate_access::{AuthorizationList, Outcome, ResourceRegistry, apply, decide};
use seatgate_core::CardUid;
use seatgate_hardware::{
    HardwareError,
    traits::{Actuator, CardReader},
};
use seatgate_notify::{Feedback, NotificationSink};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Controller-level error type.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A device failed mid-operation.
    #[error("Hardware error: {0}")]
    Hardware(#[from] HardwareError),

    /// Configuration or registry consistency fault.
    #[error(transparent)]
    Core(#[from] seatgate_core::Error),
}

pub type Result<T> = std::result::Result<T, ControllerError>;

/// Orchestrates one reader and one actuator bank over a resource registry.
///
/// The controller owns all mutable state: the registry, the notification
/// sink, and both devices. One instance is the single logical thread of
/// control; nothing here is shared or locked.
///
/// Generic over the device traits so production drivers and mocks plug in
/// without dynamic dispatch.
pub struct AccessController<R: CardReader, A: Actuator> {
    reader: R,
    actuator: A,
    registry: ResourceRegistry,
    auth: AuthorizationList,
    sink: NotificationSink,
    config: ControllerConfig,
}

impl<R: CardReader, A: Actuator> AccessController<R, A> {
    /// Create a controller for the given site.
    ///
    /// The registry is sized to the authorization list: card *i* is bound to
    /// resource *i*, and resource *i* drives actuator channel *i*.
    ///
    /// # Errors
    /// Returns a configuration error if the actuator bank has fewer channels
    /// than there are authorized cards.
    pub fn new(
        reader: R,
        actuator: A,
        auth: AuthorizationList,
        config: ControllerConfig,
    ) -> Result<Self> {
        let registry = ResourceRegistry::new(auth.len());
        Self::with_registry(reader, actuator, auth, registry, config)
    }

    /// Create a controller over an existing registry.
    ///
    /// Lets an embedder resume from known occupancy instead of starting with
    /// every resource free.
    ///
    /// # Errors
    /// Returns a configuration error if the registry size does not match the
    /// authorization list or the actuator bank is too small.
    pub fn with_registry(
        reader: R,
        actuator: A,
        auth: AuthorizationList,
        registry: ResourceRegistry,
        config: ControllerConfig,
    ) -> Result<Self> {
        if actuator.channel_count() < auth.len() {
            return Err(seatgate_core::Error::Config(format!(
                "Actuator bank has {} channels but {} resources are configured",
                actuator.channel_count(),
                auth.len()
            ))
            .into());
        }

        if registry.len() != auth.len() {
            return Err(seatgate_core::Error::Config(format!(
                "Registry has {} resources but {} cards are authorized",
                registry.len(),
                auth.len()
            ))
            .into());
        }

        let sink = NotificationSink::with_alert_duration(config.alert_duration());

        Ok(Self {
            reader,
            actuator,
            registry,
            auth,
            sink,
            config,
        })
    }

    /// Pulse each actuator channel on then off, in index order.
    ///
    /// Run once at startup so an operator can see every channel respond
    /// before the first card is accepted.
    ///
    /// # Errors
    /// Returns an error if any channel fails to switch.
    pub async fn self_test(&mut self) -> Result<()> {
        info!(channels = self.registry.len(), "Running actuator self test");
        for index in 0..self.registry.len() {
            self.actuator.set_state(index, true).await?;
            sleep(self.config.flash_interval()).await;
            self.actuator.set_state(index, false).await?;
            sleep(self.config.flash_interval()).await;
        }
        Ok(())
    }

    /// Handle one card presentation end to end.
    ///
    /// Decides, commits registry changes, drives the steady actuator state,
    /// records the event, and plays any transient flash feedback. Returns
    /// the outcome so embedders can react to it.
    ///
    /// # Errors
    /// Returns an error on actuator failure or registry inconsistency.
    pub async fn handle_scan(&mut self, uid: CardUid) -> Result<Outcome> {
        debug!(card = %uid, "Card scanned");
        let outcome = decide(&uid, &self.registry, &self.auth);
        apply(outcome, &uid, &mut self.registry)?;

        match outcome {
            Outcome::Assign(index) => {
                self.actuator.set_state(index, true).await?;
                info!(card = %uid, seat = index + 1, "Seat assigned");
            }
            Outcome::Release(index) => {
                self.actuator.set_state(index, false).await?;
                info!(card = %uid, seat = index + 1, "Seat released");
            }
            Outcome::AlreadyOccupied(index) => {
                warn!(card = %uid, seat = index + 1, "Seat already occupied");
            }
            Outcome::Unauthorized { all_full } => {
                warn!(card = %uid, all_full, "Unauthorized card");
            }
        }

        let feedback = self.sink.notify(&outcome);
        self.run_feedback(feedback).await?;
        self.sink.update();

        Ok(outcome)
    }

    /// Play a transient flash sequence on the actuator bank.
    ///
    /// Every sequence ends by writing the authoritative occupancy back to
    /// the affected channels, so a flash can never leave an actuator in a
    /// state that disagrees with the registry.
    async fn run_feedback(&mut self, feedback: Feedback) -> Result<()> {
        match feedback {
            Feedback::None => {}
            Feedback::FlashResource { resource, cycles } => {
                debug!(resource, cycles, "Flashing occupied resource");
                for _ in 0..cycles {
                    self.actuator.set_state(resource, false).await?;
                    sleep(self.config.flash_interval()).await;
                    self.actuator.set_state(resource, true).await?;
                    sleep(self.config.flash_interval()).await;
                }
                self.actuator
                    .set_state(resource, self.registry.is_occupied(resource))
                    .await?;
            }
            Feedback::FlashAll { cycles } => {
                debug!(cycles, "Flashing all actuators");
                for _ in 0..cycles {
                    for index in 0..self.registry.len() {
                        self.actuator.set_state(index, true).await?;
                    }
                    sleep(self.config.flash_interval()).await;
                    for index in 0..self.registry.len() {
                        self.actuator.set_state(index, false).await?;
                    }
                    sleep(self.config.flash_interval()).await;
                }
                let occupancy: Vec<bool> = self.registry.occupancy().collect();
                for (index, occupied) in occupancy.into_iter().enumerate() {
                    self.actuator.set_state(index, occupied).await?;
                }
            }
        }
        Ok(())
    }

    /// Run the poll loop until a device fails.
    ///
    /// Each iteration: reclaim expired alerts, poll for a card, read and
    /// handle it, halt the card, debounce. An empty reader field costs one
    /// poll-interval sleep.
    ///
    /// # Errors
    /// Returns the first device or consistency error; the loop has no exit
    /// on the success path.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            resources = self.registry.len(),
            "Access controller started"
        );

        loop {
            self.sink.update();

            if !self.reader.poll_presence().await? {
                sleep(self.config.poll_interval()).await;
                continue;
            }

            let Some(scan) = self.reader.read_identifier().await? else {
                // Card left the field between presence check and read.
                continue;
            };

            self.handle_scan(scan.uid).await?;
            self.reader.release_card().await?;
            sleep(self.config.debounce()).await;
        }
    }

    /// Current resource registry.
    #[must_use]
    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Notification sink (log and alert views).
    #[must_use]
    pub fn sink(&self) -> &NotificationSink {
        &self.sink
    }

    /// Mutable sink access, for display drivers that poll expiry themselves.
    pub fn sink_mut(&mut self) -> &mut NotificationSink {
        &mut self.sink
    }

    /// The actuator bank.
    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Active timing configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatgate_hardware::mock::{MockActuator, MockReader, MockReaderHandle};

    fn card(n: u8) -> CardUid {
        CardUid::new([n, n, n, n])
    }

    fn fast_config() -> ControllerConfig {
        ControllerConfig {
            debounce_ms: 1,
            flash_interval_ms: 1,
            alert_duration_ms: 20,
            poll_interval_ms: 1,
        }
    }

    fn controller_two_seats() -> (
        AccessController<MockReader, MockActuator>,
        MockReaderHandle,
    ) {
        let (reader, handle) = MockReader::new();
        let actuator = MockActuator::new(2);
        let auth = AuthorizationList::new(vec![card(1), card(2)]).unwrap();
        let controller = AccessController::new(reader, actuator, auth, fast_config()).unwrap();
        (controller, handle)
    }

    #[test]
    fn test_new_rejects_undersized_actuator_bank() {
        let (reader, _handle) = MockReader::new();
        let actuator = MockActuator::new(1);
        let auth = AuthorizationList::new(vec![card(1), card(2)]).unwrap();

        let result = AccessController::new(reader, actuator, auth, fast_config());
        assert!(matches!(
            result,
            Err(ControllerError::Core(seatgate_core::Error::Config(_)))
        ));
    }

    #[tokio::test]
    async fn test_self_test_pulses_every_channel() {
        let (mut controller, _handle) = controller_two_seats();
        controller.self_test().await.unwrap();

        assert_eq!(
            controller.actuator().transitions(),
            &[(0, true), (0, false), (1, true), (1, false)]
        );
        assert_eq!(controller.actuator().states(), &[false, false]);
    }

    #[tokio::test]
    async fn test_assign_turns_actuator_on() {
        let (mut controller, _handle) = controller_two_seats();
        let outcome = controller.handle_scan(card(1)).await.unwrap();

        assert_eq!(outcome, Outcome::Assign(0));
        assert!(controller.registry().is_occupied(0));
        assert_eq!(controller.actuator().states(), &[true, false]);
    }

    #[tokio::test]
    async fn test_release_turns_actuator_off() {
        let (mut controller, _handle) = controller_two_seats();
        controller.handle_scan(card(1)).await.unwrap();
        let outcome = controller.handle_scan(card(1)).await.unwrap();

        assert_eq!(outcome, Outcome::Release(0));
        assert!(!controller.registry().is_occupied(0));
        assert_eq!(controller.actuator().states(), &[false, false]);
    }

    #[tokio::test]
    async fn test_unauthorized_flash_restores_occupancy() {
        let (mut controller, _handle) = controller_two_seats();
        controller.handle_scan(card(1)).await.unwrap();

        let outcome = controller.handle_scan(card(99)).await.unwrap();
        assert_eq!(outcome, Outcome::Unauthorized { all_full: false });

        // After the 3-cycle flash across both channels, each channel is
        // restored to its registry occupancy.
        assert_eq!(controller.actuator().states(), &[true, false]);
        assert!(controller.registry().is_occupied(0));
        assert!(!controller.registry().is_occupied(1));
    }

    #[tokio::test]
    async fn test_unauthorized_while_full_skips_flash() {
        let (mut controller, _handle) = controller_two_seats();
        controller.handle_scan(card(1)).await.unwrap();
        controller.handle_scan(card(2)).await.unwrap();

        let mark = controller.actuator().transitions().len();
        let outcome = controller.handle_scan(card(99)).await.unwrap();

        assert_eq!(outcome, Outcome::Unauthorized { all_full: true });
        // No flash, no restore writes: the bank is untouched.
        assert!(controller.actuator().transitions_since(mark).is_empty());
        assert_eq!(controller.actuator().states(), &[true, true]);
    }

    #[tokio::test]
    async fn test_occupied_request_flashes_and_restores_target() {
        // Resume from a registry where another card holds seat 1, so the
        // authorized requester for it gets refused.
        let (reader, _handle) = MockReader::new();
        let mut actuator = MockActuator::new(2);
        actuator.set_state(0, true).await.unwrap();
        actuator.clear_history();

        let auth = AuthorizationList::new(vec![card(1), card(2)]).unwrap();
        let mut registry = ResourceRegistry::new(2);
        registry.assign(0, card(9)).unwrap();

        let mut controller =
            AccessController::with_registry(reader, actuator, auth, registry, fast_config())
                .unwrap();

        let outcome = controller.handle_scan(card(1)).await.unwrap();
        assert_eq!(outcome, Outcome::AlreadyOccupied(0));

        // Two off/on cycles on the target channel, then the authoritative
        // occupied state written back.
        assert_eq!(
            controller.actuator().transitions(),
            &[
                (0, false),
                (0, true),
                (0, false),
                (0, true),
                (0, true),
            ]
        );
        assert_eq!(controller.actuator().states(), &[true, false]);
    }

    #[tokio::test]
    async fn test_with_registry_rejects_size_mismatch() {
        let (reader, _handle) = MockReader::new();
        let actuator = MockActuator::new(2);
        let auth = AuthorizationList::new(vec![card(1), card(2)]).unwrap();
        let registry = ResourceRegistry::new(3);

        let result =
            AccessController::with_registry(reader, actuator, auth, registry, fast_config());
        assert!(matches!(
            result,
            Err(ControllerError::Core(seatgate_core::Error::Config(_)))
        ));
    }
}
