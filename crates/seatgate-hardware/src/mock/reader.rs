//! Mock proximity-card reader.
//!
//! Simulates a card reader that can be driven programmatically: a handle
//! "taps" cards onto the reader through a channel, and the reader side
//! reports them through the normal [`CardReader`] poll cycle.

use crate::{
    Result,
    traits::{CardReader, ScanData},
};
use seatgate_core::CardUid;
use tokio::sync::mpsc;

/// Mock card reader for testing and development.
///
/// # Examples
///
/// ```
/// use seatgate_hardware::mock::MockReader;
/// use seatgate_hardware::traits::CardReader;
/// use seatgate_core::CardUid;
///
/// #[tokio::main]
/// async fn main() -> seatgate_hardware::Result<()> {
///     let (mut reader, handle) = MockReader::new();
///
///     let uid = CardUid::new([0x13, 0xA3, 0x50, 0x11]);
///     handle.present(uid).await?;
///
///     assert!(reader.poll_presence().await?);
///     let scan = reader.read_identifier().await?.unwrap();
///     assert_eq!(scan.uid, uid);
///     reader.release_card().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockReader {
    /// Channel receiver for presented cards.
    card_rx: mpsc::Receiver<CardUid>,

    /// Device name.
    name: String,

    /// How many times the current card was halted (test visibility).
    halt_count: usize,
}

impl MockReader {
    /// Create a mock reader with the default name.
    ///
    /// Returns the reader and a handle used to simulate card taps.
    pub fn new() -> (Self, MockReaderHandle) {
        Self::with_name("Mock Card Reader".to_string())
    }

    /// Create a mock reader with a custom name.
    pub fn with_name(name: String) -> (Self, MockReaderHandle) {
        let (card_tx, card_rx) = mpsc::channel(32);

        let reader = Self {
            card_rx,
            name: name.clone(),
            halt_count: 0,
        };

        let handle = MockReaderHandle { card_tx, name };

        (reader, handle)
    }

    /// Device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How many times `release_card` has been called.
    pub fn halt_count(&self) -> usize {
        self.halt_count
    }
}

impl CardReader for MockReader {
    async fn poll_presence(&mut self) -> Result<bool> {
        Ok(!self.card_rx.is_empty())
    }

    async fn read_identifier(&mut self) -> Result<Option<ScanData>> {
        match self.card_rx.try_recv() {
            Ok(uid) => Ok(Some(ScanData::now(uid))),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(
                crate::HardwareError::disconnected("mock reader channel closed"),
            ),
        }
    }

    async fn release_card(&mut self) -> Result<()> {
        self.halt_count += 1;
        Ok(())
    }
}

/// Handle for driving a [`MockReader`].
#[derive(Debug, Clone)]
pub struct MockReaderHandle {
    card_tx: mpsc::Sender<CardUid>,
    name: String,
}

impl MockReaderHandle {
    /// Present a card to the reader.
    ///
    /// # Errors
    /// Returns an error if the reader has been dropped.
    pub async fn present(&self, uid: CardUid) -> Result<()> {
        self.card_tx
            .send(uid)
            .await
            .map_err(|_| crate::HardwareError::disconnected("mock reader dropped"))
    }

    /// Device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
