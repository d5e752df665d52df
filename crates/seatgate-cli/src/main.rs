//! Seatgate demo binary.
//!
//! Runs the access controller against mock devices: a scripted sequence of
//! card taps exercises assignment, release and denial, and the final display
//! state is printed when the demo window closes. Pass a JSON site file to
//! change the enrolled cards or timings:
//!
//! ```json
//! { "cards": ["13A35011", "0332C00D"], "controller": { "debounce_ms": 500 } }
//! ```

mod site;

use anyhow::{Context, Result};
use seatgate_access::AuthorizationList;
use seatgate_controller::{AccessController, ControllerConfig};
use seatgate_core::CardUid;
use seatgate_hardware::mock::{MockActuator, MockReader, MockReaderHandle};
use seatgate_notify::DisplayView;
use site::SiteConfig;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Gap between scripted card taps; longer than the default debounce.
const DEMO_TAP_GAP: Duration = Duration::from_millis(1500);

/// How long the controller runs before the demo reports and exits.
const DEMO_WINDOW: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let site = match std::env::args().nth(1) {
        Some(path) => SiteConfig::load(&PathBuf::from(path))?,
        None => SiteConfig::default(),
    };

    let auth = site.authorization()?;
    info!(cards = auth.len(), "Site loaded");

    let (reader, handle) = MockReader::new();
    let actuator = MockActuator::new(auth.len());
    let mut controller =
        AccessController::new(reader, actuator, auth.clone(), site.controller.clone())
            .context("Failed to build controller")?;

    controller.self_test().await?;

    tokio::spawn(run_demo_script(handle, auth));

    // The loop runs until the demo window closes or a device fails.
    match timeout(DEMO_WINDOW, controller.run()).await {
        Ok(result) => result?,
        Err(_) => info!("Demo window closed"),
    }

    report(&controller);
    Ok(())
}

/// Tap every enrolled card, release the first seat again, then try a card
/// nobody enrolled.
async fn run_demo_script(handle: MockReaderHandle, auth: AuthorizationList) -> Result<()> {
    sleep(DEMO_TAP_GAP).await;

    for card in auth.iter() {
        info!(%card, "Tapping enrolled card");
        handle.present(*card).await?;
        sleep(DEMO_TAP_GAP).await;
    }

    if let Some(first) = auth.card_for(0) {
        info!(card = %first, "Tapping first card again");
        handle.present(*first).await?;
        sleep(DEMO_TAP_GAP).await;
    }

    let stranger = CardUid::new([0xDE, 0xAD, 0xBE, 0xEF]);
    info!(card = %stranger, "Tapping unenrolled card");
    handle.present(stranger).await?;

    Ok(())
}

fn report(controller: &AccessController<MockReader, MockActuator>) {
    let occupancy: Vec<bool> = controller.registry().occupancy().collect();
    info!(?occupancy, "Final occupancy");

    match controller.sink().view() {
        DisplayView::Alert { line1, line2 } => {
            info!(%line1, line2 = line2.as_deref().unwrap_or(""), "Display: alert");
        }
        DisplayView::Log(lines) => {
            for line in &lines {
                info!(%line, "Display: log");
            }
        }
    }
}
