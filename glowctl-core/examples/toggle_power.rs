//! Example: Toggle the light's power on or off.
//!
//! Run with: `cargo run --example toggle_power -- http://<device-address>`

use glowctl_core::{ControllerError, HttpLightController, LightController};

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    // Initialize logging (optional)
    env_logger::init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://esp8266.local".to_string());

    let controller = HttpLightController::new(base_url);

    // Fetch the device's current state
    println!("Fetching device state...");
    let state = controller.fetch_state().await?;
    println!(
        "Current state: power={}, color={}",
        state.power, state.color
    );

    // Toggle power
    match controller.set_power(state.power.toggled()).await {
        Ok(accepted) => println!("Power is now {accepted}"),
        Err(e) => eprintln!("Error setting power: {e}"),
    }

    Ok(())
}
