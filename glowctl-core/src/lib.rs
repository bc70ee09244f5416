//! Client API for ESP8266-style RGB light controllers.
//!
//! This crate talks to a single networked light device that exposes a tiny
//! HTTP JSON API: an aggregate-state endpoint plus one update endpoint each
//! for power and color. It also provides [`PanelState`], the reconciliation
//! state machine a control surface uses to apply updates optimistically and
//! confirm or revert them against the device's answer.
//!
//! # Example
//!
//! ```no_run
//! use glowctl_core::{HttpLightController, LightController, PanelState, Power};
//!
//! # async fn demo() -> Result<(), glowctl_core::ControllerError> {
//! let controller = HttpLightController::new("http://esp8266.local");
//!
//! // Fetch the device's current state and seed the panel with it.
//! let state = controller.fetch_state().await?;
//! let mut panel = PanelState::from_device(state);
//!
//! // Stage the change optimistically, then confirm or revert it.
//! panel.stage_power(Power::On);
//! match controller.set_power(Power::On).await {
//!     Ok(accepted) => panel.confirm_power(accepted),
//!     Err(_) => panel.reject_power(),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! Use [`MockLightController`] to test code without a device:
//!
//! ```
//! use glowctl_core::{Color, LightController, MockLightController};
//!
//! # async fn demo() {
//! let mock = MockLightController::new();
//! mock.set_color(Color::new(128, 255, 64)).await.unwrap();
//! assert_eq!(mock.fetch_state().await.unwrap().color, Color::new(128, 255, 64));
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod color;
mod error;
mod mock;
mod state;

// Re-export public API
pub use client::{Attribute, HttpLightController, LightController};
pub use color::{Color, UiColor};
pub use error::ControllerError;
pub use mock::MockLightController;
pub use state::{DeviceState, PanelState, Power};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_controller_power_round_trip() {
        let mock = MockLightController::new();

        let state = mock.fetch_state().await.unwrap();
        assert_eq!(state.power, Power::Off);

        let accepted = mock.set_power(Power::On).await.unwrap();
        assert_eq!(accepted, Power::On);
        assert_eq!(mock.fetch_state().await.unwrap().power, Power::On);
    }

    #[tokio::test]
    async fn test_mock_controller_offline_fetch_fails() {
        let mock = MockLightController::new();
        mock.set_offline(true);

        assert!(matches!(
            mock.fetch_state().await,
            Err(ControllerError::Offline)
        ));
    }

    #[tokio::test]
    async fn test_mock_controller_offline_update_names_attribute() {
        let mock = MockLightController::new();
        mock.set_offline(true);

        let err = mock.set_color(Color::new(1, 2, 3)).await.unwrap_err();
        assert!(matches!(
            err,
            ControllerError::UpdateRejected {
                attribute: Attribute::Color,
                ..
            }
        ));

        // The state is untouched by the rejected update.
        mock.set_offline(false);
        assert_eq!(mock.fetch_state().await.unwrap().color, Color::default());
    }

    #[tokio::test]
    async fn test_optimistic_update_flow_against_mock() {
        let mock = MockLightController::with_state(DeviceState {
            power: Power::Off,
            color: Color::new(10, 20, 30),
        });
        let mut panel = PanelState::from_device(mock.fetch_state().await.unwrap());

        // Successful update: staged value becomes confirmed.
        panel.stage_power(Power::On);
        match mock.set_power(Power::On).await {
            Ok(accepted) => panel.confirm_power(accepted),
            Err(_) => panel.reject_power(),
        }
        assert_eq!(panel.power(), Power::On);
        assert!(!panel.power_pending());

        // Failed update: staged value is dropped, display reverts.
        mock.set_offline(true);
        panel.stage_color(Color::new(200, 0, 0));
        match mock.set_color(Color::new(200, 0, 0)).await {
            Ok(accepted) => panel.confirm_color(accepted),
            Err(_) => panel.reject_color(),
        }
        assert_eq!(panel.color(), Color::new(10, 20, 30));
    }
}
