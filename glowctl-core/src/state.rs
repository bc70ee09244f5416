//! Device state and the panel reconciliation state machine.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Power state of the device.
///
/// The wire encoding is `0`/`1`; any nonzero value deserializes as
/// [`Power::On`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Power {
    /// The light is on.
    On,
    /// The light is off.
    #[default]
    Off,
}

impl Power {
    /// Whether the light is on.
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// The opposite power state.
    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

impl From<u8> for Power {
    fn from(raw: u8) -> Self {
        if raw == 0 { Self::Off } else { Self::On }
    }
}

impl From<Power> for u8 {
    fn from(power: Power) -> Self {
        match power {
            Power::On => 1,
            Power::Off => 0,
        }
    }
}

impl std::fmt::Display for Power {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// The device's combined state, as returned by the aggregate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceState {
    /// Current power state.
    pub power: Power,
    /// Current color in device channel range.
    pub color: Color,
}

/// Reconciliation state for the control panel.
///
/// Tracks, per attribute, the last server-confirmed value and an optional
/// value staged optimistically while its update request is in flight. The
/// displayed value is always the pending one when it exists, otherwise the
/// confirmed one; rejecting an update restores the last confirmed value.
///
/// ```
/// use glowctl_core::{DeviceState, PanelState, Power};
///
/// let mut panel = PanelState::from_device(DeviceState::default());
/// panel.stage_power(Power::On);
/// assert_eq!(panel.power(), Power::On);
/// panel.reject_power();
/// assert_eq!(panel.power(), Power::Off);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelState {
    confirmed_power: Power,
    confirmed_color: Color,
    pending_power: Option<Power>,
    pending_color: Option<Color>,
}

impl PanelState {
    /// Create a panel state confirmed at the given device state.
    pub fn from_device(state: DeviceState) -> Self {
        Self {
            confirmed_power: state.power,
            confirmed_color: state.color,
            pending_power: None,
            pending_color: None,
        }
    }

    /// The power value the panel should display.
    pub fn power(&self) -> Power {
        self.pending_power.unwrap_or(self.confirmed_power)
    }

    /// The color value the panel should display.
    pub fn color(&self) -> Color {
        self.pending_color.unwrap_or(self.confirmed_color)
    }

    /// Whether a power update is awaiting confirmation.
    pub fn power_pending(&self) -> bool {
        self.pending_power.is_some()
    }

    /// Whether a color update is awaiting confirmation.
    pub fn color_pending(&self) -> bool {
        self.pending_color.is_some()
    }

    /// Stage a power value optimistically, ahead of its update request.
    pub fn stage_power(&mut self, value: Power) {
        self.pending_power = Some(value);
    }

    /// Record the power value the device accepted.
    pub fn confirm_power(&mut self, accepted: Power) {
        self.confirmed_power = accepted;
        self.pending_power = None;
    }

    /// Drop the staged power value, reverting to the last confirmed one.
    pub fn reject_power(&mut self) {
        self.pending_power = None;
    }

    /// Stage a color value optimistically, ahead of its update request.
    pub fn stage_color(&mut self, value: Color) {
        self.pending_color = Some(value);
    }

    /// Record the color value the device accepted.
    pub fn confirm_color(&mut self, accepted: Color) {
        self.confirmed_color = accepted;
        self.pending_color = None;
    }

    /// Drop the staged color value, reverting to the last confirmed one.
    pub fn reject_color(&mut self) {
        self.pending_color = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_wire_encoding() {
        assert_eq!(serde_json::to_string(&Power::On).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Power::Off).unwrap(), "0");
        assert_eq!(serde_json::from_str::<Power>("0").unwrap(), Power::Off);
        assert_eq!(serde_json::from_str::<Power>("1").unwrap(), Power::On);
        // The device is trusted but sloppy: any nonzero value means on.
        assert_eq!(serde_json::from_str::<Power>("255").unwrap(), Power::On);
    }

    #[test]
    fn test_device_state_aggregate_shape() {
        let state: DeviceState =
            serde_json::from_str(r#"{"power":1,"color":{"h":128,"s":255,"v":64}}"#).unwrap();
        assert_eq!(state.power, Power::On);
        assert_eq!(state.color, Color::new(128, 255, 64));
    }

    #[test]
    fn test_staged_value_is_displayed_until_settled() {
        let mut panel = PanelState::from_device(DeviceState::default());
        assert_eq!(panel.power(), Power::Off);

        panel.stage_power(Power::On);
        assert_eq!(panel.power(), Power::On);
        assert!(panel.power_pending());

        panel.confirm_power(Power::On);
        assert_eq!(panel.power(), Power::On);
        assert!(!panel.power_pending());
    }

    #[test]
    fn test_rejected_update_reverts_to_confirmed() {
        let mut panel = PanelState::from_device(DeviceState {
            power: Power::Off,
            color: Color::new(10, 20, 30),
        });

        panel.stage_power(Power::On);
        panel.stage_color(Color::new(200, 200, 200));
        panel.reject_power();
        panel.reject_color();

        assert_eq!(panel.power(), Power::Off);
        assert_eq!(panel.color(), Color::new(10, 20, 30));
    }

    #[test]
    fn test_confirming_current_value_is_idempotent() {
        let initial = DeviceState {
            power: Power::On,
            color: Color::new(1, 2, 3),
        };
        let mut panel = PanelState::from_device(initial);
        let before = panel.clone();

        panel.stage_power(Power::On);
        panel.confirm_power(Power::On);
        assert_eq!(panel, before);
    }

    #[test]
    fn test_attributes_settle_independently() {
        let mut panel = PanelState::from_device(DeviceState::default());

        panel.stage_power(Power::On);
        panel.stage_color(Color::new(99, 99, 99));

        // The color response lands first, then the power one.
        panel.confirm_color(Color::new(99, 99, 99));
        assert!(panel.power_pending());
        assert_eq!(panel.color(), Color::new(99, 99, 99));

        panel.reject_power();
        assert_eq!(panel.power(), Power::Off);
        assert_eq!(panel.color(), Color::new(99, 99, 99));
    }
}
