//! Color value types and channel-range conversion.

use serde::{Deserialize, Serialize};

/// A color in the device's native channel range.
///
/// The device encodes hue, saturation and value each as an integer in
/// `0..=255`. This is the representation sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Hue channel (0-255).
    pub h: u8,
    /// Saturation channel (0-255).
    pub s: u8,
    /// Value channel (0-255).
    pub v: u8,
}

impl Color {
    /// Create a color from device channel values.
    pub fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Convert to the UI-native HSV representation.
    ///
    /// Hue maps to degrees, saturation and value to percent.
    pub fn to_ui(self) -> UiColor {
        UiColor {
            hue: f32::from(self.h) / 255.0 * 360.0,
            saturation: f32::from(self.s) / 255.0 * 100.0,
            value: f32::from(self.v) / 255.0 * 100.0,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(h={}, s={}, v={})", self.h, self.s, self.v)
    }
}

/// A color in UI-native HSV ranges.
///
/// Hue in degrees `[0, 360)`, saturation and value in percent `[0, 100]`.
/// This representation exists purely for widget interop; the stored and
/// transmitted form is always [`Color`].
///
/// Converting device→UI→device reproduces the original channels within
/// ±1 per channel:
///
/// ```
/// use glowctl_core::Color;
///
/// let original = Color::new(128, 255, 64);
/// let back = original.to_ui().to_device();
/// assert!(original.h.abs_diff(back.h) <= 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UiColor {
    /// Hue in degrees (0-360).
    pub hue: f32,
    /// Saturation in percent (0-100).
    pub saturation: f32,
    /// Value in percent (0-100).
    pub value: f32,
}

impl UiColor {
    /// Create a UI color from degrees and percentages.
    pub fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Convert to the device channel range, rounding each channel.
    pub fn to_device(self) -> Color {
        Color {
            h: (self.hue / 360.0 * 255.0).round() as u8,
            s: (self.saturation / 100.0 * 255.0).round() as u8,
            v: (self.value / 100.0 * 255.0).round() as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_to_ui_known_values() {
        let ui = Color::new(128, 255, 64).to_ui();
        assert!((ui.hue - 180.706).abs() < 0.01);
        assert!((ui.saturation - 100.0).abs() < f32::EPSILON);
        assert!((ui.value - 25.098).abs() < 0.01);
    }

    #[test]
    fn test_ui_to_device_known_values() {
        let device = UiColor::new(180.0, 50.0, 100.0).to_device();
        assert_eq!(device, Color::new(128, 128, 255));
    }

    #[test]
    fn test_channel_extremes() {
        assert_eq!(Color::new(0, 0, 0).to_ui().to_device(), Color::new(0, 0, 0));
        assert_eq!(
            Color::new(255, 255, 255).to_ui(),
            UiColor::new(360.0, 100.0, 100.0)
        );
        assert_eq!(
            UiColor::new(360.0, 100.0, 100.0).to_device(),
            Color::new(255, 255, 255)
        );
    }

    #[test]
    fn test_round_trip_within_one_per_channel() {
        for h in (0..=255).step_by(3) {
            for sv in (0..=255).step_by(17) {
                let original = Color::new(h as u8, sv as u8, (255 - sv) as u8);
                let back = original.to_ui().to_device();
                assert!(original.h.abs_diff(back.h) <= 1, "h: {original} -> {back}");
                assert!(original.s.abs_diff(back.s) <= 1, "s: {original} -> {back}");
                assert!(original.v.abs_diff(back.v) <= 1, "v: {original} -> {back}");
            }
        }
    }

    #[test]
    fn test_serde_wire_shape() {
        let color = Color::new(12, 34, 56);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, r#"{"h":12,"s":34,"v":56}"#);
        let parsed: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, color);
    }
}
