//! Mock controller for testing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::client::{Attribute, LightController};
use crate::color::Color;
use crate::error::ControllerError;
use crate::state::{DeviceState, Power};

/// A mock light controller for testing.
///
/// This allows testing code that depends on [`LightController`] without a
/// device on the network. Updates mutate an in-memory [`DeviceState`] and
/// echo the accepted value, the way the device does. Switching the mock
/// offline makes every operation fail, which exercises the revert paths.
///
/// # Example
///
/// ```
/// use glowctl_core::{LightController, MockLightController, Power};
///
/// # async fn demo() {
/// let mock = MockLightController::new();
/// mock.set_power(Power::On).await.unwrap();
/// assert_eq!(mock.fetch_state().await.unwrap().power, Power::On);
/// # }
/// ```
pub struct MockLightController {
    state: Mutex<DeviceState>,
    offline: AtomicBool,
}

impl MockLightController {
    /// Create a mock controller with default state (off, black).
    pub fn new() -> Self {
        Self::with_state(DeviceState::default())
    }

    /// Create a mock controller with custom initial state.
    pub fn with_state(state: DeviceState) -> Self {
        Self {
            state: Mutex::new(state),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate the device dropping off the network (or coming back).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }
}

impl Default for MockLightController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LightController for MockLightController {
    async fn fetch_state(&self) -> Result<DeviceState, ControllerError> {
        if self.is_offline() {
            return Err(ControllerError::Offline);
        }
        Ok(*self.state.lock().unwrap())
    }

    async fn set_power(&self, value: Power) -> Result<Power, ControllerError> {
        if self.is_offline() {
            return Err(ControllerError::rejected(
                Attribute::Power,
                ControllerError::Offline,
            ));
        }
        self.state.lock().unwrap().power = value;
        Ok(value)
    }

    async fn set_color(&self, value: Color) -> Result<Color, ControllerError> {
        if self.is_offline() {
            return Err(ControllerError::rejected(
                Attribute::Color,
                ControllerError::Offline,
            ));
        }
        self.state.lock().unwrap().color = value;
        Ok(value)
    }
}
