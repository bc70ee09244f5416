//! Light controller implementations.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ControllerError;
use crate::state::{DeviceState, Power};

/// A device attribute addressed by an update request.
///
/// Each attribute has its own endpoint on the device; updates to different
/// attributes are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// The power attribute, served at `{base}/power`.
    Power,
    /// The color attribute, served at `{base}/color`.
    Color,
}

impl Attribute {
    fn path(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Color => "color",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

// =============================================================================
// Light Controller Trait
// =============================================================================

/// Trait for light controller implementations.
///
/// This allows for mock implementations in tests.
#[async_trait]
pub trait LightController: Send + Sync {
    /// Fetch the device's aggregate state.
    ///
    /// A failure here is terminal for the session: the caller should show
    /// a failure indicator and keep the controls hidden.
    async fn fetch_state(&self) -> Result<DeviceState, ControllerError>;

    /// Update the power attribute.
    ///
    /// Returns the value the device accepted, which the caller records as
    /// the new confirmed value.
    async fn set_power(&self, value: Power) -> Result<Power, ControllerError>;

    /// Update the color attribute.
    ///
    /// Returns the value the device accepted, which the caller records as
    /// the new confirmed value.
    async fn set_color(&self, value: Color) -> Result<Color, ControllerError>;
}

// =============================================================================
// HttpLightController
// =============================================================================

#[derive(Serialize, Deserialize)]
struct PowerUpdate {
    value: Power,
}

/// HTTP client for the device's JSON API.
///
/// Talks to the three endpoints the device exposes: `GET {base}/all` for
/// the aggregate state, and `POST {base}/power` / `POST {base}/color` for
/// updates. The device answers each update with a JSON echo of the
/// accepted value.
///
/// # Example
///
/// ```no_run
/// use glowctl_core::{HttpLightController, LightController, Power};
///
/// # async fn demo() -> Result<(), glowctl_core::ControllerError> {
/// let controller = HttpLightController::new("http://esp8266.local");
///
/// let state = controller.fetch_state().await?;
/// controller.set_power(state.power.toggled()).await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpLightController {
    http: Client,
    base_url: String,
}

impl HttpLightController {
    /// Create a controller for the device at `base_url`.
    ///
    /// `base_url` is the device's origin, e.g. `http://esp8266.local` or
    /// `http://192.168.1.40`. A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Post an update payload and decode the device's echo of it.
    async fn post_update<T>(&self, attribute: Attribute, payload: &T) -> Result<T, ControllerError>
    where
        T: Serialize + DeserializeOwned + Sync,
    {
        let result: Result<T, reqwest::Error> = async {
            let response = self
                .http
                .post(self.endpoint(attribute.path()))
                .json(payload)
                .send()
                .await?
                .error_for_status()?;
            response.json().await
        }
        .await;

        result.map_err(|source| ControllerError::rejected(attribute, source.into()))
    }
}

#[async_trait]
impl LightController for HttpLightController {
    async fn fetch_state(&self) -> Result<DeviceState, ControllerError> {
        let state: DeviceState = self
            .http
            .get(self.endpoint("all"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(
            "fetched device state: power={}, color={}",
            state.power, state.color
        );
        Ok(state)
    }

    async fn set_power(&self, value: Power) -> Result<Power, ControllerError> {
        let echo = self
            .post_update(Attribute::Power, &PowerUpdate { value })
            .await?;
        debug!("power update accepted: {}", echo.value);
        Ok(echo.value)
    }

    async fn set_color(&self, value: Color) -> Result<Color, ControllerError> {
        let echo = self.post_update(Attribute::Color, &value).await?;
        debug!("color update accepted: {echo}");
        Ok(echo)
    }
}
