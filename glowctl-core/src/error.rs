//! Error types for the light controller.

use crate::client::Attribute;

/// Errors that can occur when talking to the light controller.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The device could not be reached, or the aggregate-state fetch
    /// failed. Terminal for the session: the panel never connects.
    #[error("failed to reach device: {0}")]
    Connection(#[from] reqwest::Error),

    /// A power or color update was not accepted. Recoverable: the caller
    /// reverts the affected control and may try again.
    #[error("{attribute} update rejected: {source}")]
    UpdateRejected {
        /// The attribute whose update failed.
        attribute: Attribute,
        /// The underlying failure.
        #[source]
        source: Box<ControllerError>,
    },

    /// The controller was switched offline. Produced by
    /// [`MockLightController`](crate::MockLightController).
    #[error("device is offline")]
    Offline,
}

impl ControllerError {
    pub(crate) fn rejected(attribute: Attribute, source: ControllerError) -> Self {
        Self::UpdateRejected {
            attribute,
            source: Box::new(source),
        }
    }
}
