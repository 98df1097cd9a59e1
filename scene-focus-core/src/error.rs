//! Error types

use thiserror::Error;

use crate::screen::ScreenId;

/// Error returned by a focus handler
///
/// Handler errors are not wrapped on their way out of a dispatch, so the
/// host can downcast them back to its own error type.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Registration was attempted with an unusable component
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("component for scene `{screen_id}` does not implement the required focus handler")]
    MissingFocusHandler { screen_id: ScreenId },
}

/// A component's focus handler was invoked while the component was
/// already borrowed, typically by a focus dispatched from its own handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("focus handler for scene `{screen_id}` is already running")]
pub struct HandlerBusy {
    pub screen_id: ScreenId,
}
