use mcintent_assets::RegistryError;
use mcintent_core::{EntityError, InvalidPlayerName, UnsupportedShape};
use thiserror::Error;

/// Why an intent could not be turned into a command.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Registry dump missing, unparsable, or name not present.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Entity tree failed boundary validation.
    #[error("invalid entity: {0}")]
    InvalidEntity(#[from] EntityError),
    /// Shape outside `line`, `square`, `cube`.
    #[error(transparent)]
    UnsupportedShape(#[from] UnsupportedShape),
    /// Player named with text that cannot appear in a command.
    #[error(transparent)]
    InvalidPlayerName(#[from] InvalidPlayerName),
    /// Position phrase this compiler does not know.
    #[error("unsupported position: {0}")]
    UnsupportedPosition(String),
    /// Weather element outside `clear`, `rain`, `thunder`.
    #[error("unsupported weather: {0}")]
    UnsupportedWeather(String),
    /// Time-of-day element without a tick value.
    #[error("unsupported time of day: {0}")]
    UnsupportedTime(String),
    /// The matcher could not pick a single interpretation.
    #[error("ambiguous request")]
    Ambiguous,
    /// A nested entity the grammar guarantees is missing.
    #[error("malformed entity tree: {0}")]
    Structural(String),
}

/// Coarse split callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself is unusable; report it back to the user.
    Rejection,
    /// Upstream data or contract violation; report to the operator.
    Fault,
}

impl CompileError {
    /// Classify the failure.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Registry(RegistryError::UnknownName { .. })
            | Self::UnsupportedShape(_)
            | Self::InvalidPlayerName(_)
            | Self::UnsupportedPosition(_)
            | Self::UnsupportedWeather(_)
            | Self::UnsupportedTime(_)
            | Self::Ambiguous => ErrorClass::Rejection,
            Self::Registry(_) | Self::InvalidEntity(_) | Self::Structural(_) => ErrorClass::Fault,
        }
    }

    /// Whether the user should be told to rephrase.
    pub fn is_rejection(&self) -> bool {
        self.class() == ErrorClass::Rejection
    }

    pub(crate) fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }
}
