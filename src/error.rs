//! Error types for agility-compe
//!
//! Every variant renders to a user-visible message via [`Error::user_message`];
//! handlers never let an error escape a user action.

use thiserror::Error;

use crate::messages;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// agility-compe error types
#[derive(Error, Debug)]
pub enum Error {
    /// Local form validation failed (no state mutated)
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Authentication provider rejected the request
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Candidate table shape disagrees with the authoritative table
    #[error("Shape mismatch: expected {expected} rows, got {actual}")]
    ShapeMismatch {
        /// Authoritative row count
        expected: usize,
        /// Candidate row count
        actual: usize,
    },

    /// Snapshot could not be written
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Snapshot could not be read back
    #[error("Load error: {0}")]
    Load(#[source] Box<Self>),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration value missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

impl Error {
    /// Mark a read-side failure as a snapshot load error.
    #[must_use]
    pub fn load(self) -> Self {
        match self {
            Self::Load(_) => self,
            other => Self::Load(Box::new(other)),
        }
    }

    /// Render the error as the message shown inline on the page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.user_message(),
            Self::Auth(e) => e.user_message(),
            Self::ShapeMismatch { .. } => messages::SCORE_SHAPE_MISMATCH.to_string(),
            Self::Persistence(_) | Self::Io(_) | Self::Arrow(_) | Self::Parquet(_) => {
                format!("{}: {self}", messages::SAVE_FAILED)
            }
            Self::Load(source) => format!("{}: {source}", messages::LOAD_FAILED),
            Self::NotFound(_) => messages::RECORD_NOT_FOUND.to_string(),
            Self::Config(_) => self.to_string(),
        }
    }
}

/// Local validation failures, recovered inline on the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Sign-in without email or password
    #[error("email and password are required")]
    MissingCredentials,

    /// Sign-up with an empty name, email or password
    #[error("name, email and password are required")]
    MissingRegistrationFields,

    /// Sign-up password below the configured minimum
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length in characters
        min: usize,
    },

    /// Dog entry without name, breed or events
    #[error("dog name, breed and events are required")]
    MissingDogFields,

    /// Update that would leave a dog with no events
    #[error("at least one event must be selected")]
    NoEventsSelected,

    /// Delete submitted without the confirmation checkbox
    #[error("deletion was not confirmed")]
    DeleteNotConfirmed,

    /// Owner already has the maximum number of dogs
    #[error("registration cap of {max} reached")]
    RegistrationCapReached {
        /// Per-owner cap
        max: usize,
    },
}

impl ValidationError {
    /// Localized inline message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredentials => messages::MISSING_CREDENTIALS.to_string(),
            Self::MissingRegistrationFields => messages::MISSING_REGISTRATION_FIELDS.to_string(),
            Self::PasswordTooShort { min } => messages::password_too_short(*min),
            Self::MissingDogFields => messages::MISSING_DOG_FIELDS.to_string(),
            Self::NoEventsSelected => messages::NO_EVENTS_SELECTED.to_string(),
            Self::DeleteNotConfirmed => messages::DELETE_NOT_CONFIRMED.to_string(),
            Self::RegistrationCapReached { max } => messages::registration_cap(*max),
        }
    }
}

/// Structured failure kind reported by the authentication provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Unknown email or wrong password
    InvalidCredentials,
    /// Sign-up with an email that already has an account
    AlreadyRegistered,
    /// Anything else the provider reports
    Provider,
}

/// Error returned by an [`AuthService`](crate::auth::AuthService).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    kind: AuthErrorKind,
    message: String,
    during_sign_up: bool,
}

impl AuthError {
    /// Error raised while signing in.
    #[must_use]
    pub fn sign_in(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            during_sign_up: false,
        }
    }

    /// Error raised while signing up.
    #[must_use]
    pub fn sign_up(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            during_sign_up: true,
        }
    }

    /// Structured kind.
    #[must_use]
    pub const fn kind(&self) -> AuthErrorKind {
        self.kind
    }

    /// Provider message, verbatim.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Localized inline message, chosen by kind.
    #[must_use]
    pub fn user_message(&self) -> String {
        match (self.kind, self.during_sign_up) {
            (AuthErrorKind::AlreadyRegistered, _) => messages::ALREADY_REGISTERED.to_string(),
            (_, true) => messages::sign_up_failed(&self.message),
            (_, false) => messages::sign_in_failed(&self.message),
        }
    }
}
