//! Error types for the Qubitry workbench.
//!
//! All fallible operations return `QubitryResult<T>`. Several variants are
//! soft warnings (a form the user should fix) rather than failures; front
//! ends use `is_warning()` to tell them apart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QubitryError {
    /// A sign-up field was left empty.
    #[error("fill all fields")]
    MissingCredentials,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("username '{username}' already exists")]
    UsernameTaken { username: String },

    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The manual-entry form failed intake validation. Nothing was stored.
    #[error("fill all fields: {reason}")]
    IncompleteRecord { reason: String },

    /// A CSV row could not be turned into a patient. The whole import is
    /// rejected.
    #[error("malformed CSV row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// The CSV source could not be read at all.
    #[error("patient import failed: {reason}")]
    ImportFailed { reason: String },

    /// Interaction tables or another configuration input is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("no patient at index {index}")]
    PatientNotFound { index: usize },
}

impl QubitryError {
    /// True for input problems the user is asked to correct, which front
    /// ends show as warnings instead of errors.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            QubitryError::MissingCredentials
                | QubitryError::PasswordMismatch
                | QubitryError::UsernameTaken { .. }
                | QubitryError::IncompleteRecord { .. }
        )
    }
}

pub type QubitryResult<T> = Result<T, QubitryError>;
