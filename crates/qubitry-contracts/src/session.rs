//! Session handles and account forms.
//!
//! Login returns a `Session` that the front end passes back into every
//! user-scoped workbench call. Logging out is dropping the handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for one login session.
///
/// Appears in every log line the workbench emits on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The request context for a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: SessionId,
    pub username: String,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            session_id: SessionId::new(),
            username: username.into(),
            started_at: Utc::now(),
        }
    }
}

/// The sign-up form: a username, a password, and its confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm: String,
}
