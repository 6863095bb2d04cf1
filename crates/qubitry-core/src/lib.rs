//! # qubitry-core
//!
//! The request-context workbench for the Qubitry oncology assistant.
//!
//! This crate provides:
//! - The two trait seams (`InteractionChecker`, `IntakeValidator`)
//! - `AppState`, the in-memory account and patient store
//! - The `Workbench` that runs account and patient operations over that state
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qubitry_core::{AppState, Workbench};
//!
//! let mut state = AppState::new();
//! workbench.sign_up(&mut state, &form)?;
//! let session = workbench.log_in(&state, "dr-lee", "secret")?;
//! ```

pub mod state;
pub mod traits;
pub mod workbench;

pub use state::{AppState, UserDirectory};
pub use workbench::Workbench;

#[cfg(test)]
mod tests {
    use crate::state::UserDirectory;

    #[test]
    fn directory_rejects_duplicate_registration() {
        let mut users = UserDirectory::default();
        assert!(users.register("dr-lee", "pw"));
        assert!(!users.register("dr-lee", "other"));
        assert_eq!(users.len(), 1);
        assert!(users.verify("dr-lee", "pw"));
        assert!(!users.verify("dr-lee", "other"));
    }

    #[test]
    fn same_password_different_users_verify_independently() {
        let mut users = UserDirectory::default();
        users.register("a", "shared");
        users.register("b", "shared");
        assert!(users.verify("a", "shared"));
        assert!(users.verify("b", "shared"));
        assert!(!users.verify("c", "shared"));
    }
}
