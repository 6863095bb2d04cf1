//! In-memory application state.
//!
//! `AppState` is owned by the front end and handed to the workbench by
//! reference on every call. It lives for the process and is never persisted.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use qubitry_contracts::patient::Patient;

/// Registered accounts.
///
/// Passwords are kept as a SHA-256 digest of `username:password` so the
/// directory never holds them in plaintext.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    credentials: HashMap<String, String>,
}

impl UserDirectory {
    /// Return true if `username` is already registered.
    pub fn contains(&self, username: &str) -> bool {
        self.credentials.contains_key(username)
    }

    /// Register `username`. Returns false, leaving the directory unchanged,
    /// if the name is already taken.
    pub fn register(&mut self, username: &str, password: &str) -> bool {
        if self.contains(username) {
            return false;
        }
        self.credentials
            .insert(username.to_string(), credential_digest(username, password));
        true
    }

    /// Return true if `password` matches the one registered for `username`.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.credentials
            .get(username)
            .is_some_and(|stored| *stored == credential_digest(username, password))
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

fn credential_digest(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Everything the workbench reads and writes: accounts and patients.
///
/// Patients from every account share one list; each carries its `owner` and
/// the workbench filters by the session's username.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub users: UserDirectory,
    pub patients: Vec<Patient>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
