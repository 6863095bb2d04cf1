//! The Qubitry workbench: account and patient operations over explicit state.
//!
//! Every call receives the `AppState` it works on, and user-scoped calls
//! receive the caller's `Session`. The workbench holds no mutable state of
//! its own, only the trusted components it runs in a fixed order:
//!
//!   form → IntakeValidator → Patient::from_form → AppState
//!   patient → InteractionChecker → alerts

use tracing::{debug, info, warn};

use qubitry_contracts::{
    alert::InteractionAlert,
    error::{QubitryError, QubitryResult},
    patient::{ImportedRecord, Patient, PatientForm},
    session::{Session, SignupForm},
    validate::IntakeSchema,
};

use crate::{
    state::AppState,
    traits::{InteractionChecker, IntakeValidator},
};

/// Runs account and patient operations for whichever session calls it.
///
/// Construct one at startup and share it; it is read-only after `new`.
pub struct Workbench {
    checker: Box<dyn InteractionChecker>,
    validator: Box<dyn IntakeValidator>,
    schema: IntakeSchema,
}

impl Workbench {
    /// Create a workbench from an interaction checker, an intake validator,
    /// and the schema manual-entry forms are validated against.
    pub fn new(
        checker: Box<dyn InteractionChecker>,
        validator: Box<dyn IntakeValidator>,
        schema: IntakeSchema,
    ) -> Self {
        Self { checker, validator, schema }
    }

    /// The interaction checker this workbench was built with.
    pub fn checker(&self) -> &dyn InteractionChecker {
        self.checker.as_ref()
    }

    // ── Accounts ─────────────────────────────────────────────────────────────

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// All three are warnings the user is expected to fix:
    /// `MissingCredentials` when any field is empty, `PasswordMismatch` when
    /// the confirmation differs, `UsernameTaken` when the name exists.
    pub fn sign_up(&self, state: &mut AppState, form: &SignupForm) -> QubitryResult<()> {
        if form.username.is_empty() || form.password.is_empty() || form.confirm.is_empty() {
            return Err(QubitryError::MissingCredentials);
        }
        if form.password != form.confirm {
            return Err(QubitryError::PasswordMismatch);
        }
        if !state.users.register(&form.username, &form.password) {
            return Err(QubitryError::UsernameTaken {
                username: form.username.clone(),
            });
        }

        info!(username = %form.username, "account registered");
        Ok(())
    }

    /// Log in and return the session handle for later calls.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown username or a wrong password.
    pub fn log_in(&self, state: &AppState, username: &str, password: &str) -> QubitryResult<Session> {
        if !state.users.verify(username, password) {
            warn!(username = %username, "login rejected");
            return Err(QubitryError::InvalidCredentials);
        }

        let session = Session::new(username);
        info!(
            session_id = %session.session_id.0,
            username = %username,
            "session started"
        );
        Ok(session)
    }

    // ── Patients ─────────────────────────────────────────────────────────────

    /// Validate a manual-entry form and, if it passes, register the patient
    /// under the session's user.
    ///
    /// # Errors
    ///
    /// `IncompleteRecord` (a warning) when validation fails; nothing is
    /// stored in that case. Validator errors are propagated unchanged.
    pub fn add_patient<'s>(
        &self,
        state: &'s mut AppState,
        session: &Session,
        form: &PatientForm,
    ) -> QubitryResult<&'s Patient> {
        let payload =
            serde_json::to_value(form).map_err(|e| QubitryError::IncompleteRecord {
                reason: format!("form could not be encoded: {e}"),
            })?;

        let report = self.validator.validate(&payload, &self.schema)?;
        if !report.passed {
            let summary = report.summary();
            warn!(
                session_id = %session.session_id.0,
                schema_id = %self.schema.schema_id,
                failures = %summary,
                "patient form rejected"
            );
            return Err(QubitryError::IncompleteRecord { reason: summary });
        }

        let index = state.patients.len();
        state
            .patients
            .push(Patient::from_form(form, session.username.as_str()));

        info!(
            session_id = %session.session_id.0,
            patient = %form.name.trim(),
            "patient added"
        );
        Ok(&state.patients[index])
    }

    /// Register every imported record under the session's user.
    ///
    /// Records arrive already parsed, so this cannot fail part-way; the
    /// return value is the number of patients added.
    pub fn import_records(
        &self,
        state: &mut AppState,
        session: &Session,
        records: Vec<ImportedRecord>,
    ) -> usize {
        let count = records.len();
        state.patients.extend(
            records
                .into_iter()
                .map(|record| Patient::from_import(record, session.username.as_str())),
        );

        info!(
            session_id = %session.session_id.0,
            count,
            "patients imported"
        );
        count
    }

    /// The session user's patients, in the order they were added.
    pub fn patients_for<'s>(&self, state: &'s AppState, session: &Session) -> Vec<&'s Patient> {
        state
            .patients
            .iter()
            .filter(|p| p.owner == session.username)
            .collect()
    }

    /// The `index`-th patient among the session user's own patients.
    ///
    /// # Errors
    ///
    /// `PatientNotFound` when the user has fewer than `index + 1` patients.
    pub fn patient_for<'s>(
        &self,
        state: &'s AppState,
        session: &Session,
        index: usize,
    ) -> QubitryResult<&'s Patient> {
        self.patients_for(state, session)
            .into_iter()
            .nth(index)
            .ok_or(QubitryError::PatientNotFound { index })
    }

    /// Run the interaction checker over one patient.
    pub fn check_patient(&self, patient: &Patient) -> Vec<InteractionAlert> {
        let alerts = self.checker.check(&patient.medications, &patient.lifestyle);
        debug!(
            patient = %patient.name,
            medications = patient.medications.len(),
            alerts = alerts.len(),
            "interaction check complete"
        );
        alerts
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
