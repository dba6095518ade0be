//! Submission controller: validate, then hand the payload to an injected save operation.
//!
//! A submission moves through three states:
//!
//! - `Idle` → `Validating` when submit is triggered.
//! - `Validating` → `Idle` if the validator reports anything. The errors are published to
//!   the error store and the save operation is not called.
//! - `Validating` → `Submitting` otherwise. The busy flag is raised, the payload (every field
//!   plus the patient id) is built and the save operation is awaited.
//! - `Submitting` → `Idle` when the save completes, fails, or the submit future is dropped.
//!
//! Save failures are logged and returned to the caller. They never become validation errors.

use std::future::Future;

use physio_types::PatientId;

use crate::error::{SaveError, SaveResult};
use crate::fields::FieldStore;
use crate::record::ClinicalPayload;
use crate::validation::{validate, ErrorStore, ValidationErrors};

/// Persistence operation supplied by the embedding application.
///
/// Implementations perform the actual write (network, disk, ...) and may fail. No timeout
/// is imposed on them.
pub trait SaveRecord {
    fn save(&self, payload: ClinicalPayload) -> impl Future<Output = SaveResult<()>> + Send;
}

/// Adapts an async closure into a [`SaveRecord`].
///
/// ```ignore
/// let on_save = SaveFn(|payload: ClinicalPayload| async move {
///     api.post(payload).await.map_err(|e| SaveError::Rejected(e.to_string()))
/// });
/// ```
#[derive(Clone)]
pub struct SaveFn<F>(pub F);

impl<F, Fut> SaveRecord for SaveFn<F>
where
    F: Fn(ClinicalPayload) -> Fut,
    Fut: Future<Output = SaveResult<()>> + Send,
{
    fn save(&self, payload: ClinicalPayload) -> impl Future<Output = SaveResult<()>> + Send {
        (self.0)(payload)
    }
}

impl<T: SaveRecord + Sync> SaveRecord for std::sync::Arc<T> {
    fn save(&self, payload: ClinicalPayload) -> impl Future<Output = SaveResult<()>> + Send {
        (**self).save(payload)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Result of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The save operation completed successfully.
    Saved,
    /// Validation failed; the save operation was not called.
    Invalid(ValidationErrors),
    /// The save operation was called and failed.
    SaveFailed(SaveError),
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Puts the controller back to `Idle` when dropped.
struct IdleOnDrop<'a>(&'a mut SubmissionState);

impl IdleOnDrop<'_> {
    fn enter(&mut self, state: SubmissionState) {
        *self.0 = state;
    }
}

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        *self.0 = SubmissionState::Idle;
    }
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// True while a save is in flight.
    pub fn is_busy(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Runs one submit attempt.
    ///
    /// `errors` always receives the fresh validation result, so a successful validation
    /// also wipes any stale message.
    pub async fn submit<S: SaveRecord>(
        &mut self,
        fields: &FieldStore,
        errors: &mut ErrorStore,
        patient_id: &PatientId,
        saver: &S,
    ) -> SubmitOutcome {
        let mut guard = IdleOnDrop(&mut self.state);
        guard.enter(SubmissionState::Validating);

        let found = validate(fields.record());
        errors.set_all(found.clone());
        if !found.is_empty() {
            tracing::warn!(
                patient_id = %patient_id,
                errors = found.len(),
                "clinical history submission blocked by validation: {}",
                found
            );
            return SubmitOutcome::Invalid(found);
        }

        guard.enter(SubmissionState::Submitting);
        let payload = ClinicalPayload::new(patient_id.clone(), fields.record().clone());

        match saver.save(payload).await {
            Ok(()) => {
                tracing::info!(patient_id = %patient_id, "clinical history saved");
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::error!(patient_id = %patient_id, "Save clinical history error: {:?}", e);
                SubmitOutcome::SaveFailed(e)
            }
        }
    }
}
