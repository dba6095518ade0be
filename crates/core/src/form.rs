//! The clinical history form component.
//!
//! Owns the working copy of the record (field store), the last validation messages (error
//! store), the visible tab and the submission controller. Nothing here is shared; every
//! mutation goes through `&mut self`, one event at a time.

use crate::error::{FormError, FormResult};
use crate::fields::{FieldName, FieldStore, FieldValue};
use crate::patient::Patient;
use crate::record::ClinicalRecord;
use crate::submission::{SaveRecord, SubmissionController, SubmissionState, SubmitOutcome};
use crate::tabs::{Section, TabSelector};
use crate::validation::ErrorStore;
use crate::view::{FormMode, FormView, ViewInput};

/// Callback run when the user cancels. Takes no argument.
pub type OnCancel = Box<dyn FnMut() + Send>;

/// Everything the embedding application passes to the form.
pub struct FormProps<S> {
    pub patient: Patient,
    pub existing_record: Option<ClinicalRecord>,
    pub on_save: S,
    pub on_cancel: Option<OnCancel>,
    pub edit_mode: bool,
    pub read_only: bool,
}

impl<S> FormProps<S> {
    /// Props for a new, editable record.
    pub fn new(patient: Patient, on_save: S) -> Self {
        Self {
            patient,
            existing_record: None,
            on_save,
            on_cancel: None,
            edit_mode: false,
            read_only: false,
        }
    }
}

pub struct ClinicalHistoryForm<S> {
    patient: Patient,
    mode: FormMode,
    fields: FieldStore,
    errors: ErrorStore,
    tabs: TabSelector,
    controller: SubmissionController,
    on_save: S,
    on_cancel: Option<OnCancel>,
}

impl<S: SaveRecord> ClinicalHistoryForm<S> {
    pub fn new(props: FormProps<S>) -> Self {
        Self {
            patient: props.patient,
            mode: FormMode {
                edit: props.edit_mode,
                read_only: props.read_only,
            },
            fields: FieldStore::new(props.existing_record),
            errors: ErrorStore::new(),
            tabs: TabSelector::new(),
            controller: SubmissionController::new(),
            on_save: props.on_save,
            on_cancel: props.on_cancel,
        }
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn record(&self) -> &ClinicalRecord {
        self.fields.record()
    }

    pub fn get(&self, field: FieldName) -> FieldValue {
        self.fields.get(field)
    }

    /// Edits one field and drops that field's validation message.
    ///
    /// # Errors
    ///
    /// `FormError::ReadOnly` in read-only mode, `FormError::FieldKindMismatch` when the value
    /// has the wrong kind. Neither store changes on error.
    pub fn set_field(&mut self, field: FieldName, value: impl Into<FieldValue>) -> FormResult<()> {
        if self.mode.read_only {
            return Err(FormError::ReadOnly);
        }

        self.fields.set(field, value.into())?;
        self.errors.clear(field);
        tracing::debug!(field = %field, "clinical history field edited");
        Ok(())
    }

    /// Like [`set_field`](Self::set_field) but from raw input text.
    pub fn set_field_raw(&mut self, field: FieldName, raw: &str) -> FormResult<()> {
        if self.mode.read_only {
            return Err(FormError::ReadOnly);
        }
        let value = FieldValue::parse(field, raw)?;
        self.set_field(field, value)
    }

    pub fn active_tab(&self) -> Section {
        self.tabs.current()
    }

    pub fn select_tab(&mut self, section: Section) {
        self.tabs.select(section);
        tracing::debug!(section = %section, "clinical history tab selected");
    }

    pub fn errors(&self) -> &ErrorStore {
        &self.errors
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.controller.state()
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Validates and, when valid, saves the record together with the patient id.
    ///
    /// # Errors
    ///
    /// `FormError::ReadOnly` in read-only mode. Validation and save failures are reported
    /// through [`SubmitOutcome`].
    pub async fn submit(&mut self) -> FormResult<SubmitOutcome> {
        if self.mode.read_only {
            return Err(FormError::ReadOnly);
        }

        Ok(self
            .controller
            .submit(&self.fields, &mut self.errors, &self.patient.id, &self.on_save)
            .await)
    }

    /// Runs the cancel callback, if one was supplied.
    pub fn cancel(&mut self) -> FormResult<()> {
        if self.mode.read_only {
            return Err(FormError::ReadOnly);
        }
        if let Some(on_cancel) = self.on_cancel.as_mut() {
            on_cancel();
        }
        Ok(())
    }

    pub fn view(&self) -> FormView {
        FormView::build(ViewInput {
            patient: &self.patient,
            fields: &self.fields,
            errors: &self.errors,
            section: self.tabs.current(),
            mode: self.mode,
            busy: self.controller.is_busy(),
        })
    }
}
