//! # Physio Core
//!
//! Core logic for the physiotherapy clinical history form.
//!
//! This crate contains the form model and nothing that draws it:
//! - The clinical record, its field store and the per-field error store
//! - The six-tab selector and the view model rendered for the active tab
//! - Submit-time validation and the submission controller
//! - A JSON file store usable as the form's save operation
//!
//! **No presentation concerns**: laying out the view model belongs to the embedding
//! application (the `physio` CLI, or any other shell).

pub mod config;
pub mod constants;
pub mod error;
pub mod fields;
pub mod form;
pub mod patient;
pub mod record;
pub mod repository;
pub mod submission;
pub mod tabs;
pub mod validation;
pub mod view;

pub use config::CoreConfig;
pub use constants::DEFAULT_RECORDS_DIR;
pub use error::{FormError, FormResult, SaveError, SaveResult};
pub use fields::{FieldKind, FieldName, FieldStore, FieldValue};
pub use form::{ClinicalHistoryForm, FormProps, OnCancel};
pub use patient::Patient;
pub use record::{ClinicalPayload, ClinicalRecord};
pub use repository::JsonRecordStore;
pub use submission::{SaveFn, SaveRecord, SubmissionController, SubmissionState, SubmitOutcome};
pub use tabs::{Section, TabSelector};
pub use validation::{validate, ErrorStore, ValidationErrors};
pub use view::{FieldView, FooterView, FormMode, FormView, TabView};

pub use physio_types::{PatientId, TypesError};
