//! Command bodies for the `physio` binary.
//!
//! Each command works against the [`JsonRecordStore`] it is given and returns what should be
//! printed, so `main` only parses arguments, prints and picks the exit status.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use physio_core::{
    validate, ClinicalHistoryForm, ClinicalRecord, FieldName, FormProps, JsonRecordStore,
    Patient, PatientId, Section, SubmitOutcome, ValidationErrors,
};

use crate::render::render_form;

/// Every section with its fields, kinds and required markers.
pub fn sections() -> String {
    let mut out = String::new();
    for section in Section::ALL {
        let _ = writeln!(out, "{} ({})", section.label(), section);
        for field in section.fields() {
            let required = if field.is_required() { ", required" } else { "" };
            let _ = writeln!(out, "  {} [{}{}]", field, field.kind(), required);
        }
    }
    out
}

/// Renders the stored clinical history read-only, one entry per requested section.
///
/// # Errors
///
/// Fails when nothing is stored for `patient_id` or the stored record cannot be loaded.
pub async fn show(
    store: &JsonRecordStore,
    patient_id: &PatientId,
    sections: &[Section],
    json: bool,
) -> anyhow::Result<Vec<String>> {
    let Some(record) = store.load(patient_id).await? else {
        anyhow::bail!("No clinical history stored for patient {}", patient_id);
    };

    let mut props = FormProps::new(Patient::new(patient_id.clone()), store.clone());
    props.existing_record = Some(record);
    props.edit_mode = true;
    props.read_only = true;
    let mut form = ClinicalHistoryForm::new(props);

    let mut rendered = Vec::with_capacity(sections.len());
    for section in sections {
        form.select_tab(*section);
        let view = form.view();
        if json {
            rendered.push(serde_json::to_string_pretty(&view)?);
        } else {
            rendered.push(render_form(&view));
        }
    }
    Ok(rendered)
}

#[derive(Debug)]
pub struct SaveRequest {
    pub patient_id: PatientId,
    pub name: Option<String>,
    pub edits: Vec<(FieldName, String)>,
    /// Section to display afterwards.
    pub tab: Option<Section>,
}

#[derive(Debug)]
pub enum SaveReport {
    Saved {
        path: PathBuf,
        /// An existing record was updated rather than created.
        updated: bool,
        /// The requested section after saving, if one was asked for.
        view: Option<String>,
    },
    Invalid {
        errors: ValidationErrors,
        /// The requested section, else the first one holding an error.
        section: Section,
        view: String,
    },
}

/// Opens the form for the patient (edit mode when a record exists), applies the edits and
/// submits through `store`.
///
/// # Errors
///
/// Fails on an unloadable stored record, an edit that does not parse, or a failed save.
/// Validation failures are a [`SaveReport::Invalid`], not an error.
pub async fn save(store: &JsonRecordStore, request: SaveRequest) -> anyhow::Result<SaveReport> {
    let existing = store.load(&request.patient_id).await?;

    let mut patient = Patient::new(request.patient_id);
    if let Some(name) = request.name {
        patient = patient.with_display_name(name);
    }
    let mut props = FormProps::new(patient, store.clone());
    props.edit_mode = existing.is_some();
    props.existing_record = existing;
    let mut form = ClinicalHistoryForm::new(props);

    for (field, value) in &request.edits {
        form.set_field_raw(*field, value)?;
    }

    match form.submit().await? {
        SubmitOutcome::Saved => {
            let view = request.tab.map(|section| {
                form.select_tab(section);
                render_form(&form.view())
            });
            Ok(SaveReport::Saved {
                path: store.record_path(&form.patient().id),
                updated: form.mode().edit,
                view,
            })
        }
        SubmitOutcome::Invalid(errors) => {
            let first = errors.iter().next().map(|(field, _)| Section::of(field));
            let section = request.tab.or(first).unwrap_or_else(|| form.active_tab());
            form.select_tab(section);
            Ok(SaveReport::Invalid {
                errors,
                section,
                view: render_form(&form.view()),
            })
        }
        SubmitOutcome::SaveFailed(e) => {
            anyhow::bail!("Error saving clinical history: {}", e);
        }
    }
}

/// Validates a clinical history JSON file, record or payload, without saving it.
///
/// # Errors
///
/// Fails when the file cannot be read or is not a clinical history.
pub fn validate_file(path: &Path) -> anyhow::Result<ValidationErrors> {
    let contents = std::fs::read_to_string(path)?;
    let record: ClinicalRecord = serde_json::from_str(&contents)?;
    Ok(validate(&record))
}

/// One line per error, naming the field and its section.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(
            out,
            "  {} ({}): {}",
            field,
            Section::of(field).label(),
            message
        );
    }
    out
}
