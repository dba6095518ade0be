//! View model for the clinical history form.
//!
//! One renderer, dispatched on the active [`Section`], replaces a hand-written renderer per
//! tab. Front ends (the CLI here, a web or desktop shell elsewhere) only lay these structs
//! out; all decisions about values, errors and what is enabled are made here.

use serde::Serialize;

use crate::fields::{FieldKind, FieldName, FieldStore, FieldValue};
use crate::patient::Patient;
use crate::tabs::Section;
use crate::validation::ErrorStore;

pub const SAVE_LABEL: &str = "Save clinical history";
pub const UPDATE_LABEL: &str = "Update clinical history";
pub const SAVING_LABEL: &str = "Saving...";
pub const CANCEL_LABEL: &str = "Cancel";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub title: String,
    pub tabs: Vec<TabView>,
    pub section: Section,
    pub fields: Vec<FieldView>,
    /// Absent in read-only mode.
    pub footer: Option<FooterView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub section: Section,
    pub label: &'static str,
    pub active: bool,
    /// Any field of this section carries a message from the last validation pass.
    pub has_errors: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: FieldName,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: FieldValue,
    pub error: Option<String>,
    pub required: bool,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FooterView {
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub cancel_label: &'static str,
    pub cancel_enabled: bool,
}

/// How the form was opened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormMode {
    /// Editing an existing record; changes the submit wording only.
    pub edit: bool,
    /// Every input disabled and no footer.
    pub read_only: bool,
}

pub(crate) struct ViewInput<'a> {
    pub patient: &'a Patient,
    pub fields: &'a FieldStore,
    pub errors: &'a ErrorStore,
    pub section: Section,
    pub mode: FormMode,
    pub busy: bool,
}

impl FormView {
    pub(crate) fn build(input: ViewInput<'_>) -> Self {
        let tabs = Section::ALL
            .into_iter()
            .map(|section| TabView {
                section,
                label: section.label(),
                active: section == input.section,
                has_errors: section
                    .fields()
                    .iter()
                    .any(|field| input.errors.get(*field).is_some()),
            })
            .collect();

        let fields = input
            .section
            .fields()
            .iter()
            .map(|&name| FieldView {
                name,
                label: name.label(),
                kind: name.kind(),
                value: input.fields.get(name),
                error: input.errors.get(name).map(str::to_string),
                required: name.is_required(),
                disabled: input.mode.read_only,
            })
            .collect();

        let footer = (!input.mode.read_only).then(|| FooterView {
            submit_label: match (input.busy, input.mode.edit) {
                (true, _) => SAVING_LABEL,
                (false, true) => UPDATE_LABEL,
                (false, false) => SAVE_LABEL,
            },
            submit_enabled: !input.busy,
            cancel_label: CANCEL_LABEL,
            cancel_enabled: !input.busy,
        });

        Self {
            title: format!("Clinical history: {}", input.patient.title()),
            tabs,
            section: input.section,
            fields,
            footer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ClinicalRecord;
    use crate::validation::validate;
    use chrono::NaiveDate;
    use physio_types::PatientId;

    fn patient() -> Patient {
        Patient::new(PatientId::new("p-5").unwrap()).with_display_name("Lucia Gomez")
    }

    fn fields() -> FieldStore {
        let mut record = ClinicalRecord::new(NaiveDate::from_ymd_opt(2026, 7, 7).unwrap());
        record.pain_scale = 12;
        FieldStore::new(Some(record))
    }

    #[test]
    fn renders_only_the_active_section() {
        let patient = patient();
        let fields = fields();
        let errors = ErrorStore::new();
        let view = FormView::build(ViewInput {
            patient: &patient,
            fields: &fields,
            errors: &errors,
            section: Section::PhysicalEvaluation,
            mode: FormMode::default(),
            busy: false,
        });

        assert_eq!(view.title, "Clinical history: Lucia Gomez");
        assert_eq!(view.section, Section::PhysicalEvaluation);
        let names: Vec<FieldName> = view.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, Section::PhysicalEvaluation.fields());
        assert_eq!(view.fields[0].value, FieldValue::Integer(12));
        assert_eq!(view.tabs.iter().filter(|t| t.active).count(), 1);
        assert!(view.tabs[2].active);
    }

    #[test]
    fn inline_errors_and_tab_markers_follow_the_error_store() {
        let patient = patient();
        let fields = fields();
        let mut errors = ErrorStore::new();
        errors.set_all(validate(fields.record()));

        let view = FormView::build(ViewInput {
            patient: &patient,
            fields: &fields,
            errors: &errors,
            section: Section::General,
            mode: FormMode::default(),
            busy: false,
        });

        let reason = view
            .fields
            .iter()
            .find(|f| f.name == FieldName::ConsultationReason)
            .unwrap();
        assert_eq!(reason.error.as_deref(), Some("required"));
        assert!(reason.required);

        let flagged: Vec<Section> = view
            .tabs
            .iter()
            .filter(|t| t.has_errors)
            .map(|t| t.section)
            .collect();
        assert_eq!(
            flagged,
            vec![
                Section::General,
                Section::PhysicalEvaluation,
                Section::DiagnosisAndPlan
            ]
        );
    }

    #[test]
    fn footer_wording_follows_mode_and_busy_flag() {
        let patient = patient();
        let fields = fields();
        let errors = ErrorStore::new();
        let footer = |mode, busy| {
            FormView::build(ViewInput {
                patient: &patient,
                fields: &fields,
                errors: &errors,
                section: Section::General,
                mode,
                busy,
            })
            .footer
        };

        let create = footer(FormMode::default(), false).unwrap();
        assert_eq!(create.submit_label, SAVE_LABEL);
        assert!(create.submit_enabled);

        let edit = FormMode {
            edit: true,
            read_only: false,
        };
        assert_eq!(footer(edit, false).unwrap().submit_label, UPDATE_LABEL);

        let busy = footer(edit, true).unwrap();
        assert_eq!(busy.submit_label, SAVING_LABEL);
        assert!(!busy.submit_enabled);
        assert!(!busy.cancel_enabled);
    }

    #[test]
    fn read_only_disables_inputs_and_hides_footer() {
        let patient = patient();
        let fields = fields();
        let errors = ErrorStore::new();
        let view = FormView::build(ViewInput {
            patient: &patient,
            fields: &fields,
            errors: &errors,
            section: Section::Goals,
            mode: FormMode {
                edit: true,
                read_only: true,
            },
            busy: false,
        });

        assert!(view.footer.is_none());
        assert!(view.fields.iter().all(|f| f.disabled));
    }
}
