//! Submit-time validation of a clinical history, and the error store it feeds.
//!
//! Validation is a deliberately minimal contract: two required narrative fields and the
//! pain-scale range. Everything else is optional free text.

use std::collections::BTreeMap;

use crate::constants::{PAIN_SCALE_MAX, PAIN_SCALE_MIN, PAIN_SCALE_RANGE_MESSAGE, REQUIRED_MESSAGE};
use crate::fields::FieldName;
use crate::record::ClinicalRecord;

/// Field-scoped validation messages from a single validation pass.
///
/// Ordered by field declaration order. An empty set means the record is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldName, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Validates a record snapshot.
///
/// Pure and total over the record shape: it never fails, it only reports.
pub fn validate(record: &ClinicalRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if record.consultation_reason.trim().is_empty() {
        errors.insert(FieldName::ConsultationReason, REQUIRED_MESSAGE);
    }

    if record.physiotherapy_diagnosis.trim().is_empty() {
        errors.insert(FieldName::PhysiotherapyDiagnosis, REQUIRED_MESSAGE);
    }

    if !(PAIN_SCALE_MIN..=PAIN_SCALE_MAX).contains(&record.pain_scale) {
        errors.insert(FieldName::PainScale, PAIN_SCALE_RANGE_MESSAGE);
    }

    errors
}

/// Most recent validation message per field.
///
/// Messages belong to the last validated snapshot. They are not re-evaluated on edit; the
/// edited field's message is simply dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorStore {
    errors: ValidationErrors,
}

impl ErrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole error map with the result of a validation pass.
    pub fn set_all(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    /// Removes `field`'s message if present. Other fields are untouched.
    pub fn clear(&mut self, field: FieldName) {
        self.errors.0.remove(&field);
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }
}
