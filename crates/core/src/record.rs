//! The clinical history record and the payload handed to save operations.

use chrono::NaiveDate;
use physio_types::PatientId;
use serde::{Deserialize, Serialize};

/// A physiotherapy clinical history as edited by the form.
///
/// Every field is optional except the two checked by the validator
/// (`consultation_reason` and `physiotherapy_diagnosis`). `pain_scale` is stored unclamped
/// so an out-of-range entry can be reported rather than silently corrected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicalRecord {
    pub creation_date: NaiveDate,

    // General
    pub general_observation: String,
    pub consultation_reason: String,

    // History
    pub allergies: String,
    pub current_medications: String,
    pub family_history: String,
    pub prior_surgeries: String,
    pub prior_injuries: String,

    // Physical evaluation
    pub pain_scale: i64,
    pub general_inspection: String,
    pub range_of_motion: String,
    pub muscle_strength: String,
    pub special_tests: String,

    // Diagnosis and plan
    pub physiotherapy_diagnosis: String,
    pub session_frequency: String,
    pub proposed_techniques: String,

    // Goals
    pub short_term_goals: String,
    pub medium_term_goals: String,
    pub long_term_goals: String,

    // Follow-up
    pub follow_up_notes: String,
    pub therapist_signature: String,
    pub patient_signature: String,
}

impl ClinicalRecord {
    /// A blank record dated `creation_date`.
    pub fn new(creation_date: NaiveDate) -> Self {
        Self {
            creation_date,
            general_observation: String::new(),
            consultation_reason: String::new(),
            allergies: String::new(),
            current_medications: String::new(),
            family_history: String::new(),
            prior_surgeries: String::new(),
            prior_injuries: String::new(),
            pain_scale: 0,
            general_inspection: String::new(),
            range_of_motion: String::new(),
            muscle_strength: String::new(),
            special_tests: String::new(),
            physiotherapy_diagnosis: String::new(),
            session_frequency: String::new(),
            proposed_techniques: String::new(),
            short_term_goals: String::new(),
            medium_term_goals: String::new(),
            long_term_goals: String::new(),
            follow_up_notes: String::new(),
            therapist_signature: String::new(),
            patient_signature: String::new(),
        }
    }

    /// A blank record dated today (local time).
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl Default for ClinicalRecord {
    fn default() -> Self {
        Self::today()
    }
}

/// Flat object passed to a save operation: every record field plus `patientId`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalPayload {
    pub patient_id: PatientId,
    #[serde(flatten)]
    pub record: ClinicalRecord,
}

impl ClinicalPayload {
    pub fn new(patient_id: PatientId, record: ClinicalRecord) -> Self {
        Self { patient_id, record }
    }
}
