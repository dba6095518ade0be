//! Field names, field values and the field store.
//!
//! `FieldName` is the lookup table between the statically-typed [`ClinicalRecord`] and the
//! places that address fields dynamically: raw input, the view model and the CLI.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::DATE_FORMAT;
use crate::error::{FormError, FormResult};
use crate::record::ClinicalRecord;

/// Every user-editable field of a clinical history.
///
/// `patientId` is deliberately absent: it is supplied by the embedding application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    CreationDate,
    GeneralObservation,
    ConsultationReason,
    Allergies,
    CurrentMedications,
    FamilyHistory,
    PriorSurgeries,
    PriorInjuries,
    PainScale,
    GeneralInspection,
    RangeOfMotion,
    MuscleStrength,
    SpecialTests,
    PhysiotherapyDiagnosis,
    SessionFrequency,
    ProposedTechniques,
    ShortTermGoals,
    MediumTermGoals,
    LongTermGoals,
    FollowUpNotes,
    TherapistSignature,
    PatientSignature,
}

impl FieldName {
    pub const ALL: [FieldName; 22] = [
        Self::CreationDate,
        Self::GeneralObservation,
        Self::ConsultationReason,
        Self::Allergies,
        Self::CurrentMedications,
        Self::FamilyHistory,
        Self::PriorSurgeries,
        Self::PriorInjuries,
        Self::PainScale,
        Self::GeneralInspection,
        Self::RangeOfMotion,
        Self::MuscleStrength,
        Self::SpecialTests,
        Self::PhysiotherapyDiagnosis,
        Self::SessionFrequency,
        Self::ProposedTechniques,
        Self::ShortTermGoals,
        Self::MediumTermGoals,
        Self::LongTermGoals,
        Self::FollowUpNotes,
        Self::TherapistSignature,
        Self::PatientSignature,
    ];

    /// Wire name, identical to the serialized record key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreationDate => "creationDate",
            Self::GeneralObservation => "generalObservation",
            Self::ConsultationReason => "consultationReason",
            Self::Allergies => "allergies",
            Self::CurrentMedications => "currentMedications",
            Self::FamilyHistory => "familyHistory",
            Self::PriorSurgeries => "priorSurgeries",
            Self::PriorInjuries => "priorInjuries",
            Self::PainScale => "painScale",
            Self::GeneralInspection => "generalInspection",
            Self::RangeOfMotion => "rangeOfMotion",
            Self::MuscleStrength => "muscleStrength",
            Self::SpecialTests => "specialTests",
            Self::PhysiotherapyDiagnosis => "physiotherapyDiagnosis",
            Self::SessionFrequency => "sessionFrequency",
            Self::ProposedTechniques => "proposedTechniques",
            Self::ShortTermGoals => "shortTermGoals",
            Self::MediumTermGoals => "mediumTermGoals",
            Self::LongTermGoals => "longTermGoals",
            Self::FollowUpNotes => "followUpNotes",
            Self::TherapistSignature => "therapistSignature",
            Self::PatientSignature => "patientSignature",
        }
    }

    /// Human-readable label shown next to the input.
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreationDate => "Date",
            Self::GeneralObservation => "General observation",
            Self::ConsultationReason => "Reason for consultation",
            Self::Allergies => "Allergies",
            Self::CurrentMedications => "Current medications",
            Self::FamilyHistory => "Family history",
            Self::PriorSurgeries => "Prior surgeries",
            Self::PriorInjuries => "Prior injuries",
            Self::PainScale => "Pain scale (EVA 0-10)",
            Self::GeneralInspection => "General inspection",
            Self::RangeOfMotion => "Range of motion",
            Self::MuscleStrength => "Muscle strength",
            Self::SpecialTests => "Special tests",
            Self::PhysiotherapyDiagnosis => "Physiotherapy diagnosis",
            Self::SessionFrequency => "Session frequency",
            Self::ProposedTechniques => "Proposed techniques",
            Self::ShortTermGoals => "Short-term goals",
            Self::MediumTermGoals => "Medium-term goals",
            Self::LongTermGoals => "Long-term goals",
            Self::FollowUpNotes => "Follow-up notes",
            Self::TherapistSignature => "Therapist signature",
            Self::PatientSignature => "Patient signature",
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            Self::CreationDate => FieldKind::Date,
            Self::PainScale => FieldKind::Integer,
            _ => FieldKind::Text,
        }
    }

    /// Whether the validator rejects a blank value for this field.
    pub const fn is_required(self) -> bool {
        matches!(self, Self::ConsultationReason | Self::PhysiotherapyDiagnosis)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// The shape of value a field accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Integer,
    Date,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current value of a single field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Integer(_) => FieldKind::Integer,
            Self::Date(_) => FieldKind::Date,
        }
    }

    /// Converts raw input text into a value of the kind `field` accepts.
    ///
    /// Text is taken verbatim (trimming is the validator's concern). Integers and dates are
    /// trimmed before parsing; dates use `YYYY-MM-DD`.
    pub fn parse(field: FieldName, raw: &str) -> FormResult<Self> {
        match field.kind() {
            FieldKind::Text => Ok(Self::Text(raw.to_string())),
            FieldKind::Integer => raw.trim().parse::<i64>().map(Self::Integer).map_err(|e| {
                FormError::InvalidFieldValue {
                    field,
                    reason: e.to_string(),
                }
            }),
            FieldKind::Date => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                .map(Self::Date)
                .map_err(|e| FormError::InvalidFieldValue {
                    field,
                    reason: e.to_string(),
                }),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// Working copy of the record being edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldStore {
    record: ClinicalRecord,
}

impl FieldStore {
    /// Seeds the store from `existing`, or from a blank record dated today.
    pub fn new(existing: Option<ClinicalRecord>) -> Self {
        Self {
            record: existing.unwrap_or_else(ClinicalRecord::today),
        }
    }

    pub fn record(&self) -> &ClinicalRecord {
        &self.record
    }

    pub fn get(&self, field: FieldName) -> FieldValue {
        let r = &self.record;
        match field {
            FieldName::CreationDate => FieldValue::Date(r.creation_date),
            FieldName::PainScale => FieldValue::Integer(r.pain_scale),
            _ => FieldValue::Text(self.text(field).unwrap_or_default().to_string()),
        }
    }

    /// Overwrites exactly one field.
    ///
    /// # Errors
    ///
    /// Returns `FormError::FieldKindMismatch` when `value` is not of `field`'s kind; the store
    /// is left unchanged.
    pub fn set(&mut self, field: FieldName, value: FieldValue) -> FormResult<()> {
        match (field.kind(), value) {
            (FieldKind::Date, FieldValue::Date(date)) => self.record.creation_date = date,
            (FieldKind::Integer, FieldValue::Integer(n)) => self.record.pain_scale = n,
            (FieldKind::Text, FieldValue::Text(text)) => match self.text_mut(field) {
                Some(slot) => *slot = text,
                None => {
                    return Err(FormError::FieldKindMismatch {
                        field,
                        expected: FieldKind::Text,
                    })
                }
            },
            (expected, _) => return Err(FormError::FieldKindMismatch { field, expected }),
        }
        Ok(())
    }

    fn text(&self, field: FieldName) -> Option<&str> {
        let r = &self.record;
        let text = match field {
            FieldName::GeneralObservation => &r.general_observation,
            FieldName::ConsultationReason => &r.consultation_reason,
            FieldName::Allergies => &r.allergies,
            FieldName::CurrentMedications => &r.current_medications,
            FieldName::FamilyHistory => &r.family_history,
            FieldName::PriorSurgeries => &r.prior_surgeries,
            FieldName::PriorInjuries => &r.prior_injuries,
            FieldName::GeneralInspection => &r.general_inspection,
            FieldName::RangeOfMotion => &r.range_of_motion,
            FieldName::MuscleStrength => &r.muscle_strength,
            FieldName::SpecialTests => &r.special_tests,
            FieldName::PhysiotherapyDiagnosis => &r.physiotherapy_diagnosis,
            FieldName::SessionFrequency => &r.session_frequency,
            FieldName::ProposedTechniques => &r.proposed_techniques,
            FieldName::ShortTermGoals => &r.short_term_goals,
            FieldName::MediumTermGoals => &r.medium_term_goals,
            FieldName::LongTermGoals => &r.long_term_goals,
            FieldName::FollowUpNotes => &r.follow_up_notes,
            FieldName::TherapistSignature => &r.therapist_signature,
            FieldName::PatientSignature => &r.patient_signature,
            FieldName::CreationDate | FieldName::PainScale => return None,
        };
        Some(text)
    }

    fn text_mut(&mut self, field: FieldName) -> Option<&mut String> {
        let r = &mut self.record;
        let slot = match field {
            FieldName::GeneralObservation => &mut r.general_observation,
            FieldName::ConsultationReason => &mut r.consultation_reason,
            FieldName::Allergies => &mut r.allergies,
            FieldName::CurrentMedications => &mut r.current_medications,
            FieldName::FamilyHistory => &mut r.family_history,
            FieldName::PriorSurgeries => &mut r.prior_surgeries,
            FieldName::PriorInjuries => &mut r.prior_injuries,
            FieldName::GeneralInspection => &mut r.general_inspection,
            FieldName::RangeOfMotion => &mut r.range_of_motion,
            FieldName::MuscleStrength => &mut r.muscle_strength,
            FieldName::SpecialTests => &mut r.special_tests,
            FieldName::PhysiotherapyDiagnosis => &mut r.physiotherapy_diagnosis,
            FieldName::SessionFrequency => &mut r.session_frequency,
            FieldName::ProposedTechniques => &mut r.proposed_techniques,
            FieldName::ShortTermGoals => &mut r.short_term_goals,
            FieldName::MediumTermGoals => &mut r.medium_term_goals,
            FieldName::LongTermGoals => &mut r.long_term_goals,
            FieldName::FollowUpNotes => &mut r.follow_up_notes,
            FieldName::TherapistSignature => &mut r.therapist_signature,
            FieldName::PatientSignature => &mut r.patient_signature,
            FieldName::CreationDate | FieldName::PainScale => return None,
        };
        Some(slot)
    }
}
