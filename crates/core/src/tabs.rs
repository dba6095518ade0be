//! Form sections and the tab selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::fields::FieldName;

/// One of the six tabs of the clinical history form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    General,
    History,
    PhysicalEvaluation,
    DiagnosisAndPlan,
    Goals,
    FollowUp,
}

impl Section {
    /// Tabs in display order.
    pub const ALL: [Section; 6] = [
        Self::General,
        Self::History,
        Self::PhysicalEvaluation,
        Self::DiagnosisAndPlan,
        Self::Goals,
        Self::FollowUp,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::History => "history",
            Self::PhysicalEvaluation => "physical-evaluation",
            Self::DiagnosisAndPlan => "diagnosis-and-plan",
            Self::Goals => "goals",
            Self::FollowUp => "follow-up",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::History => "History",
            Self::PhysicalEvaluation => "Physical evaluation",
            Self::DiagnosisAndPlan => "Diagnosis and plan",
            Self::Goals => "Goals",
            Self::FollowUp => "Follow-up",
        }
    }

    /// Fields rendered by this section, in display order.
    pub const fn fields(self) -> &'static [FieldName] {
        match self {
            Self::General => &[
                FieldName::CreationDate,
                FieldName::ConsultationReason,
                FieldName::GeneralObservation,
            ],
            Self::History => &[
                FieldName::Allergies,
                FieldName::CurrentMedications,
                FieldName::FamilyHistory,
                FieldName::PriorSurgeries,
                FieldName::PriorInjuries,
            ],
            Self::PhysicalEvaluation => &[
                FieldName::PainScale,
                FieldName::GeneralInspection,
                FieldName::RangeOfMotion,
                FieldName::MuscleStrength,
                FieldName::SpecialTests,
            ],
            Self::DiagnosisAndPlan => &[
                FieldName::PhysiotherapyDiagnosis,
                FieldName::SessionFrequency,
                FieldName::ProposedTechniques,
            ],
            Self::Goals => &[
                FieldName::ShortTermGoals,
                FieldName::MediumTermGoals,
                FieldName::LongTermGoals,
            ],
            Self::FollowUp => &[
                FieldName::FollowUpNotes,
                FieldName::TherapistSignature,
                FieldName::PatientSignature,
            ],
        }
    }

    /// The section that renders `field`.
    pub fn of(field: FieldName) -> Section {
        Self::ALL
            .into_iter()
            .find(|section| section.fields().contains(&field))
            .unwrap_or_default()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| FormError::UnknownSection(s.to_string()))
    }
}

/// Which section is visible. Presentation state only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TabSelector {
    current: Section,
}

impl TabSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        self.current
    }

    /// Always succeeds, whatever the state of the form.
    pub fn select(&mut self, section: Section) {
        self.current = section;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_general() {
        assert_eq!(TabSelector::new().current(), Section::General);
    }

    #[test]
    fn any_section_is_selectable() {
        let mut tabs = TabSelector::new();
        for section in Section::ALL.into_iter().rev() {
            tabs.select(section);
            assert_eq!(tabs.current(), section);
        }
    }

    #[test]
    fn every_field_belongs_to_exactly_one_section() {
        for field in FieldName::ALL {
            let owners = Section::ALL
                .into_iter()
                .filter(|s| s.fields().contains(&field))
                .count();
            assert_eq!(owners, 1, "{field} rendered by {owners} sections");
        }
        let total: usize = Section::ALL.iter().map(|s| s.fields().len()).sum();
        assert_eq!(total, FieldName::ALL.len());
    }

    #[test]
    fn section_of_finds_the_owning_tab() {
        assert_eq!(Section::of(FieldName::PainScale), Section::PhysicalEvaluation);
        assert_eq!(
            Section::of(FieldName::PhysiotherapyDiagnosis),
            Section::DiagnosisAndPlan
        );
        assert_eq!(Section::of(FieldName::PatientSignature), Section::FollowUp);
    }

    #[test]
    fn identifiers_parse_and_serialize_as_kebab_case() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>().unwrap(), section);
            assert_eq!(
                serde_json::to_string(&section).unwrap(),
                format!("\"{}\"", section.as_str())
            );
        }
        assert!(matches!(
            "vitals".parse::<Section>(),
            Err(FormError::UnknownSection(s)) if s == "vitals"
        ));
    }
}
