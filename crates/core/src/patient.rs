//! The patient a clinical history is recorded for.

use physio_types::PatientId;

/// Patient context handed to the form by the embedding application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    /// Name shown in the form title, when known.
    pub display_name: Option<String>,
}

impl Patient {
    pub fn new(id: PatientId) -> Self {
        Self {
            id,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.display_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Display name, falling back to the identifier.
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prefers_display_name() {
        let patient = Patient::new(PatientId::new("p-1").unwrap()).with_display_name(" Ana Ruiz ");
        assert_eq!(patient.title(), "Ana Ruiz");
    }

    #[test]
    fn blank_display_name_falls_back_to_id() {
        let patient = Patient::new(PatientId::new("p-1").unwrap()).with_display_name("  ");
        assert_eq!(patient.display_name, None);
        assert_eq!(patient.title(), "p-1");
    }
}
