//! Validated primitive types shared across the physio crates.

/// Maximum accepted length of a patient identifier.
pub const MAX_PATIENT_ID_LEN: usize = 128;

/// Errors that can occur when creating validated identifier types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// The input was empty or contained only whitespace
    #[error("patient id cannot be empty")]
    Empty,
    #[error("patient id exceeds maximum length of {} characters", MAX_PATIENT_ID_LEN)]
    TooLong,
    /// The input contained characters outside the allowed set, or was a relative path segment
    #[error("patient id contains invalid characters (only alphanumeric, '.', '-', '_' allowed)")]
    InvalidCharacters,
}

/// Identifier of the patient a clinical history belongs to.
///
/// Supplied by the embedding application and never edited through the form. The input is
/// trimmed during construction and restricted to a conservative ASCII set, so the value can
/// be used directly as a storage directory name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new `PatientId` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TypesError::Empty` for blank input, `TypesError::TooLong` past
    /// [`MAX_PATIENT_ID_LEN`], and `TypesError::InvalidCharacters` for anything outside
    /// `[0-9A-Za-z._-]` or for the segments `.` and `..`.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypesError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypesError::Empty);
        }

        if trimmed.len() > MAX_PATIENT_ID_LEN {
            return Err(TypesError::TooLong);
        }

        let ok = trimmed
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));
        if !ok || trimmed == "." || trimmed == ".." {
            return Err(TypesError::InvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PatientId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PatientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientId::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_id_accepts_valid_identifiers() {
        assert_eq!(PatientId::new("42").unwrap().as_str(), "42");
        assert_eq!(PatientId::new("pat-0001_a.b").unwrap().as_str(), "pat-0001_a.b");
    }

    #[test]
    fn test_patient_id_trims_input() {
        let id = PatientId::new("  p-17 \n").expect("should trim");
        assert_eq!(id.as_str(), "p-17");
        assert_eq!(id.to_string(), "p-17");
    }

    #[test]
    fn test_patient_id_rejects_blank() {
        assert_eq!(PatientId::new(""), Err(TypesError::Empty));
        assert_eq!(PatientId::new("   "), Err(TypesError::Empty));
    }

    #[test]
    fn test_patient_id_rejects_too_long() {
        let long = "a".repeat(MAX_PATIENT_ID_LEN + 1);
        assert_eq!(PatientId::new(long), Err(TypesError::TooLong));
        assert!(PatientId::new("a".repeat(MAX_PATIENT_ID_LEN)).is_ok());
    }

    #[test]
    fn test_patient_id_rejects_path_like_input() {
        for bad in ["..", ".", "a/b", "a\\b", "p 1", "pá"] {
            assert_eq!(
                PatientId::new(bad),
                Err(TypesError::InvalidCharacters),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_patient_id_serde_is_a_plain_string() {
        let id = PatientId::new("p-9").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-9\"");

        let back: PatientId = serde_json::from_str("\"p-9\"").unwrap();
        assert_eq!(back, id);

        let err = serde_json::from_str::<PatientId>("\"../etc\"").expect_err("invalid id");
        assert!(err.to_string().contains("invalid characters"));
    }
}
