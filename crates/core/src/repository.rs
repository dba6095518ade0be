//! JSON file storage for clinical histories.
//!
//! Layout: `<records_dir>/<patient_id>/clinical_history.json`, one pretty-printed
//! [`ClinicalPayload`] per patient. Writes go to a temporary sibling first and are renamed
//! into place, so a failed save never leaves a half-written record behind.

use std::path::PathBuf;
use std::sync::Arc;

use physio_types::PatientId;

use crate::config::CoreConfig;
use crate::constants::CLINICAL_HISTORY_FILENAME;
use crate::error::{SaveError, SaveResult};
use crate::record::{ClinicalPayload, ClinicalRecord};
use crate::submission::SaveRecord;

#[derive(Clone, Debug)]
pub struct JsonRecordStore {
    cfg: Arc<CoreConfig>,
}

impl JsonRecordStore {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn patient_dir(&self, patient_id: &PatientId) -> PathBuf {
        self.cfg.records_dir().join(patient_id.as_str())
    }

    pub fn record_path(&self, patient_id: &PatientId) -> PathBuf {
        self.patient_dir(patient_id).join(CLINICAL_HISTORY_FILENAME)
    }

    /// Loads the stored record for `patient_id`, or `Ok(None)` if there is none.
    pub async fn load(&self, patient_id: &PatientId) -> SaveResult<Option<ClinicalRecord>> {
        let path = self.record_path(patient_id);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SaveError::Io(e)),
        };

        let payload: ClinicalPayload =
            serde_json::from_str(&contents).map_err(SaveError::Deserialization)?;
        if &payload.patient_id != patient_id {
            tracing::error!(
                "stored clinical history {} belongs to {}, expected {}",
                path.display(),
                payload.patient_id,
                patient_id
            );
            return Err(SaveError::PatientMismatch {
                expected: patient_id.clone(),
                found: payload.patient_id,
            });
        }
        Ok(Some(payload.record))
    }

    async fn write(&self, payload: &ClinicalPayload) -> SaveResult<()> {
        let dir = self.patient_dir(&payload.patient_id);
        tokio::fs::create_dir_all(&dir).await?;

        let json = serde_json::to_string_pretty(payload).map_err(SaveError::Serialization)?;
        let path = dir.join(CLINICAL_HISTORY_FILENAME);
        let tmp = dir.join(format!("{CLINICAL_HISTORY_FILENAME}.tmp"));

        if let Err(e) = tokio::fs::write(&tmp, json.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(SaveError::Io(e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(SaveError::Io(e));
        }

        tracing::debug!("wrote clinical history {}", path.display());
        Ok(())
    }
}

impl SaveRecord for JsonRecordStore {
    async fn save(&self, payload: ClinicalPayload) -> SaveResult<()> {
        self.write(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ClinicalHistoryForm, FormProps};
    use crate::fields::FieldName;
    use crate::patient::Patient;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store(temp: &TempDir) -> JsonRecordStore {
        let cfg = CoreConfig::new(temp.path().join("records")).unwrap();
        JsonRecordStore::new(Arc::new(cfg))
    }

    fn record() -> ClinicalRecord {
        let mut record = ClinicalRecord::new(NaiveDate::from_ymd_opt(2026, 8, 14).unwrap());
        record.consultation_reason = "Ankle sprain".into();
        record.physiotherapy_diagnosis = "Grade II lateral sprain".into();
        record.pain_scale = 6;
        record
    }

    #[tokio::test]
    async fn load_returns_none_when_nothing_is_stored() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        let loaded = store.load(&PatientId::new("p-1").unwrap()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn save_then_load_returns_the_same_record() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let id = PatientId::new("p-1").unwrap();

        store
            .save(ClinicalPayload::new(id.clone(), record()))
            .await
            .unwrap();

        let path = store.record_path(&id);
        assert!(path.is_file());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(store.load(&id).await.unwrap(), Some(record()));

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(raw["patientId"], "p-1");
        assert_eq!(raw["painScale"], 6);
    }

    #[tokio::test]
    async fn save_overwrites_the_previous_record() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let id = PatientId::new("p-1").unwrap();

        store.save(ClinicalPayload::new(id.clone(), record())).await.unwrap();
        let mut updated = record();
        updated.follow_up_notes = "Review in two weeks".into();
        store
            .save(ClinicalPayload::new(id.clone(), updated.clone()))
            .await
            .unwrap();

        assert_eq!(store.load(&id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_deserialization_error() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let id = PatientId::new("p-1").unwrap();
        std::fs::create_dir_all(store.patient_dir(&id)).unwrap();
        std::fs::write(store.record_path(&id), "{not json").unwrap();

        let err = store.load(&id).await.expect_err("corrupt json");
        assert!(matches!(err, SaveError::Deserialization(_)));
    }

    #[tokio::test]
    async fn record_stored_for_another_patient_is_rejected() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let id = PatientId::new("p-1").unwrap();
        std::fs::create_dir_all(store.patient_dir(&id)).unwrap();
        std::fs::write(
            store.record_path(&id),
            r#"{"patientId":"p-2","consultationReason":"other patient"}"#,
        )
        .unwrap();

        let err = store.load(&id).await.expect_err("record belongs to p-2");
        match err {
            SaveError::PatientMismatch { expected, found } => {
                assert_eq!(expected.as_str(), "p-1");
                assert_eq!(found.as_str(), "p-2");
            }
            other => panic!("expected PatientMismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_rename_removes_the_temporary_file() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let id = PatientId::new("p-1").unwrap();
        // A non-empty directory where the record file should be.
        let path = store.record_path(&id);
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let err = store
            .save(ClinicalPayload::new(id.clone(), record()))
            .await
            .expect_err("record path is a directory");
        assert!(matches!(err, SaveError::Io(_)));
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.is_dir());
    }

    #[tokio::test]
    async fn unwritable_records_dir_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        // A file where the records directory should be.
        let blocker = temp.path().join("records");
        std::fs::write(&blocker, "not a directory").unwrap();
        let store = store(&temp);

        let err = store
            .save(ClinicalPayload::new(PatientId::new("p-1").unwrap(), record()))
            .await
            .expect_err("records dir is a file");
        assert!(matches!(err, SaveError::Io(_)));
    }

    #[tokio::test]
    async fn form_submits_through_the_store() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let id = PatientId::new("p-77").unwrap();

        let props = FormProps::new(Patient::new(id.clone()), store.clone());
        let mut form = ClinicalHistoryForm::new(props);
        form.set_field(FieldName::ConsultationReason, "Back pain").unwrap();
        form.set_field(FieldName::PhysiotherapyDiagnosis, "Lumbago").unwrap();
        assert!(form.submit().await.unwrap().is_saved());

        let loaded = store.load(&id).await.unwrap().expect("stored");
        assert_eq!(loaded.consultation_reason, "Back pain");
        assert_eq!(loaded.physiotherapy_diagnosis, "Lumbago");
    }
}
