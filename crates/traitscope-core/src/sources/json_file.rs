//! File-backed collaborators.
//!
//! These read the same JSON shapes the backend API returns, so a saved
//! response body can be fed straight into the core:
//!
//! - trait list: `{"features": ["party_liking", ...]}` or a bare array
//! - history: `{"history": [...], "total_tests": n}` or a bare array

use serde::de::Error as _;
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::traits::{HistorySource, SubmissionReceipt, SubmissionSink, TraitSource};
use crate::error::{Result, SourceError, ValidationError};
use crate::history::TestRecord;
use crate::questionnaire::ResponseSet;

/// Reads trait ids or history from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_failed(&self, source: serde_json::Error) -> SourceError {
        SourceError::ParseFailed {
            path: self.path.clone(),
            source,
        }
    }

    /// Read the file and return the items of the list stored under `field`,
    /// or of the top-level array when the payload is not wrapped.
    fn read_list(&self, field: &'static str) -> Result<Vec<Value>> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::ReadFailed {
            path: self.path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|e| self.parse_failed(e))?;
        let list = match value {
            Value::Object(mut object) => object
                .remove(field)
                .ok_or_else(|| self.parse_failed(serde_json::Error::missing_field(field)))?,
            other => other,
        };
        match list {
            Value::Array(items) => Ok(items),
            other => Err(self
                .parse_failed(serde_json::Error::custom(format!(
                    "expected an array for `{field}`, found {other}"
                )))
                .into()),
        }
    }
}

impl TraitSource for JsonFileSource {
    fn trait_ids(&self) -> Result<Vec<String>> {
        let ids: Vec<String> = serde_json::from_value(Value::Array(self.read_list("features")?))
            .map_err(|e| self.parse_failed(e))?;
        tracing::debug!(path = %self.path.display(), count = ids.len(), "read trait ids");
        if ids.is_empty() {
            return Err(ValidationError::EmptyTraitList.into());
        }
        Ok(ids)
    }
}

impl HistorySource for JsonFileSource {
    fn history(&self) -> Result<Vec<TestRecord>> {
        let records = self
            .read_list("history")?
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<TestRecord>(item).map_err(|source| SourceError::InvalidRecord {
                    path: self.path.clone(),
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "read history");
        Ok(records)
    }
}

/// Writes submissions as pretty JSON to a file.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SubmissionSink for JsonFileSink {
    fn submit(&self, responses: &ResponseSet) -> Result<SubmissionReceipt> {
        let json = serde_json::to_string_pretty(responses)?;
        std::fs::write(&self.path, json).map_err(|source| SourceError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), traits = responses.len(), "wrote submission");
        Ok(SubmissionReceipt {
            reference: self.path.display().to_string(),
            trait_count: responses.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::questionnaire::{QuestionnaireStepper, TraitCatalog};

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_wrapped_and_bare_trait_lists() {
        let dir = tempfile::tempdir().unwrap();
        let wrapped = write(&dir, "a.json", r#"{"features": ["leadership", "talkativeness"]}"#);
        let bare = write(&dir, "b.json", r#"["leadership"]"#);
        assert_eq!(JsonFileSource::new(wrapped).trait_ids().unwrap().len(), 2);
        assert_eq!(JsonFileSource::new(bare).trait_ids().unwrap(), vec!["leadership"]);
    }

    #[test]
    fn empty_trait_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "a.json", r#"{"features": []}"#);
        let err = JsonFileSource::new(path).trait_ids().unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyTraitList)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = JsonFileSource::new("/nonexistent/history.json").history().unwrap_err();
        assert!(matches!(err, CoreError::Source(SourceError::ReadFailed { .. })));
        assert!(err.to_string().contains("/nonexistent/history.json"));
    }

    #[test]
    fn reads_history_and_validates_records() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(
            &dir,
            "h.json",
            r#"{"history": [{"id": 1, "prediction": "Introvert", "confidence": 0.9,
                "created_at": "2025-01-05T09:30:00Z"}], "total_tests": 1}"#,
        );
        assert_eq!(JsonFileSource::new(good).history().unwrap()[0].id, "1");

        let bad = write(
            &dir,
            "bad.json",
            r#"[{"id": 1, "prediction": "Introvert", "confidence": 1.5,
                "created_at": "2025-01-05T09:30:00Z"}]"#,
        );
        let err = JsonFileSource::new(bad).history().unwrap_err();
        assert!(matches!(err, CoreError::Source(SourceError::InvalidRecord { index: 0, .. })));
        assert!(err.to_string().contains("outside 0.0..=1.0"));
    }

    #[test]
    fn history_error_names_the_missing_field_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "h.json",
            r#"{"history": [
                {"id": 2, "prediction": "Extrovert", "confidence": 0.8, "created_at": "2025-02-01T10:00:00Z"},
                {"id": 1, "prediction": "Introvert", "created_at": "2025-01-05T09:30:00Z"}
            ]}"#,
        );
        let err = JsonFileSource::new(path).history().unwrap_err();
        assert!(matches!(err, CoreError::Source(SourceError::InvalidRecord { index: 1, .. })));
        let message = err.to_string();
        assert!(message.contains("missing field `confidence`"), "{message}");
        assert!(message.contains("h.json"), "{message}");
    }

    #[test]
    fn wrong_payload_shape_is_described() {
        let dir = tempfile::tempdir().unwrap();
        let unwrapped = write(&dir, "a.json", r#"{"traits": ["leadership"]}"#);
        let err = JsonFileSource::new(unwrapped).trait_ids().unwrap_err();
        assert!(err.to_string().contains("missing field `features`"));

        let not_a_list = write(&dir, "b.json", r#"{"features": "leadership"}"#);
        let err = JsonFileSource::new(not_a_list).trait_ids().unwrap_err();
        assert!(matches!(err, CoreError::Source(SourceError::ParseFailed { .. })));
        assert!(err.to_string().contains("expected an array"));

        let bad_id = write(&dir, "c.json", r#"["leadership", 7]"#);
        assert!(JsonFileSource::new(bad_id).trait_ids().is_err());
    }

    #[test]
    fn sink_writes_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        let questions = TraitCatalog::builtin().resolve(&["leadership"][..]).unwrap();
        let stepper = QuestionnaireStepper::new(questions).unwrap();

        let receipt = JsonFileSink::new(&path).submit(&stepper.snapshot_responses()).unwrap();
        assert_eq!(receipt.trait_count, 1);

        let written: ResponseSet = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.get("leadership"), Some(5.0));
    }
}
