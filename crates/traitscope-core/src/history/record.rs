use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Personalized guidance attached to a prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub advice: Vec<String>,
    #[serde(default)]
    pub career_suggestions: Vec<String>,
}

impl Advice {
    pub fn is_empty(&self) -> bool {
        self.description.as_deref().map_or(true, str::is_empty)
            && self.strengths.is_empty()
            && self.advice.is_empty()
            && self.career_suggestions.is_empty()
    }
}

/// One completed assessment as returned by the history provider.
///
/// `prediction` and `confidence` are required and go through
/// [`TestRecord::validate`] while deserializing, so a payload that is
/// missing them or carries an out-of-range confidence never produces a
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTestRecord")]
pub struct TestRecord {
    pub id: String,
    /// Category label, e.g. "Introvert". The set is open-ended.
    pub prediction: String,
    /// Classifier certainty, 0.0 to 1.0.
    pub confidence: f64,
    /// Probability per category. Values sum to about 1.0; not enforced.
    pub probabilities: IndexMap<String, f64>,
    pub created_at: DateTime<Utc>,
    pub advice: Option<Advice>,
}

/// Wire shape of a record before validation.
#[derive(Deserialize)]
struct RawTestRecord {
    #[serde(alias = "test_id", deserialize_with = "de_record_id")]
    id: String,
    prediction: String,
    confidence: f64,
    #[serde(default)]
    probabilities: IndexMap<String, f64>,
    #[serde(deserialize_with = "de_timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    advice: Option<Advice>,
}

impl TryFrom<RawTestRecord> for TestRecord {
    type Error = ValidationError;

    fn try_from(raw: RawTestRecord) -> Result<Self, Self::Error> {
        let record = TestRecord {
            id: raw.id,
            prediction: raw.prediction,
            confidence: raw.confidence,
            probabilities: raw.probabilities,
            created_at: raw.created_at,
            advice: raw.advice,
        };
        record.validate()?;
        Ok(record)
    }
}

impl TestRecord {
    pub fn new(
        id: impl Into<String>,
        prediction: impl Into<String>,
        confidence: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            prediction: prediction.into(),
            confidence,
            probabilities: IndexMap::new(),
            created_at,
            advice: None,
        }
    }

    pub fn with_probabilities<I, S>(mut self, probabilities: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.probabilities = probabilities.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    pub fn with_advice(mut self, advice: Advice) -> Self {
        self.advice = Some(advice);
        self
    }

    /// Reject records whose fields cannot feed the statistics.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prediction.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "prediction".to_string(),
                message: "prediction label is blank".to_string(),
            });
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(ValidationError::InvalidValue {
                field: "confidence".to_string(),
                message: format!("{} is outside 0.0..=1.0", self.confidence),
            });
        }
        Ok(())
    }

    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_confidence(self.confidence)
    }

    /// Confidence as a whole percentage.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    /// Probability entries, most likely first. Equal probabilities are
    /// ordered by label.
    pub fn ranked_probabilities(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self
            .probabilities
            .iter()
            .map(|(label, p)| (label.as_str(), *p))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Bucketing of a classifier confidence for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    /// 0.8 and above
    High,
    /// 0.6 up to 0.8
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceTier::High
        } else if confidence >= 0.6 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceTier::High => f.write_str("high"),
            ConfidenceTier::Medium => f.write_str("medium"),
            ConfidenceTier::Low => f.write_str("low"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn de_record_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Accepts RFC 3339, or a naive timestamp which is taken as UTC.
fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!("unrecognized timestamp: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn deserializes_backend_payload() {
        let json = r#"{
            "test_id": 42,
            "prediction": "Ambivert",
            "confidence": 0.71,
            "probabilities": {"Ambivert": 0.71, "Extrovert": 0.2, "Introvert": 0.09},
            "created_at": "2025-01-05T09:30:00",
            "advice": {"description": "Balanced", "strengths": ["Adaptable"]}
        }"#;
        let record: TestRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.created_at, Utc.with_ymd_and_hms(2025, 1, 5, 9, 30, 0).unwrap());
        let advice = record.advice.unwrap();
        assert_eq!(advice.strengths, vec!["Adaptable"]);
        assert!(advice.career_suggestions.is_empty());
    }

    #[test]
    fn missing_confidence_fails_fast() {
        let json = r#"{"id": "a", "prediction": "Introvert", "created_at": "2025-01-05T09:30:00Z"}"#;
        assert!(serde_json::from_str::<TestRecord>(json).is_err());
    }

    #[test]
    fn out_of_range_confidence_fails_to_deserialize() {
        let json = r#"{"id": 1, "prediction": "Introvert", "confidence": 3.0,
            "created_at": "2025-01-05T09:30:00Z"}"#;
        let err = serde_json::from_str::<TestRecord>(json).unwrap_err();
        assert!(err.to_string().contains("confidence"));

        let blank = r#"{"id": 1, "prediction": "", "confidence": 0.5,
            "created_at": "2025-01-05T09:30:00Z"}"#;
        assert!(serde_json::from_str::<TestRecord>(blank).is_err());
    }

    #[test]
    fn serialized_record_reads_back() {
        let record = TestRecord::new("7", "Extrovert", 0.83, Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap())
            .with_probabilities([("Extrovert", 0.83), ("Introvert", 0.17)])
            .with_advice(Advice {
                strengths: vec!["Energetic".into()],
                ..Advice::default()
            });
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(serde_json::from_str::<TestRecord>(&json).unwrap(), record);
    }

    #[test]
    fn advice_emptiness() {
        assert!(Advice::default().is_empty());
        let blank_description = Advice {
            description: Some(String::new()),
            ..Advice::default()
        };
        assert!(blank_description.is_empty());
        let with_tip = Advice {
            advice: vec!["Schedule quiet time".into()],
            ..Advice::default()
        };
        assert!(!with_tip.is_empty());
    }

    #[test]
    fn missing_prediction_fails_fast() {
        let json = r#"{"id": "a", "confidence": 0.5, "created_at": "2025-01-05T09:30:00Z"}"#;
        assert!(serde_json::from_str::<TestRecord>(json).is_err());
    }

    #[test]
    fn rfc3339_offset_is_normalized() {
        let ts = parse_timestamp("2025-01-05T15:00:00+05:30").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 1, 5, 9, 30, 0).unwrap());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn validate_rejects_bad_confidence() {
        let now = Utc::now();
        assert!(TestRecord::new("1", "Introvert", 0.5, now).validate().is_ok());
        assert!(TestRecord::new("1", "Introvert", 1.2, now).validate().is_err());
        assert!(TestRecord::new("1", "Introvert", f64::NAN, now).validate().is_err());
        assert!(TestRecord::new("1", " ", 0.5, now).validate().is_err());
    }

    #[test]
    fn confidence_tiers() {
        assert_eq!(ConfidenceTier::from_confidence(0.8), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(0.79), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(0.6), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(0.59), ConfidenceTier::Low);
    }

    #[test]
    fn ranked_probabilities_sorts_descending() {
        let record = TestRecord::new("1", "Introvert", 0.6, Utc::now()).with_probabilities([
            ("Extrovert", 0.2),
            ("Introvert", 0.6),
            ("Ambivert", 0.2),
        ]);
        let ranked = record.ranked_probabilities();
        assert_eq!(ranked, vec![("Introvert", 0.6), ("Ambivert", 0.2), ("Extrovert", 0.2)]);
        assert_eq!(record.confidence_percent(), 60);
    }
}
