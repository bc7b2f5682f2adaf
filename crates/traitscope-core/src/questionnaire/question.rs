use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) for the "low" narrative sentence.
pub const NARRATIVE_LOW_MAX: f64 = 3.5;
/// Upper bound (inclusive) for the "medium" narrative sentence.
pub const NARRATIVE_MEDIUM_MAX: f64 = 6.5;

/// One trait the user rates on the 0-10 slider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitQuestion {
    /// Trait key, also used as the key of the submission payload.
    pub id: String,
    /// Display title, e.g. "Social Gatherings".
    pub title: String,
    /// Question shown above the slider.
    pub question: String,
    /// Sentence shown for low values.
    #[serde(default)]
    pub low: String,
    /// Sentence shown for middle values.
    #[serde(default)]
    pub medium: String,
    /// Sentence shown for high values.
    #[serde(default)]
    pub high: String,
}

impl TraitQuestion {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        question: impl Into<String>,
        low: impl Into<String>,
        medium: impl Into<String>,
        high: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            question: question.into(),
            low: low.into(),
            medium: medium.into(),
            high: high.into(),
        }
    }

    /// Question synthesized for a trait id that has no catalog entry.
    ///
    /// Only the first underscore becomes a space; every word start is
    /// upper-cased in the title. Band sentences are left empty.
    pub fn fallback(id: &str) -> Self {
        let spaced = id.replacen('_', " ", 1);
        Self {
            id: id.to_string(),
            title: capitalize_words(&spaced),
            question: format!("Rate your {spaced}"),
            low: String::new(),
            medium: String::new(),
            high: String::new(),
        }
    }

    /// Narrative sentence for a slider value.
    ///
    /// Uses the 3.5 / 6.5 cut points, which are not the band cut points.
    pub fn describe(&self, value: f64) -> &str {
        if value <= NARRATIVE_LOW_MAX {
            &self.low
        } else if value <= NARRATIVE_MEDIUM_MAX {
            &self.medium
        } else {
            &self.high
        }
    }
}

/// Upper-case the first character of every word. Underscores count as word
/// characters, so `speaking_comfort` is a single word.
fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        let is_word = ch.is_alphanumeric() || ch == '_';
        if is_word && at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !is_word;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TraitQuestion {
        TraitQuestion::new("leadership", "Leadership", "Lead?", "low", "medium", "high")
    }

    #[test]
    fn describe_uses_narrative_thresholds() {
        let q = sample();
        assert_eq!(q.describe(0.0), "low");
        assert_eq!(q.describe(3.5), "low");
        assert_eq!(q.describe(3.6), "medium");
        assert_eq!(q.describe(6.5), "medium");
        assert_eq!(q.describe(6.6), "high");
        assert_eq!(q.describe(10.0), "high");
    }

    #[test]
    fn fallback_replaces_only_first_underscore() {
        let q = TraitQuestion::fallback("public_speaking_comfort");
        assert_eq!(q.title, "Public Speaking_comfort");
        assert_eq!(q.question, "Rate your public speaking_comfort");
        assert!(q.low.is_empty());
    }

    #[test]
    fn fallback_single_word() {
        let q = TraitQuestion::fallback("talkativeness");
        assert_eq!(q.title, "Talkativeness");
        assert_eq!(q.describe(9.0), "");
    }
}
