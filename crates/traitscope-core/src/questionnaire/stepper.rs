//! Questionnaire stepper.
//!
//! A linear state machine over a fixed, non-empty list of trait questions.
//! It holds one numeric response per trait and the current position. It
//! performs no I/O; loading questions and submitting answers belong to the
//! caller.
//!
//! ## Transitions
//!
//! ```text
//! 0 <-> 1 <-> ... <-> last
//! ```
//!
//! `advance()` at `last` and `retreat()` at `0` are silent no-ops.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::band::ResponseBand;
use super::question::TraitQuestion;
use crate::error::ValidationError;

/// Lowest value a response can hold.
pub const MIN_RESPONSE: f64 = 0.0;
/// Highest value a response can hold.
pub const MAX_RESPONSE: f64 = 10.0;
/// Value every trait starts at.
pub const DEFAULT_RESPONSE: f64 = 5.0;

/// Ordered mapping of trait id to response value.
///
/// Serializes as a flat JSON object in questionnaire order, which is the
/// payload the prediction service expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    values: IndexMap<String, f64>,
}

impl ResponseSet {
    fn with_defaults<'a>(ids: impl Iterator<Item = &'a str>) -> Self {
        Self {
            values: ids.map(|id| (id.to_string(), DEFAULT_RESPONSE)).collect(),
        }
    }

    pub fn get(&self, trait_id: &str) -> Option<f64> {
        self.values.get(trait_id).copied()
    }

    pub fn contains(&self, trait_id: &str) -> bool {
        self.values.contains_key(trait_id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Clamp a raw slider value into the response range.
///
/// NaN has no meaningful position on the slider and maps to the neutral
/// default.
pub fn clamp_response(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_RESPONSE
    } else {
        value.clamp(MIN_RESPONSE, MAX_RESPONSE)
    }
}

/// Position of a question relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMarker {
    /// Before the current step.
    Answered,
    Current,
    /// After the current step.
    Pending,
}

/// Progress information for a questionnaire session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepperProgress {
    /// Current question index.
    pub current_index: usize,
    /// Total number of questions.
    pub total: usize,
    /// Rounded percentage, 1..=100.
    pub percent: u32,
    /// Whether the final question is showing.
    pub is_complete: bool,
}

/// Traversal and response state for one questionnaire session.
#[derive(Debug, Clone)]
pub struct QuestionnaireStepper {
    questions: Vec<TraitQuestion>,
    responses: ResponseSet,
    index: usize,
}

impl QuestionnaireStepper {
    /// Start a session over `questions`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyTraitList`] if `questions` is empty, and
    /// [`ValidationError::DuplicateTrait`] if an id appears twice.
    pub fn new(questions: Vec<TraitQuestion>) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::EmptyTraitList);
        }
        let responses = ResponseSet::with_defaults(questions.iter().map(|q| q.id.as_str()));
        if responses.len() != questions.len() {
            let mut seen = std::collections::HashSet::new();
            let dup = questions
                .iter()
                .find(|q| !seen.insert(q.id.as_str()))
                .map(|q| q.id.clone())
                .unwrap_or_default();
            return Err(ValidationError::DuplicateTrait(dup));
        }
        tracing::debug!(traits = questions.len(), "questionnaire started");
        Ok(Self {
            questions,
            responses,
            index: 0,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn questions(&self) -> &[TraitQuestion] {
        &self.questions
    }

    pub fn current_question(&self) -> &TraitQuestion {
        &self.questions[self.index]
    }

    pub fn current_value(&self) -> f64 {
        self.responses
            .get(&self.current_question().id)
            .unwrap_or(DEFAULT_RESPONSE)
    }

    pub fn current_band(&self) -> ResponseBand {
        ResponseBand::from_value(self.current_value())
    }

    pub fn current_description(&self) -> &str {
        self.current_question().describe(self.current_value())
    }

    pub fn response(&self, trait_id: &str) -> Option<f64> {
        self.responses.get(trait_id)
    }

    /// True when the final question is showing. Every trait always carries a
    /// value, so completion is purely positional.
    pub fn is_complete(&self) -> bool {
        self.index == self.last_index()
    }

    /// `(index + 1) / len`, in `(0, 1]`.
    pub fn progress_fraction(&self) -> f64 {
        (self.index + 1) as f64 / self.questions.len() as f64
    }

    pub fn progress(&self) -> StepperProgress {
        StepperProgress {
            current_index: self.index,
            total: self.questions.len(),
            percent: (self.progress_fraction() * 100.0).round() as u32,
            is_complete: self.is_complete(),
        }
    }

    pub fn step_markers(&self) -> Vec<StepMarker> {
        (0..self.questions.len())
            .map(|i| match i.cmp(&self.index) {
                std::cmp::Ordering::Less => StepMarker::Answered,
                std::cmp::Ordering::Equal => StepMarker::Current,
                std::cmp::Ordering::Greater => StepMarker::Pending,
            })
            .collect()
    }

    /// Copy of every trait's value, in questionnaire order.
    pub fn snapshot_responses(&self) -> ResponseSet {
        self.responses.clone()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Store a response, clamped to `[0, 10]`. Returns the stored value.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownTrait`] if the id is not part of this
    /// questionnaire. Keys are never added.
    pub fn set_response(&mut self, trait_id: &str, value: f64) -> Result<f64, ValidationError> {
        let slot = self
            .responses
            .values
            .get_mut(trait_id)
            .ok_or_else(|| ValidationError::UnknownTrait(trait_id.to_string()))?;
        let stored = clamp_response(value);
        if stored != value {
            tracing::debug!(trait_id, requested = value, stored, "response clamped");
        }
        *slot = stored;
        Ok(stored)
    }

    /// Store a response for the question currently showing.
    pub fn set_current_response(&mut self, value: f64) -> f64 {
        let id = self.questions[self.index].id.clone();
        // Every question id has a slot, so the lookup cannot miss.
        self.set_response(&id, value)
            .unwrap_or_else(|_| clamp_response(value))
    }

    /// Move to the next question. No-op on the last one.
    pub fn advance(&mut self) -> usize {
        if self.index < self.last_index() {
            self.index += 1;
            tracing::trace!(index = self.index, "advanced");
        }
        self.index
    }

    /// Move to the previous question. No-op on the first one.
    pub fn retreat(&mut self) -> usize {
        if self.index > 0 {
            self.index -= 1;
            tracing::trace!(index = self.index, "retreated");
        }
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn questions(n: usize) -> Vec<TraitQuestion> {
        (0..n)
            .map(|i| TraitQuestion::new(format!("trait_{i}"), format!("Trait {i}"), "?", "l", "m", "h"))
            .collect()
    }

    #[test]
    fn new_defaults_every_trait() {
        let stepper = QuestionnaireStepper::new(questions(4)).unwrap();
        let snapshot = stepper.snapshot_responses();
        assert_eq!(snapshot.len(), 4);
        assert!(snapshot.iter().all(|(_, v)| v == DEFAULT_RESPONSE));
        assert_eq!(stepper.current_index(), 0);
        assert_eq!(stepper.progress_fraction(), 0.25);
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = QuestionnaireStepper::new(Vec::new()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTraitList);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut qs = questions(3);
        qs.push(qs[1].clone());
        let err = QuestionnaireStepper::new(qs).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateTrait("trait_1".into()));
    }

    #[test]
    fn boundary_moves_are_noops() {
        let mut stepper = QuestionnaireStepper::new(questions(2)).unwrap();
        assert_eq!(stepper.retreat(), 0);
        assert_eq!(stepper.advance(), 1);
        assert!(stepper.is_complete());
        assert_eq!(stepper.advance(), 1);
        assert_eq!(stepper.retreat(), 0);
        assert!(!stepper.is_complete());
    }

    #[test]
    fn single_question_is_complete_immediately() {
        let stepper = QuestionnaireStepper::new(questions(1)).unwrap();
        assert!(stepper.is_complete());
        assert_eq!(stepper.progress_fraction(), 1.0);
        assert_eq!(stepper.progress().percent, 100);
    }

    #[test]
    fn set_response_clamps() {
        let mut stepper = QuestionnaireStepper::new(questions(1)).unwrap();
        assert_eq!(stepper.set_response("trait_0", -3.0).unwrap(), 0.0);
        assert_eq!(stepper.set_response("trait_0", 12.5).unwrap(), 10.0);
        assert_eq!(stepper.set_response("trait_0", 7.3).unwrap(), 7.3);
        assert_eq!(stepper.set_response("trait_0", f64::NAN).unwrap(), DEFAULT_RESPONSE);
        assert_eq!(stepper.response("trait_0"), Some(DEFAULT_RESPONSE));
    }

    #[test]
    fn set_response_does_not_move_or_add_keys() {
        let mut stepper = QuestionnaireStepper::new(questions(3)).unwrap();
        stepper.advance();
        stepper.set_response("trait_2", 9.0).unwrap();
        assert_eq!(stepper.current_index(), 1);

        let err = stepper.set_response("missing", 1.0).unwrap_err();
        assert_eq!(err, ValidationError::UnknownTrait("missing".into()));
        assert_eq!(stepper.snapshot_responses().len(), 3);
    }

    #[test]
    fn current_response_and_presentation() {
        let mut stepper = QuestionnaireStepper::new(questions(2)).unwrap();
        stepper.advance();
        stepper.set_current_response(8.1);
        assert_eq!(stepper.response("trait_1"), Some(8.1));
        assert_eq!(stepper.current_band(), ResponseBand::VeryHigh);
        assert_eq!(stepper.current_description(), "h");
        assert_eq!(stepper.response("trait_0"), Some(DEFAULT_RESPONSE));
    }

    #[test]
    fn current_response_clamps_like_set_response() {
        let mut by_id = QuestionnaireStepper::new(questions(2)).unwrap();
        let mut current = by_id.clone();
        for value in [-1.0, 10.5, f64::NAN, 4.2] {
            let expected = by_id.set_response("trait_0", value).unwrap();
            assert_eq!(current.set_current_response(value), expected);
            assert_eq!(current.snapshot_responses(), by_id.snapshot_responses());
        }
        assert_eq!(current.snapshot_responses().len(), 2);
    }

    #[test]
    fn step_markers_follow_position() {
        let mut stepper = QuestionnaireStepper::new(questions(3)).unwrap();
        stepper.advance();
        assert_eq!(
            stepper.step_markers(),
            vec![StepMarker::Answered, StepMarker::Current, StepMarker::Pending]
        );
    }

    #[test]
    fn snapshot_is_detached() {
        let mut stepper = QuestionnaireStepper::new(questions(2)).unwrap();
        let before = stepper.snapshot_responses();
        stepper.set_response("trait_0", 1.0).unwrap();
        assert_eq!(before.get("trait_0"), Some(DEFAULT_RESPONSE));
        assert_eq!(stepper.snapshot_responses().get("trait_0"), Some(1.0));
    }

    #[test]
    fn snapshot_serializes_in_order() {
        let mut stepper = QuestionnaireStepper::new(questions(2)).unwrap();
        stepper.set_response("trait_1", 2.5).unwrap();
        let json = serde_json::to_string(&stepper.snapshot_responses()).unwrap();
        assert_eq!(json, r#"{"trait_0":5.0,"trait_1":2.5}"#);
    }

    proptest! {
        #[test]
        fn prop_index_stays_in_bounds(len in 1usize..12, moves in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut stepper = QuestionnaireStepper::new(questions(len)).unwrap();
            let mut last_fraction = stepper.progress_fraction();
            for forward in moves {
                let before = stepper.current_index();
                let after = if forward { stepper.advance() } else { stepper.retreat() };
                prop_assert!(after < len);
                prop_assert!(after.abs_diff(before) <= 1);
                if forward {
                    prop_assert!(stepper.progress_fraction() >= last_fraction);
                }
                last_fraction = stepper.progress_fraction();
            }
        }

        #[test]
        fn prop_responses_stay_in_range(value in -1.0e6f64..1.0e6) {
            let mut stepper = QuestionnaireStepper::new(questions(1)).unwrap();
            let stored = stepper.set_response("trait_0", value).unwrap();
            prop_assert!((MIN_RESPONSE..=MAX_RESPONSE).contains(&stored));
            if (MIN_RESPONSE..=MAX_RESPONSE).contains(&value) {
                prop_assert_eq!(stored, value);
            }
        }
    }
}
