//! Trait catalog: the lookup from trait id to its question and band
//! sentences.
//!
//! The catalog is validated once when it is built. Lookups afterwards never
//! fall back silently; callers that want synthesized questions for unknown
//! ids must ask for them with [`TraitCatalog::resolve_lenient`].

use indexmap::IndexMap;
use std::path::Path;

use super::question::TraitQuestion;
use crate::error::{Result, SourceError, ValidationError};

/// Immutable, insertion-ordered table of trait questions.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitCatalog {
    entries: IndexMap<String, TraitQuestion>,
}

impl TraitCatalog {
    /// Build a catalog, rejecting blank ids, blank titles and duplicates.
    pub fn new(questions: Vec<TraitQuestion>) -> Result<Self, ValidationError> {
        let mut entries = IndexMap::with_capacity(questions.len());
        for question in questions {
            if question.id.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: "id".to_string(),
                    message: "trait id must not be blank".to_string(),
                });
            }
            if question.title.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("{}.title", question.id),
                    message: "title must not be blank".to_string(),
                });
            }
            if entries.contains_key(&question.id) {
                return Err(ValidationError::DuplicateTrait(question.id));
            }
            entries.insert(question.id.clone(), question);
        }
        Ok(Self { entries })
    }

    /// Load a catalog from a JSON array of questions.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SourceError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let questions: Vec<TraitQuestion> =
            serde_json::from_str(&content).map_err(|source| SourceError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), count = questions.len(), "loaded trait catalog");
        Ok(Self::new(questions)?)
    }

    /// Write the catalog as a pretty JSON array.
    pub fn save_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.questions().collect::<Vec<_>>())?;
        std::fs::write(path, json).map_err(|source| SourceError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&TraitQuestion> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn questions(&self) -> impl Iterator<Item = &TraitQuestion> {
        self.entries.values()
    }

    /// Map an ordered id list to questions. Any id missing from the catalog
    /// is an error.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<TraitQuestion>, ValidationError> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.get(id)
                    .cloned()
                    .ok_or_else(|| ValidationError::UnknownTrait(id.to_string()))
            })
            .collect()
    }

    /// Like [`resolve`](Self::resolve) but synthesizes a fallback question
    /// for ids the catalog does not know.
    pub fn resolve_lenient<S: AsRef<str>>(&self, ids: &[S]) -> Vec<TraitQuestion> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.get(id).cloned().unwrap_or_else(|| {
                    tracing::debug!(trait_id = id, "no catalog entry, using fallback question");
                    TraitQuestion::fallback(id)
                })
            })
            .collect()
    }

    /// The ten traits asked by the assessment.
    pub fn builtin() -> Self {
        let questions = vec![
            TraitQuestion::new(
                "party_liking",
                "Social Gatherings",
                "How much do you enjoy parties and large social events?",
                "I prefer quiet, intimate gatherings",
                "I enjoy some social events occasionally",
                "I love big parties and social gatherings",
            ),
            TraitQuestion::new(
                "public_speaking_comfort",
                "Public Speaking",
                "How comfortable are you speaking in front of groups?",
                "I feel nervous speaking in front of others",
                "I can handle small group presentations",
                "I enjoy being the center of attention",
            ),
            TraitQuestion::new(
                "excitement_seeking",
                "Adventure & Thrills",
                "How much do you seek exciting and adventurous experiences?",
                "I prefer calm, predictable activities",
                "I like some adventure now and then",
                "I constantly seek thrilling experiences",
            ),
            TraitQuestion::new(
                "alone_time_preference",
                "Solitude",
                "How much do you value and need alone time?",
                "I need to be around people to feel energized",
                "I enjoy a balance of social and alone time",
                "I recharge best when I'm by myself",
            ),
            TraitQuestion::new(
                "talkativeness",
                "Communication",
                "How talkative are you in social situations?",
                "I tend to be quiet and listen more",
                "I speak when I have something to say",
                "I love talking and sharing my thoughts",
            ),
            TraitQuestion::new(
                "social_energy",
                "Social Energy",
                "How do social interactions affect your energy levels?",
                "Social situations drain my energy",
                "I can be social but need breaks",
                "I gain energy from being around others",
            ),
            TraitQuestion::new(
                "leadership",
                "Leadership",
                "How likely are you to take charge in group situations?",
                "I prefer to follow others' lead",
                "I can lead when necessary",
                "I naturally take charge in groups",
            ),
            TraitQuestion::new(
                "reading_habit",
                "Reading & Learning",
                "How much do you enjoy reading and intellectual activities?",
                "I rarely read for pleasure",
                "I read occasionally",
                "I love reading and do it often",
            ),
            TraitQuestion::new(
                "adventurousness",
                "Exploration",
                "How much do you seek new experiences and places?",
                "I like routine and familiar places",
                "I enjoy some new experiences",
                "I constantly seek new adventures",
            ),
            TraitQuestion::new(
                "group_comfort",
                "Group Dynamics",
                "How comfortable do you feel in group settings?",
                "I feel awkward in group settings",
                "I'm comfortable in small groups",
                "I thrive in large group environments",
            ),
        ];
        let entries = questions.into_iter().map(|q| (q.id.clone(), q)).collect();
        Self { entries }
    }
}

impl Default for TraitCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
