use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::history::TestRecord;
use crate::questionnaire::ResponseSet;

/// Supplies the ordered trait ids a questionnaire asks about.
/// The list must be non-empty and stable for the session.
pub trait TraitSource {
    fn trait_ids(&self) -> Result<Vec<String>>;
}

/// Supplies past test records, newest first.
pub trait HistorySource {
    fn history(&self) -> Result<Vec<TestRecord>>;
}

/// Accepts a completed response set.
pub trait SubmissionSink {
    fn submit(&self, responses: &ResponseSet) -> Result<SubmissionReceipt>;
}

/// What a sink hands back after accepting a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Identifier of the stored submission (a test id, a file path, ...).
    pub reference: String,
    /// Number of traits submitted.
    pub trait_count: usize,
}
