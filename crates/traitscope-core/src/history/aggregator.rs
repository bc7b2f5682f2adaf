//! History statistics.
//!
//! Derives summary values from a list of past test records that the caller
//! has already fetched. Every call recomputes from scratch; nothing is
//! cached between calls and the input is never modified.
//!
//! ## Ordering precondition
//!
//! Records are expected newest first. "Most recent" is `records[0]` and
//! "recent N" is a positional prefix; neither re-sorts nor checks the order.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::record::TestRecord;

/// Number of records shown in "recent activity" lists.
pub const DEFAULT_RECENT_COUNT: usize = 3;

/// Summary statistics over a history list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of records
    pub total_count: usize,
    /// Label with the highest count; ties go to the label seen first
    pub most_common: Option<String>,
    /// Count per label, in first-seen order
    pub breakdown: IndexMap<String, usize>,
    /// Mean confidence, `None` when there are no records
    pub average_confidence: Option<f64>,
    /// First record of the input
    pub most_recent: Option<TestRecord>,
    /// Records in input order
    pub records: Vec<TestRecord>,
    /// Creation timestamps, newest first
    pub test_dates: Vec<DateTime<Utc>>,
}

impl AggregateStats {
    /// Share of records carrying `label`, 0.0 to 1.0.
    pub fn share_of(&self, label: &str) -> f64 {
        match (self.breakdown.get(label), self.total_count) {
            (Some(count), total) if total > 0 => *count as f64 / total as f64,
            _ => 0.0,
        }
    }
}

/// Aggregator for history statistics
#[derive(Debug, Clone)]
pub struct HistoryAggregator {
    /// How many records `recent` returns
    pub recent_count: usize,
}

impl Default for HistoryAggregator {
    fn default() -> Self {
        Self {
            recent_count: DEFAULT_RECENT_COUNT,
        }
    }
}

impl HistoryAggregator {
    /// Create an aggregator with the default recent count
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recent_count(recent_count: usize) -> Self {
        Self { recent_count }
    }

    /// Compute statistics over `records`.
    ///
    /// An empty slice yields the neutral statistics: zero count, no label,
    /// no average and no most recent record.
    pub fn aggregate(&self, records: &[TestRecord]) -> AggregateStats {
        if records.is_empty() {
            return AggregateStats::default();
        }

        let mut breakdown: IndexMap<String, usize> = IndexMap::new();
        let mut total_confidence = 0.0;
        for record in records {
            *breakdown.entry(record.prediction.clone()).or_insert(0) += 1;
            total_confidence += record.confidence;
        }

        let most_common = most_common_label(&breakdown).map(str::to_string);
        let average_confidence = total_confidence / records.len() as f64;

        let mut test_dates: Vec<DateTime<Utc>> = records.iter().map(|r| r.created_at).collect();
        test_dates.sort_by(|a, b| b.cmp(a));

        tracing::debug!(
            total = records.len(),
            most_common = most_common.as_deref().unwrap_or(""),
            average_confidence,
            "aggregated history"
        );

        AggregateStats {
            total_count: records.len(),
            most_common,
            breakdown,
            average_confidence: Some(average_confidence),
            most_recent: records.first().cloned(),
            records: records.to_vec(),
            test_dates,
        }
    }

    /// The first `recent_count` records.
    pub fn recent<'a>(&self, records: &'a [TestRecord]) -> &'a [TestRecord] {
        recent(records, self.recent_count)
    }
}

/// First `n` records, or all of them when there are fewer.
pub fn recent(records: &[TestRecord], n: usize) -> &[TestRecord] {
    &records[..n.min(records.len())]
}

/// Label with the strictly greatest count. Iterates in insertion order, so a
/// tie keeps the label inserted first.
pub fn most_common_label(counts: &IndexMap<String, usize>) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for (label, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label.as_str(), count)),
        }
    }
    best.map(|(label, _)| label)
}
