//! History module for Traitscope
//!
//! This module provides the test record model, the aggregator that derives
//! dashboard and profile statistics from a history list, and the timestamp
//! display policy.

mod aggregator;
mod display;
mod record;

pub use aggregator::{
    most_common_label, recent, AggregateStats, HistoryAggregator, DEFAULT_RECENT_COUNT,
};
pub use display::{DateStyle, DisplayTimezone, MAX_OFFSET_MINUTES};
pub use record::{Advice, ConfidenceTier, TestRecord};
