//! Collaborator seams.
//!
//! The core never talks to the network. Trait lists, history and
//! submissions come from implementations of these traits; the crate ships
//! file-backed ones.

mod json_file;
pub mod traits;

pub use json_file::{JsonFileSink, JsonFileSource};
pub use traits::{HistorySource, SubmissionReceipt, SubmissionSink, TraitSource};
