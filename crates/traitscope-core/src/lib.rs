//! # Traitscope Core Library
//!
//! This library provides the core logic for the Traitscope personality
//! assessment. It holds no network code: fetching trait lists, submitting
//! answers and loading history are done by collaborators, and the `traitscope`
//! CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Questionnaire**: trait catalog, slider bands, and a linear stepper
//!   that collects one 0-10 response per trait
//! - **History**: test records and the aggregator behind the dashboard,
//!   profile and history views
//! - **Sources**: traits for the collaborators plus file-backed versions
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`QuestionnaireStepper`]: test-taking state machine
//! - [`HistoryAggregator`]: summary statistics over past results
//! - [`TraitCatalog`]: validated trait lookup
//! - [`Config`]: application configuration management

pub mod error;
pub mod history;
pub mod questionnaire;
pub mod sources;
pub mod storage;

pub use error::{ConfigError, CoreError, SourceError, ValidationError};
pub use history::{
    AggregateStats, Advice, ConfidenceTier, DateStyle, DisplayTimezone, HistoryAggregator,
    TestRecord,
};
pub use questionnaire::{
    QuestionnaireStepper, ResponseBand, ResponseSet, StepMarker, StepperProgress, TraitCatalog,
    TraitQuestion,
};
pub use sources::{
    HistorySource, JsonFileSink, JsonFileSource, SubmissionReceipt, SubmissionSink, TraitSource,
};
pub use storage::Config;
