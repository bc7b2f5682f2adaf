//! Questionnaire module for Traitscope
//!
//! This module provides the trait catalog, the slider-band and narrative
//! helpers, and the stepper that walks a user through one question per
//! trait.

mod band;
mod catalog;
mod question;
mod stepper;

pub use band::ResponseBand;
pub use catalog::TraitCatalog;
pub use question::{TraitQuestion, NARRATIVE_LOW_MAX, NARRATIVE_MEDIUM_MAX};
pub use stepper::{
    clamp_response, QuestionnaireStepper, ResponseSet, StepMarker, StepperProgress,
    DEFAULT_RESPONSE, MAX_RESPONSE, MIN_RESPONSE,
};
