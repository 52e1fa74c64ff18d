//! Interactive voter registration intake.
//!
//! The core is a guarded step pipeline: an ordered series of validated
//! prompts, each with retry-until-valid semantics, an optional eligibility
//! guard that can abort after acceptance, and a continuation checkpoint
//! before every step. Every run ends in exactly one of two outcomes:
//! completion with the collected record, or cancellation with a reason.
pub mod cli;
pub mod console;
pub mod fields;
pub mod pipeline;
pub mod registration;
pub mod states;
pub mod tools;
pub mod validators;
