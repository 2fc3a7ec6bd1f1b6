// src/posting/mod.rs
//! Employer job posting: form rules, the step-by-step wizard and the
//! mapping of the form onto storage columns

pub mod mapping;
pub mod schema;
pub mod wizard;

pub use mapping::{form_from_listing, form_to_record, listing_from_form, FIELD_RENAMES};
pub use schema::{FieldError, JobPostingForm};
pub use wizard::{PostingStep, PostingWizard};
