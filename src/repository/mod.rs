// src/repository/mod.rs
//! Persistence for the four collections: jobs, saved jobs, resumes and
//! newsletter subscribers

pub mod jobs;
pub mod newsletter;
pub mod resumes;
pub mod saved_jobs;

pub use jobs::JobRepository;
pub use newsletter::{NewsletterRepository, Subscriber, SubscribeError};
pub use resumes::{ResumeRecord, ResumeRepository};
pub use saved_jobs::{SaveToggle, SavedJobRepository};

/// Unique-constraint failures are reported by code, independent of the message text
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
