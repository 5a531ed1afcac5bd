//! Pure domain logic for the Pathwise learning platform.
//!
//! This crate has no I/O: it holds the progress, sequencing, mastery, and
//! quota rules plus the shared error and type vocabulary. Persistence lives
//! in `pathwise-db`, HTTP in `pathwise-api`.

pub mod error;
pub mod mastery;
pub mod progress;
pub mod quota;
pub mod sequencer;
pub mod tutor;
pub mod types;
