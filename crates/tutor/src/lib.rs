//! AI-tutoring subsystem: completion-service client, content-safety
//! classifier, and the session pipeline that ties quota accounting,
//! context assembly, and logging together.

pub mod client;
pub mod moderation;
pub mod service;

pub use client::{InferenceClient, InferenceConfig, TutorError};
pub use moderation::{BlocklistClassifier, ContentClassifier};
pub use service::{ChatError, ChatOutcome, ChatRequest, TutorService};
