//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-table writes run inside a
//! single transaction so a failure leaves no partial state behind.

pub mod content_repo;
pub mod course_repo;
pub mod progression_repo;
pub mod prompt_log_repo;
pub mod quota_repo;
pub mod skill_ledger_repo;
pub mod skill_repo;
pub mod user_repo;

pub use content_repo::ContentRepo;
pub use course_repo::CourseRepo;
pub use progression_repo::ProgressionRepo;
pub use prompt_log_repo::PromptLogRepo;
pub use quota_repo::QuotaRepo;
pub use skill_ledger_repo::SkillLedgerRepo;
pub use skill_repo::SkillRepo;
pub use user_repo::UserRepo;
