//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod completion;
pub mod content;
pub mod course;
pub mod progress;
pub mod prompt_log;
pub mod skill;
pub mod user;
