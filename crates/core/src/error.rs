use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The (user, item) completion record already exists. Re-completion is
    /// rejected, never overwritten.
    #[error("{item} {id} is already completed")]
    AlreadyCompleted { item: &'static str, id: DbId },

    /// The unit's order does not match the user's course cursor, so the
    /// unit is either already finished or not unlocked yet.
    #[error("Unit with order {unit_order} is locked (current order is {current_order})")]
    UnitLocked { unit_order: i32, current_order: i32 },

    /// The user has spent their daily token budget.
    #[error("Daily token limit reached")]
    QuotaExceeded,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
