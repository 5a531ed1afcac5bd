//! Daily token quota state on the `users` table.
//!
//! The reset is lazy: a single conditional `UPDATE` zeroes the counter and
//! stamps `last_reset` in one atomic statement once the window has elapsed.
//! Usage recording is an atomic increment, so concurrent requests can never
//! corrupt the counter (though a request admitted just under the limit may
//! push it past; only the next request is then denied).

use pathwise_core::error::CoreError;
use pathwise_core::types::DbId;
use sqlx::PgPool;

use crate::DbError;

pub struct QuotaRepo;

impl QuotaRepo {
    /// Reset the user's counter if the window has elapsed, then return the
    /// (post-reset) `tokens_used` value.
    ///
    /// The reset persists immediately, independent of whether the request
    /// that triggered it goes on to succeed.
    pub async fn reset_if_due(
        pool: &PgPool,
        user_id: DbId,
        window_hours: i32,
    ) -> Result<i64, DbError> {
        sqlx::query(
            "UPDATE users SET tokens_used = 0, last_reset = NOW() \
             WHERE id = $1 AND NOW() - last_reset > make_interval(hours => $2)",
        )
        .bind(user_id)
        .bind(window_hours)
        .execute(pool)
        .await?;

        let tokens_used: i64 = sqlx::query_scalar("SELECT tokens_used FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: user_id,
            })?;

        Ok(tokens_used)
    }

    /// Add a successful request's token consumption to the user's counter.
    pub async fn record_usage(
        pool: &PgPool,
        user_id: DbId,
        tokens: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET tokens_used = tokens_used + $2 WHERE id = $1")
            .bind(user_id)
            .bind(tokens)
            .execute(pool)
            .await?;
        Ok(())
    }
}
