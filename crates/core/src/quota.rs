//! Daily token quota rules.
//!
//! Every user carries a cumulative `tokens_used` counter and a `last_reset`
//! timestamp. The counter resets to zero lazily, on access, once more than
//! 24 hours have passed since the last reset; there is no background timer.
//! A request is denied once the counter has reached the daily limit. Usage
//! is recorded after the fact, so a request started just under the limit
//! may push the counter past it and only the next request is denied.

use chrono::Duration;

use crate::types::Timestamp;

/// Default daily token budget per user.
pub const DAILY_TOKEN_LIMIT: i64 = 10_000;

/// Length of the rolling reset window, in hours.
pub const RESET_WINDOW_HOURS: i64 = 24;

/// Length of the rolling reset window.
pub fn reset_window() -> Duration {
    Duration::hours(RESET_WINDOW_HOURS)
}

/// Whether the quota window has elapsed and the counter is due for a reset.
pub fn reset_due(last_reset: Timestamp, now: Timestamp) -> bool {
    now - last_reset > reset_window()
}

/// Outcome of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaStatus {
    /// The user may proceed; `remaining` tokens are left in the window.
    Ok { remaining: i64 },
    /// The user has spent the daily budget.
    Exceeded,
}

/// Compare a (post-reset) counter against the daily limit.
pub fn check(tokens_used: i64, daily_limit: i64) -> QuotaStatus {
    if tokens_used >= daily_limit {
        QuotaStatus::Exceeded
    } else {
        QuotaStatus::Ok {
            remaining: daily_limit - tokens_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn reset_due_only_after_24h() {
        let now = Utc::now();
        assert!(!reset_due(now - Duration::hours(23), now));
        assert!(!reset_due(now - Duration::hours(24), now));
        assert!(reset_due(now - Duration::hours(24) - Duration::seconds(1), now));
    }

    #[test]
    fn under_limit_is_ok() {
        assert_eq!(
            check(9_999, DAILY_TOKEN_LIMIT),
            QuotaStatus::Ok { remaining: 1 }
        );
    }

    #[test]
    fn at_or_over_limit_is_exceeded() {
        assert_eq!(check(DAILY_TOKEN_LIMIT, DAILY_TOKEN_LIMIT), QuotaStatus::Exceeded);
        // Overshoot from a request that finished just under the limit.
        assert_eq!(check(10_001, DAILY_TOKEN_LIMIT), QuotaStatus::Exceeded);
    }

    #[test]
    fn zero_usage_has_full_budget() {
        assert_eq!(
            check(0, DAILY_TOKEN_LIMIT),
            QuotaStatus::Ok {
                remaining: DAILY_TOKEN_LIMIT
            }
        );
    }
}
