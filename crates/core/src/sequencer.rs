//! Course sequencing rules.
//!
//! Each (user, course) pair has an integer cursor `current_order`. Units
//! unlock strictly in order: content in unit N can only be touched while
//! the cursor sits at N, and the cursor advances by exactly one when a
//! unit reaches 100%. No stored row means the user is at the first unit.

use crate::error::CoreError;

/// The cursor position every user starts at on every course.
pub const INITIAL_ORDER: i32 = 1;

/// Resolve a possibly-absent progress row to an effective cursor position.
pub fn effective_order(stored_order: Option<i32>) -> i32 {
    stored_order.unwrap_or(INITIAL_ORDER)
}

/// Check whether content in a unit with `unit_order` may be attempted.
///
/// Rejects unless the unit is exactly the one the cursor points at: earlier
/// units are already finished, later units are not unlocked yet.
pub fn check_unit_unlocked(stored_order: Option<i32>, unit_order: i32) -> Result<(), CoreError> {
    let current_order = effective_order(stored_order);
    if unit_order != current_order {
        return Err(CoreError::UnitLocked {
            unit_order,
            current_order,
        });
    }
    Ok(())
}

/// The cursor position after a unit at `unit_order` is fully completed.
///
/// The cursor may advance past the last unit in the course; from there every
/// further completion attempt fails [`check_unit_unlocked`], which is the
/// terminal state.
pub fn advanced_order(unit_order: i32) -> i32 {
    unit_order + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn absent_row_means_first_unit() {
        assert_eq!(effective_order(None), 1);
        assert!(check_unit_unlocked(None, 1).is_ok());
    }

    #[test]
    fn later_units_are_locked() {
        assert_matches!(
            check_unit_unlocked(None, 2),
            Err(CoreError::UnitLocked {
                unit_order: 2,
                current_order: 1
            })
        );
        assert_matches!(
            check_unit_unlocked(Some(3), 5),
            Err(CoreError::UnitLocked {
                unit_order: 5,
                current_order: 3
            })
        );
    }

    #[test]
    fn finished_units_are_locked_too() {
        // Cursor moved past unit 2: re-attempts fail the same gate.
        assert_matches!(
            check_unit_unlocked(Some(3), 2),
            Err(CoreError::UnitLocked { .. })
        );
    }

    #[test]
    fn cursor_advances_by_exactly_one() {
        assert_eq!(advanced_order(1), 2);
        assert_eq!(advanced_order(7), 8);
    }
}
