//! Unit completion percentage.
//!
//! A unit always owns exactly one lesson plus zero-or-more practice
//! problems; each of those counts as one "part". The percentage is the
//! completed-part ratio, floored to an integer in `[0, 100]`.

/// Percentage at which a unit counts as fully done.
pub const UNIT_COMPLETE_PCT: i32 = 100;

/// Compute the completion percentage for a unit.
///
/// * `lesson_completed` - whether the unit's lesson has a completion record.
/// * `problems_completed` - how many of the unit's problems are completed.
/// * `problem_count` - how many practice problems the unit owns.
///
/// Total parts = 1 (the lesson) + `problem_count`. A unit with zero total
/// parts cannot occur for well-formed content but is defined as 0% rather
/// than dividing by zero.
pub fn completion_percentage(
    lesson_completed: bool,
    problems_completed: i64,
    problem_count: i64,
) -> i32 {
    let total_parts = 1 + problem_count;
    if total_parts == 0 {
        return 0;
    }

    let completed_parts = i64::from(lesson_completed) + problems_completed.min(problem_count);
    (completed_parts * 100 / total_parts) as i32
}

/// Whether a unit with the given completion state is fully done.
pub fn is_unit_complete(lesson_completed: bool, problems_completed: i64, problem_count: i64) -> bool {
    completion_percentage(lesson_completed, problems_completed, problem_count) >= UNIT_COMPLETE_PCT
}
