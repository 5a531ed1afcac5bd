//! Handlers for the authenticated user's progress: completions, unit
//! percentages, the course cursor, and skill levels.

use axum::extract::{Path, State};
use axum::Json;
use pathwise_core::sequencer;
use pathwise_core::types::DbId;
use pathwise_db::models::completion::{
    UserCompletions, UserLessonCompletion, UserProblemCompletion,
};
use pathwise_db::models::progress::{ProgressSnapshot, UnitProgress};
use pathwise_db::models::skill::UserSkillLevel;
use pathwise_db::repositories::{ProgressionRepo, SkillLedgerRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for a recorded lesson completion.
#[derive(Debug, Serialize)]
pub struct LessonCompletionResponse {
    pub completion: UserLessonCompletion,
    pub progress: ProgressSnapshot,
}

/// Response body for a recorded practice-problem completion.
#[derive(Debug, Serialize)]
pub struct ProblemCompletionResponse {
    pub completion: UserProblemCompletion,
    pub progress: ProgressSnapshot,
}

/// The user's position within one course.
#[derive(Debug, Serialize)]
pub struct CoursePosition {
    pub course_id: DbId,
    /// 1 when the user has not completed anything in the course yet.
    pub current_order: i32,
}

/// POST /api/v1/me/lessons/{lesson_id}/complete
///
/// Records the completion, applies the lesson's skill gains, and advances
/// the course cursor when the unit reaches 100%.
pub async fn complete_lesson(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lesson_id): Path<DbId>,
) -> AppResult<Json<DataResponse<LessonCompletionResponse>>> {
    let (completion, progress) =
        ProgressionRepo::complete_lesson(&state.pool, user.user_id, lesson_id).await?;
    Ok(Json(DataResponse {
        data: LessonCompletionResponse {
            completion,
            progress,
        },
    }))
}

/// POST /api/v1/me/practice-problems/{problem_id}/complete
pub async fn complete_problem(
    State(state): State<AppState>,
    user: AuthUser,
    Path(problem_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProblemCompletionResponse>>> {
    let (completion, progress) =
        ProgressionRepo::complete_problem(&state.pool, user.user_id, problem_id).await?;
    Ok(Json(DataResponse {
        data: ProblemCompletionResponse {
            completion,
            progress,
        },
    }))
}

/// GET /api/v1/me/units -- progress for every unit the user has touched.
pub async fn my_units(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UnitProgress>>>> {
    let units = ProgressionRepo::started_units(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: units }))
}

/// GET /api/v1/me/units/{unit_id}/progress
pub async fn unit_progress(
    State(state): State<AppState>,
    user: AuthUser,
    Path(unit_id): Path<DbId>,
) -> AppResult<Json<DataResponse<UnitProgress>>> {
    let progress = ProgressionRepo::unit_progress(&state.pool, user.user_id, unit_id).await?;
    Ok(Json(DataResponse { data: progress }))
}

/// GET /api/v1/me/courses/{course_id}/progress
///
/// Returns the user's cursor position; a user with no stored row sits at
/// the first unit.
pub async fn course_position(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CoursePosition>>> {
    let row = ProgressionRepo::course_progress(&state.pool, user.user_id, course_id).await?;
    let current_order = sequencer::effective_order(row.map(|r| r.current_order));
    Ok(Json(DataResponse {
        data: CoursePosition {
            course_id,
            current_order,
        },
    }))
}

/// GET /api/v1/me/completions -- everything the user has completed.
pub async fn my_completions(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UserCompletions>>> {
    let completions = ProgressionRepo::completions(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: completions }))
}

/// GET /api/v1/me/skills -- the user's skill ledger with names and levels.
pub async fn my_skills(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UserSkillLevel>>>> {
    let levels = SkillLedgerRepo::user_levels(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: levels }))
}
