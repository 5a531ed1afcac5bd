//! Handlers for curriculum catalog resources: courses, units, lessons,
//! practice problems, and skills.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pathwise_core::error::CoreError;
use pathwise_core::types::DbId;
use pathwise_db::models::content::{
    CreateLesson, CreateProblem, Lesson, PracticeProblem, UnitContent,
};
use pathwise_db::models::course::{Course, CourseWithUnits, CreateCourse, CreateUnit, Unit};
use pathwise_db::models::skill::{CreateSkill, Skill};
use pathwise_db::repositories::{ContentRepo, CourseRepo, SkillRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A unit together with its content, for the unit detail endpoint.
#[derive(Debug, Serialize)]
pub struct UnitDetail {
    #[serde(flatten)]
    pub unit: Unit,
    #[serde(flatten)]
    pub content: UnitContent,
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// POST /api/v1/courses
pub async fn create_course(
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<DataResponse<Course>>)> {
    let course = CourseRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// GET /api/v1/courses
pub async fn list_courses(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Course>>>> {
    let courses = CourseRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/courses/{id} -- the course with its units in sequence order.
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CourseWithUnits>>> {
    let course = CourseRepo::find_with_units(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok(Json(DataResponse { data: course }))
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// POST /api/v1/units
///
/// Units must be appended at the course's tail (`max(order_index) + 1`);
/// anything else is rejected with 400.
pub async fn create_unit(
    State(state): State<AppState>,
    Json(input): Json<CreateUnit>,
) -> AppResult<(StatusCode, Json<DataResponse<Unit>>)> {
    let unit = CourseRepo::create_unit(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: unit })))
}

/// GET /api/v1/units/{id} -- the unit with its lesson and practice problems.
pub async fn get_unit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UnitDetail>>> {
    let unit = CourseRepo::find_unit_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Unit", id }))?;
    let content = ContentRepo::unit_content(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: UnitDetail { unit, content },
    }))
}

// ---------------------------------------------------------------------------
// Lessons
// ---------------------------------------------------------------------------

/// POST /api/v1/lessons
pub async fn create_lesson(
    State(state): State<AppState>,
    Json(input): Json<CreateLesson>,
) -> AppResult<(StatusCode, Json<DataResponse<Lesson>>)> {
    let lesson = ContentRepo::create_lesson(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: lesson })))
}

/// GET /api/v1/lessons/{id}
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Lesson>>> {
    let lesson = ContentRepo::find_lesson_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id,
        }))?;
    Ok(Json(DataResponse { data: lesson }))
}

// ---------------------------------------------------------------------------
// Practice problems
// ---------------------------------------------------------------------------

/// POST /api/v1/practice-problems
pub async fn create_problem(
    State(state): State<AppState>,
    Json(input): Json<CreateProblem>,
) -> AppResult<(StatusCode, Json<DataResponse<PracticeProblem>>)> {
    let problem = ContentRepo::create_problem(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: problem })))
}

/// GET /api/v1/practice-problems/{id}
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PracticeProblem>>> {
    let problem = ContentRepo::find_problem_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Practice problem",
            id,
        }))?;
    Ok(Json(DataResponse { data: problem }))
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// POST /api/v1/skills
pub async fn create_skill(
    State(state): State<AppState>,
    Json(input): Json<CreateSkill>,
) -> AppResult<(StatusCode, Json<DataResponse<Skill>>)> {
    let skill = SkillRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: skill })))
}

/// GET /api/v1/skills
pub async fn list_skills(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Skill>>>> {
    let skills = SkillRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: skills }))
}
