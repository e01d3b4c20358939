use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub(super) async fn my_enrollments(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EnrollmentDetail>>>, AppError> {
    let enrollments = state.enrollments().my_enrollments().await?;
    Ok(Json(ApiResponse::list(enrollments)))
}

pub(super) async fn enroll(
    State(state): State<AppState>,
    payload: Result<Json<EnrollRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<EnrollmentDetail>>), AppError> {
    let Json(req) = payload?;
    let course_id = req
        .course_id
        .ok_or_else(|| AppError::BadRequest("Course ID is required".to_string()))?;

    let enrollment = state.enrollments().enroll(&course_id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(enrollment))))
}

pub(super) async fn unenroll(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<ApiResponse<Empty>>, AppError> {
    state.enrollments().unenroll(&course_id).await?;
    Ok(Json(ApiResponse::ok(Empty::default())))
}

pub(super) async fn enrollment_status(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<ApiResponse<EnrollmentStatusView>>, AppError> {
    let status = state.enrollments().status(&course_id).await?;
    Ok(Json(ApiResponse::ok(status)))
}

pub(super) async fn enrollment_history(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Enrollment>>>, AppError> {
    let history = state.enrollments().history(&course_id).await?;
    Ok(Json(ApiResponse::list(history)))
}

pub(super) async fn update_progress(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    payload: Result<Json<UpdateProgressRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Enrollment>>, AppError> {
    let Json(req) = payload?;
    let progress = req.whole_progress()?;

    let enrollment = state
        .enrollments()
        .update_progress(&course_id, progress)
        .await?;
    Ok(Json(ApiResponse::ok(enrollment)))
}
