use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub(super) async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Course>>>, AppError> {
    let courses = state.courses().list().await?;
    Ok(Json(ApiResponse::list(courses)))
}

pub(super) async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = state.courses().get(&id).await?;
    Ok(Json(ApiResponse::ok(course)))
}

pub(super) async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<NewCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), AppError> {
    let Json(req) = payload?;
    let course = state.courses().create(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(course))))
}

pub(super) async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let Json(req) = payload?;
    let course = state.courses().update(&id, req).await?;
    Ok(Json(ApiResponse::ok(course)))
}

pub(super) async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Empty>>, AppError> {
    state.courses().delete(&id).await?;
    Ok(Json(ApiResponse::ok(Empty::default())))
}
