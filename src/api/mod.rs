mod courses;
mod enrollments;

use std::any::Any;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router, extract::State};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::config::Config;
use crate::error::AppError;
use crate::models::ApiResponse;
use crate::repository::StoreKind;
use crate::state::AppState;

/// Routes mounted under `/api`, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(courses::list_courses).post(courses::create_course))
        .route(
            "/courses/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/enrollments", post(enrollments::enroll))
        .route("/enrollments/me", get(enrollments::my_enrollments))
        .route("/enrollments/status/{course_id}", get(enrollments::enrollment_status))
        .route("/enrollments/history/{course_id}", get(enrollments::enrollment_history))
        .route("/enrollments/{course_id}", delete(enrollments::unenroll))
        .route("/enrollments/{course_id}/progress", put(enrollments::update_progress))
        .method_not_allowed_fallback(route_not_found)
        .with_state(state)
}

/// The full application: `/api` routes, the index document, the JSON 404
/// fallback and the middleware stack.
pub fn app(state: AppState, config: &Config) -> Result<Router, AppError> {
    let cors = cors_layer(&config.cors_origins)?;

    Ok(Router::new()
        .route("/", get(index))
        .nest("/api", router(state))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Credentialed CORS needs explicit origins, so `*` is a config error.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, AppError> {
    let origins = origins
        .iter()
        .map(|o| {
            if o == "*" {
                return Err(AppError::Config(
                    "wildcard CORS origin is not allowed; list origins explicitly".to_string(),
                ));
            }
            HeaderValue::from_str(o)
                .map_err(|_| AppError::Config(format!("invalid CORS origin: {}", o)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true))
}

#[derive(Serialize)]
struct HealthResponse {
    success: bool,
    message: &'static str,
    timestamp: String,
    store: StoreKind,
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.store.ping().await?;
    Ok(Json(HealthResponse {
        success: true,
        message: "Server is running",
        timestamp: Utc::now().to_rfc3339(),
        store: state.store.kind(),
    }))
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "CourseHub API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "courses": "/api/courses",
            "enrollments": "/api/enrollments",
            "health": "/api/health"
        }
    }))
}

async fn route_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::failure("Route not found")))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("handler panicked: {}", detail);
    AppError::InternalServerError.into_response()
}
