mod common;

use axum::Router;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, get, memory_app, send, sqlite_app};

async fn enroll(app: &Router, course_id: &str) -> axum::http::Response<axum::body::Body> {
    send(
        app.clone(),
        Method::POST,
        "/api/enrollments",
        Some(json!({ "courseId": course_id })),
    )
    .await
}

async fn set_progress(app: &Router, course_id: &str, progress: i64) -> StatusCode {
    send(
        app.clone(),
        Method::PUT,
        &format!("/api/enrollments/{}/progress", course_id),
        Some(json!({ "progress": progress })),
    )
    .await
    .status()
}

async fn full_lifecycle(app: Router) {
    let response = enroll(&app, "course1").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["status"], "active");
    assert_eq!(created["data"]["progress"], 0);
    assert_eq!(created["data"]["courseId"], "course1");
    assert_eq!(created["data"]["studentId"], "chaitanya0205");
    assert_eq!(created["data"]["course"]["title"], "React.js Complete Guide");

    assert_eq!(set_progress(&app, "course1", 50).await, StatusCode::OK);

    let status = body_json(get(app.clone(), "/api/enrollments/status/course1").await).await;
    assert_eq!(status["data"]["isEnrolled"], true);
    assert_eq!(status["data"]["enrollment"]["progress"], 50);

    let mine = body_json(get(app.clone(), "/api/enrollments/me").await).await;
    assert_eq!(mine["count"], 1);
    assert_eq!(mine["data"][0]["course"]["id"], "course1");

    let response = send(app.clone(), Method::DELETE, "/api/enrollments/course1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!({}));

    let status = body_json(get(app.clone(), "/api/enrollments/status/course1").await).await;
    assert_eq!(status["data"]["isEnrolled"], false);
    assert!(status["data"]["enrollment"].is_null());

    let mine = body_json(get(app.clone(), "/api/enrollments/me").await).await;
    assert_eq!(mine["count"], 0);

    let history = body_json(get(app, "/api/enrollments/history/course1").await).await;
    assert_eq!(history["count"], 1);
    assert_eq!(history["data"][0]["status"], "dropped");
}

#[tokio::test]
async fn test_lifecycle_memory() {
    full_lifecycle(memory_app()).await;
}

#[tokio::test]
async fn test_lifecycle_sqlite() {
    full_lifecycle(sqlite_app().await).await;
}

#[tokio::test]
async fn test_enroll_twice_fails_with_duplicate() {
    let app = sqlite_app().await;
    assert_eq!(enroll(&app, "course2").await.status(), StatusCode::CREATED);

    let response = enroll(&app, "course2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "You are already enrolled in this course");
}

#[tokio::test]
async fn test_enroll_unknown_course_is_404() {
    for app in [memory_app(), sqlite_app().await] {
        let response = enroll(&app, "does-not-exist").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Course not found");
    }
}

#[tokio::test]
async fn test_enroll_without_course_id_is_400() {
    let response = send(memory_app(), Method::POST, "/api/enrollments", Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Course ID is required");
}

#[tokio::test]
async fn test_unenroll_when_not_enrolled_is_404() {
    let response = send(memory_app(), Method::DELETE, "/api/enrollments/course3", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Enrollment not found");
}

#[tokio::test]
async fn test_progress_range() {
    let app = memory_app();
    enroll(&app, "course4").await;

    assert_eq!(set_progress(&app, "course4", 0).await, StatusCode::OK);
    assert_eq!(set_progress(&app, "course4", 100).await, StatusCode::OK);
    assert_eq!(set_progress(&app, "course4", -1).await, StatusCode::BAD_REQUEST);
    assert_eq!(set_progress(&app, "course4", 101).await, StatusCode::BAD_REQUEST);

    let response = send(
        app.clone(),
        Method::PUT,
        "/api/enrollments/course4/progress",
        Some(json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // out-of-range is rejected even without an enrollment
    assert_eq!(set_progress(&app, "course5", 150).await, StatusCode::BAD_REQUEST);
    assert_eq!(set_progress(&app, "course5", 10).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_progress_accepts_whole_float() {
    let app = memory_app();
    enroll(&app, "course2").await;

    let response = send(
        app.clone(),
        Method::PUT,
        "/api/enrollments/course2/progress",
        Some(json!({ "progress": 50.0 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["progress"], 50);

    let response = send(
        app,
        Method::PUT,
        "/api/enrollments/course2/progress",
        Some(json!({ "progress": 50.5 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleted_course_drops_out_of_my_enrollments() {
    let app = sqlite_app().await;
    enroll(&app, "course6").await;
    enroll(&app, "course7").await;

    let response = send(app.clone(), Method::DELETE, "/api/courses/course6", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let mine = body_json(get(app, "/api/enrollments/me").await).await;
    assert_eq!(mine["count"], 1);
    assert_eq!(mine["data"][0]["courseId"], "course7");
}
