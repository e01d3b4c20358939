#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use coursehub::api;
use coursehub::config::Config;
use coursehub::db::SqliteStore;
use coursehub::mock::{MemoryStore, sample_catalog};
use coursehub::repository::CourseStore;
use coursehub::state::AppState;

pub fn build_test_app(store: Arc<dyn CourseStore>) -> Router {
    let config = Config::default();
    let state = AppState::new(store, &config.student_id);
    api::app(state, &config).expect("Failed to build app")
}

pub fn memory_app() -> Router {
    build_test_app(Arc::new(MemoryStore::seeded()))
}

/// Fresh in-memory SQLite database seeded with the sample catalog.
pub async fn sqlite_app() -> Router {
    let store = SqliteStore::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    for course in sample_catalog(Utc::now()) {
        store
            .insert_course(&course)
            .await
            .expect("Failed to seed course");
    }
    build_test_app(Arc::new(store))
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}
