use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::db::SqliteStore;
use crate::error::AppError;
use crate::mock::MemoryStore;
use crate::models::{Course, Enrollment, EnrollmentDetail};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Sqlite,
    Memory,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Sqlite => f.write_str("sqlite"),
            StoreKind::Memory => f.write_str("memory"),
        }
    }
}

/// Data access for the catalog and enrollments.
///
/// Implementations never check business rules beyond the storage-level
/// guarantee that at most one open enrollment exists per course/student pair;
/// [`insert_enrollment`](CourseStore::insert_enrollment) reports a breach as
/// [`AppError::Duplicate`].
#[async_trait]
pub trait CourseStore: Send + Sync {
    fn kind(&self) -> StoreKind;

    async fn ping(&self) -> Result<(), AppError>;

    /// Newest first.
    async fn list_courses(&self) -> Result<Vec<Course>, AppError>;
    async fn find_course(&self, id: &str) -> Result<Option<Course>, AppError>;
    async fn insert_course(&self, course: &Course) -> Result<(), AppError>;
    /// Returns `false` when no course has this id.
    async fn update_course(&self, course: &Course) -> Result<bool, AppError>;
    async fn delete_course(&self, id: &str) -> Result<bool, AppError>;

    async fn find_open_enrollment(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<Option<Enrollment>, AppError>;
    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), AppError>;
    /// Writes status, progress and `updated_at`. Returns `false` for an unknown id.
    async fn save_enrollment(&self, enrollment: &Enrollment) -> Result<bool, AppError>;
    /// Open enrollments joined with their course, newest first. Enrollments
    /// whose course no longer exists are skipped.
    async fn list_open_enrollments(&self, student_id: &str)
        -> Result<Vec<EnrollmentDetail>, AppError>;
    /// Every record for the pair, dropped ones included, oldest first.
    async fn list_enrollment_history(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<Vec<Enrollment>, AppError>;
}

/// Picks the store for this process. Without a usable `database_url` the
/// service runs on the seeded in-memory catalog; the two never share data.
pub async fn open_store(database_url: Option<&str>) -> Arc<dyn CourseStore> {
    let Some(url) = database_url else {
        warn!("DATABASE_URL not set; using in-memory mock store");
        return Arc::new(MemoryStore::seeded());
    };

    match SqliteStore::connect(url).await {
        Ok(store) => {
            info!("connected to {}", url);
            Arc::new(store)
        }
        Err(e) => {
            warn!("database connection failed ({}); using in-memory mock store", e);
            Arc::new(MemoryStore::seeded())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_url_selects_memory_store() {
        let store = open_store(None).await;
        assert_eq!(store.kind(), StoreKind::Memory);
        assert_eq!(store.list_courses().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn unreachable_database_falls_back_to_memory() {
        let store = open_store(Some("sqlite:///nonexistent-dir/coursehub/catalog.db")).await;
        assert_eq!(store.kind(), StoreKind::Memory);
    }

    #[tokio::test]
    async fn memory_url_selects_sqlite_store() {
        let store = open_store(Some("sqlite::memory:")).await;
        assert_eq!(store.kind(), StoreKind::Sqlite);
        assert!(store.ping().await.is_ok());
    }
}
