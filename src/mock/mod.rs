//! In-memory mock store, used when no database is configured or reachable.

pub mod catalog;

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{Course, Enrollment, EnrollmentDetail};
use crate::repository::{CourseStore, StoreKind};

pub use catalog::{sample_catalog, sample_course_requests};

#[derive(Default)]
struct Tables {
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
}

/// Each instance owns its own data; nothing is shared between instances.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courses(courses: Vec<Course>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                courses,
                enrollments: Vec::new(),
            }),
        }
    }

    pub fn seeded() -> Self {
        Self::with_courses(sample_catalog(Utc::now()))
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        let tables = self.tables.read().await;
        let mut courses: Vec<Course> = tables.courses.iter().rev().cloned().collect();
        courses.sort_by_key(|c| Reverse(c.created_at));
        Ok(courses)
    }

    async fn find_course(&self, id: &str) -> Result<Option<Course>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_course(&self, course: &Course) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.courses.push(course.clone());
        Ok(())
    }

    async fn update_course(&self, course: &Course) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.courses.iter_mut().find(|c| c.id == course.id) {
            Some(existing) => {
                *existing = course.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_course(&self, id: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);
        Ok(tables.courses.len() < before)
    }

    async fn find_open_enrollment(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<Option<Enrollment>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .iter()
            .find(|e| e.course_id == course_id && e.student_id == student_id && e.is_open())
            .cloned())
    }

    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let taken = enrollment.is_open()
            && tables.enrollments.iter().any(|e| {
                e.course_id == enrollment.course_id
                    && e.student_id == enrollment.student_id
                    && e.is_open()
            });
        if taken {
            return Err(AppError::already_enrolled());
        }
        tables.enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn save_enrollment(&self, enrollment: &Enrollment) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.enrollments.iter_mut().find(|e| e.id == enrollment.id) {
            Some(existing) => {
                existing.status = enrollment.status;
                existing.progress = enrollment.progress;
                existing.updated_at = enrollment.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_open_enrollments(
        &self,
        student_id: &str,
    ) -> Result<Vec<EnrollmentDetail>, AppError> {
        let tables = self.tables.read().await;
        let mut details: Vec<EnrollmentDetail> = tables
            .enrollments
            .iter()
            .rev()
            .filter(|e| e.student_id == student_id && e.is_open())
            .filter_map(|e| {
                tables
                    .courses
                    .iter()
                    .find(|c| c.id == e.course_id)
                    .map(|course| EnrollmentDetail {
                        enrollment: e.clone(),
                        course: course.clone(),
                    })
            })
            .collect();
        details.sort_by_key(|d| Reverse(d.enrollment.enrollment_date));
        Ok(details)
    }

    async fn list_enrollment_history(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<Vec<Enrollment>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id && e.student_id == student_id)
            .cloned()
            .collect())
    }
}
