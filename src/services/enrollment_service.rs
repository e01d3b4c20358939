use std::sync::Arc;

use tracing::info;

use crate::error::AppError;
use crate::models::enrollment::{MAX_PROGRESS, MIN_PROGRESS};
use crate::models::{Enrollment, EnrollmentDetail, EnrollmentStatusView};
use crate::repository::CourseStore;

/// Enrollment rules for a single student.
///
/// Every operation is a plain check-then-write against the store. Two
/// concurrent enrolls for the same course can both pass the duplicate check;
/// only the store's own uniqueness guarantee (if any) stops the second write.
pub struct EnrollmentService {
    store: Arc<dyn CourseStore>,
    student_id: String,
}

impl EnrollmentService {
    pub fn new(store: Arc<dyn CourseStore>, student_id: impl Into<String>) -> Self {
        Self {
            store,
            student_id: student_id.into(),
        }
    }

    pub async fn enroll(&self, course_id: &str) -> Result<EnrollmentDetail, AppError> {
        let course_id = course_id.trim();
        if course_id.is_empty() {
            return Err(AppError::BadRequest("Course ID is required".to_string()));
        }

        let course = self
            .store
            .find_course(course_id)
            .await?
            .ok_or_else(AppError::course_not_found)?;

        if self
            .store
            .find_open_enrollment(course_id, &self.student_id)
            .await?
            .is_some()
        {
            return Err(AppError::already_enrolled());
        }

        let enrollment = Enrollment::new(course_id, &self.student_id);
        self.store.insert_enrollment(&enrollment).await?;
        info!("{} enrolled in {}", self.student_id, course_id);

        Ok(EnrollmentDetail { enrollment, course })
    }

    /// Marks the open enrollment dropped. The record itself is kept.
    pub async fn unenroll(&self, course_id: &str) -> Result<Enrollment, AppError> {
        let mut enrollment = self.open_enrollment(course_id).await?;
        enrollment.drop_out();
        self.persist(&enrollment).await?;
        info!("{} dropped {}", self.student_id, course_id);
        Ok(enrollment)
    }

    pub async fn status(&self, course_id: &str) -> Result<EnrollmentStatusView, AppError> {
        let enrollment = self
            .store
            .find_open_enrollment(course_id, &self.student_id)
            .await?;
        Ok(EnrollmentStatusView {
            is_enrolled: enrollment.is_some(),
            enrollment,
        })
    }

    pub async fn update_progress(
        &self,
        course_id: &str,
        progress: i64,
    ) -> Result<Enrollment, AppError> {
        if !(MIN_PROGRESS..=MAX_PROGRESS).contains(&progress) {
            return Err(AppError::BadRequest(
                "Progress must be between 0 and 100".to_string(),
            ));
        }

        let mut enrollment = self.open_enrollment(course_id).await?;
        enrollment.set_progress(progress as u8);
        self.persist(&enrollment).await?;
        info!(
            "{} progress on {} set to {}",
            self.student_id, course_id, enrollment.progress
        );
        Ok(enrollment)
    }

    pub async fn my_enrollments(&self) -> Result<Vec<EnrollmentDetail>, AppError> {
        self.store.list_open_enrollments(&self.student_id).await
    }

    /// All records for the course, dropped ones included.
    pub async fn history(&self, course_id: &str) -> Result<Vec<Enrollment>, AppError> {
        self.store
            .list_enrollment_history(course_id, &self.student_id)
            .await
    }

    async fn open_enrollment(&self, course_id: &str) -> Result<Enrollment, AppError> {
        self.store
            .find_open_enrollment(course_id, &self.student_id)
            .await?
            .ok_or_else(AppError::enrollment_not_found)
    }

    async fn persist(&self, enrollment: &Enrollment) -> Result<(), AppError> {
        if self.store.save_enrollment(enrollment).await? {
            Ok(())
        } else {
            Err(AppError::enrollment_not_found())
        }
    }
}
