use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Course;
use crate::error::AppError;

pub const MIN_PROGRESS: i64 = 0;
pub const MAX_PROGRESS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    /// Anything but `Dropped` counts toward the one-per-pair limit.
    pub fn is_open(self) -> bool {
        !matches!(self, EnrollmentStatus::Dropped)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(course_id: &str, student_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            student_id: student_id.to_string(),
            enrollment_date: now,
            status: EnrollmentStatus::Active,
            progress: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn drop_out(&mut self) {
        self.status = EnrollmentStatus::Dropped;
        self.updated_at = Utc::now();
    }

    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(MAX_PROGRESS as u8);
        self.updated_at = Utc::now();
    }
}

/// An enrollment joined with the course it refers to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub course: Course,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStatusView {
    pub is_enrolled: bool,
    pub enrollment: Option<Enrollment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    #[serde(default)]
    pub course_id: Option<String>,
}

/// JSON numbers arrive as floats, so `50.0` is as good as `50`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProgressRequest {
    #[serde(default)]
    pub progress: Option<f64>,
}

impl UpdateProgressRequest {
    /// The requested progress as an integer. Range is checked by the service.
    pub fn whole_progress(&self) -> Result<i64, AppError> {
        let value = self
            .progress
            .ok_or_else(|| AppError::BadRequest("Progress is required".to_string()))?;
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(AppError::BadRequest(
                "Progress must be a whole number".to_string(),
            ));
        }
        Ok(value as i64)
    }
}
