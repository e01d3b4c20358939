use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Course, NewCourseRequest, UpdateCourseRequest, DEFAULT_IMAGE_URL};
use crate::repository::CourseStore;

pub struct CourseService {
    store: Arc<dyn CourseStore>,
}

impl CourseService {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Course>, AppError> {
        self.store.list_courses().await
    }

    pub async fn get(&self, id: &str) -> Result<Course, AppError> {
        self.store
            .find_course(id)
            .await?
            .ok_or_else(AppError::course_not_found)
    }

    pub async fn create(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        let req = req.normalized();
        req.validate()?;

        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4().to_string(),
            title: req.title,
            description: req.description,
            instructor: req.instructor,
            duration: req.duration,
            category: req.category,
            level: req.level,
            price: req.price,
            image_url: req.image_url.unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            created_at: now,
            updated_at: now,
        };

        self.store.insert_course(&course).await?;
        info!("created course {} ({})", course.id, course.title);
        Ok(course)
    }

    pub async fn update(&self, id: &str, req: UpdateCourseRequest) -> Result<Course, AppError> {
        let req = req.normalized();
        req.validate()?;

        let mut course = self.get(id).await?;
        req.apply_to(&mut course);
        course.updated_at = Utc::now();

        if !self.store.update_course(&course).await? {
            return Err(AppError::course_not_found());
        }
        Ok(course)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if self.store.delete_course(id).await? {
            info!("deleted course {}", id);
            Ok(())
        } else {
            Err(AppError::course_not_found())
        }
    }
}
