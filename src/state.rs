use std::sync::Arc;

use crate::repository::CourseStore;
use crate::services::{CourseService, EnrollmentService};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CourseStore>,
    pub student_id: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn CourseStore>, student_id: &str) -> Self {
        Self {
            store,
            student_id: Arc::from(student_id),
        }
    }

    pub fn courses(&self) -> CourseService {
        CourseService::new(self.store.clone())
    }

    pub fn enrollments(&self) -> EnrollmentService {
        EnrollmentService::new(self.store.clone(), self.student_id.to_string())
    }
}
