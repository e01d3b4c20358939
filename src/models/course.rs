use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?ixlib=rb-4.0.3&auto=format&fit=crop&w=2070&q=80";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Category {
    Programming,
    Design,
    Business,
    Marketing,
    Technology,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: String,
    pub category: Category,
    pub level: Level,
    pub price: f64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    #[validate(length(min = 1, max = 100, message = "Course title must be between 1 and 100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 500, message = "Course description must be between 1 and 500 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "Instructor name is required"))]
    pub instructor: String,
    #[validate(length(min = 1, message = "Course duration is required"))]
    pub duration: String,
    pub category: Category,
    pub level: Level,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewCourseRequest {
    /// Trims every free-text field before validation.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.instructor = self.instructor.trim().to_string();
        self.duration = self.duration.trim().to_string();
        self.image_url = self
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 100, message = "Course title must be between 1 and 100 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 500, message = "Course description must be between 1 and 500 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Instructor name is required"))]
    pub instructor: Option<String>,
    #[validate(length(min = 1, message = "Course duration is required"))]
    pub duration: Option<String>,
    pub category: Option<Category>,
    pub level: Option<Level>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

impl UpdateCourseRequest {
    pub fn normalized(mut self) -> Self {
        let trim = |s: Option<String>| s.map(|v| v.trim().to_string());
        self.title = trim(self.title);
        self.description = trim(self.description);
        self.instructor = trim(self.instructor);
        self.duration = trim(self.duration);
        self.image_url = trim(self.image_url);
        self
    }

    pub fn apply_to(self, course: &mut Course) {
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(description) = self.description {
            course.description = description;
        }
        if let Some(instructor) = self.instructor {
            course.instructor = instructor;
        }
        if let Some(duration) = self.duration {
            course.duration = duration;
        }
        if let Some(category) = self.category {
            course.category = category;
        }
        if let Some(level) = self.level {
            course.level = level;
        }
        if let Some(price) = self.price {
            course.price = price;
        }
        if let Some(image_url) = self.image_url {
            course.image_url = if image_url.is_empty() {
                DEFAULT_IMAGE_URL.to_string()
            } else {
                image_url
            };
        }
    }
}
