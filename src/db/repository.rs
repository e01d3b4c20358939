use std::str::FromStr;

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::error::AppError;
use crate::models::{Course, Enrollment, EnrollmentDetail};
use crate::repository::{CourseStore, StoreKind};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const COURSE_COLUMNS: &str = "id, title, description, instructor, duration, category, level, price, image_url, created_at, updated_at";
const ENROLLMENT_COLUMNS: &str = "id, course_id, student_id, enrollment_date, status, progress, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteStore {
    db: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to `:memory:` opens a separate database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and brings its schema up to date.
    pub async fn from_pool(db: SqlitePool) -> Result<Self, AppError> {
        MIGRATOR.run(&db).await?;
        Ok(Self { db })
    }
}

fn detail_from_row(row: &SqliteRow) -> Result<EnrollmentDetail, sqlx::Error> {
    Ok(EnrollmentDetail {
        enrollment: Enrollment {
            id: row.try_get("e_id")?,
            course_id: row.try_get("e_course_id")?,
            student_id: row.try_get("e_student_id")?,
            enrollment_date: row.try_get("e_enrollment_date")?,
            status: row.try_get("e_status")?,
            progress: row.try_get("e_progress")?,
            created_at: row.try_get("e_created_at")?,
            updated_at: row.try_get("e_updated_at")?,
        },
        course: Course {
            id: row.try_get("c_id")?,
            title: row.try_get("c_title")?,
            description: row.try_get("c_description")?,
            instructor: row.try_get("c_instructor")?,
            duration: row.try_get("c_duration")?,
            category: row.try_get("c_category")?,
            level: row.try_get("c_level")?,
            price: row.try_get("c_price")?,
            image_url: row.try_get("c_image_url")?,
            created_at: row.try_get("c_created_at")?,
            updated_at: row.try_get("c_updated_at")?,
        },
    })
}

#[async_trait]
impl CourseStore for SqliteStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Sqlite
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(courses)
    }

    async fn find_course(&self, id: &str) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(course)
    }

    async fn insert_course(&self, course: &Course) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO courses (id, title, description, instructor, duration, category, level, price, image_url, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&course.id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.instructor)
        .bind(&course.duration)
        .bind(course.category)
        .bind(course.level)
        .bind(course.price)
        .bind(&course.image_url)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn update_course(&self, course: &Course) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE courses SET title = ?, description = ?, instructor = ?, duration = ?, category = ?, level = ?, price = ?, image_url = ?, updated_at = ? WHERE id = ?"
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.instructor)
        .bind(&course.duration)
        .bind(course.category)
        .bind(course.level)
        .bind(course.price)
        .bind(&course.image_url)
        .bind(course.updated_at)
        .bind(&course.id)
        .execute(&self.db)
        .await?
        .rows_affected();

        Ok(result > 0)
    }

    async fn delete_course(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?
            .rows_affected();

        Ok(result > 0)
    }

    async fn find_open_enrollment(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<Option<Enrollment>, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE course_id = ? AND student_id = ? AND status != 'dropped'"
        ))
        .bind(course_id)
        .bind(student_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(enrollment)
    }

    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO enrollments (id, course_id, student_id, enrollment_date, status, progress, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&enrollment.id)
        .bind(&enrollment.course_id)
        .bind(&enrollment.student_id)
        .bind(enrollment.enrollment_date)
        .bind(enrollment.status)
        .bind(enrollment.progress)
        .bind(enrollment.created_at)
        .bind(enrollment.updated_at)
        .execute(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::already_enrolled())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save_enrollment(&self, enrollment: &Enrollment) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE enrollments SET status = ?, progress = ?, updated_at = ? WHERE id = ?"
        )
        .bind(enrollment.status)
        .bind(enrollment.progress)
        .bind(enrollment.updated_at)
        .bind(&enrollment.id)
        .execute(&self.db)
        .await?
        .rows_affected();

        Ok(result > 0)
    }

    async fn list_open_enrollments(
        &self,
        student_id: &str,
    ) -> Result<Vec<EnrollmentDetail>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT
                e.id AS e_id,
                e.course_id AS e_course_id,
                e.student_id AS e_student_id,
                e.enrollment_date AS e_enrollment_date,
                e.status AS e_status,
                e.progress AS e_progress,
                e.created_at AS e_created_at,
                e.updated_at AS e_updated_at,
                c.id AS c_id,
                c.title AS c_title,
                c.description AS c_description,
                c.instructor AS c_instructor,
                c.duration AS c_duration,
                c.category AS c_category,
                c.level AS c_level,
                c.price AS c_price,
                c.image_url AS c_image_url,
                c.created_at AS c_created_at,
                c.updated_at AS c_updated_at
            FROM enrollments e
            INNER JOIN courses c ON c.id = e.course_id
            WHERE e.student_id = ?1 AND e.status != 'dropped'
            ORDER BY e.enrollment_date DESC, e.rowid DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;

        let details = rows
            .iter()
            .map(detail_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(details)
    }

    async fn list_enrollment_history(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<Vec<Enrollment>, AppError> {
        let history = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE course_id = ? AND student_id = ? ORDER BY enrollment_date ASC, rowid ASC"
        ))
        .bind(course_id)
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{Category, EnrollmentStatus, Level, DEFAULT_IMAGE_URL};

    async fn setup_test_db() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database")
    }

    fn course(id: &str, title: &str) -> Course {
        let now = Utc::now();
        Course {
            id: id.to_string(),
            title: title.to_string(),
            description: "A course".to_string(),
            instructor: "Instructor".to_string(),
            duration: "6 weeks".to_string(),
            category: Category::Design,
            level: Level::Advanced,
            price: 49.5,
            image_url: DEFAULT_IMAGE_URL.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_course() {
        let store = setup_test_db().await;
        let course = course("c1", "UI/UX Design");

        store.insert_course(&course).await.expect("Failed to insert course");

        let found = store
            .find_course("c1")
            .await
            .expect("Failed to fetch course")
            .expect("Course not found");
        assert_eq!(found.title, "UI/UX Design");
        assert_eq!(found.category, Category::Design);
        assert_eq!(found.level, Level::Advanced);
        assert_eq!(found.price, 49.5);

        assert!(store.find_course("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_course() {
        let store = setup_test_db().await;
        let mut course = course("c1", "Old title");
        store.insert_course(&course).await.unwrap();

        course.title = "New title".to_string();
        assert!(store.update_course(&course).await.unwrap());
        assert_eq!(store.find_course("c1").await.unwrap().unwrap().title, "New title");

        assert!(store.delete_course("c1").await.unwrap());
        assert!(!store.delete_course("c1").await.unwrap());
        assert!(!store.update_course(&course).await.unwrap());
    }

    #[tokio::test]
    async fn test_second_open_enrollment_is_rejected() {
        let store = setup_test_db().await;
        store.insert_course(&course("c1", "Course")).await.unwrap();

        let first = Enrollment::new("c1", "student");
        store.insert_enrollment(&first).await.expect("first insert");

        let second = Enrollment::new("c1", "student");
        let err = store.insert_enrollment(&second).await.unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_dropped_enrollment_is_kept_and_hidden() {
        let store = setup_test_db().await;
        store.insert_course(&course("c1", "Course")).await.unwrap();

        let mut enrollment = Enrollment::new("c1", "student");
        store.insert_enrollment(&enrollment).await.unwrap();
        assert_eq!(store.list_open_enrollments("student").await.unwrap().len(), 1);

        enrollment.drop_out();
        assert!(store.save_enrollment(&enrollment).await.unwrap());

        assert!(store.find_open_enrollment("c1", "student").await.unwrap().is_none());
        assert!(store.list_open_enrollments("student").await.unwrap().is_empty());

        let history = store.list_enrollment_history("c1", "student").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, EnrollmentStatus::Dropped);

        // a fresh record may follow a dropped one
        let again = Enrollment::new("c1", "student");
        store.insert_enrollment(&again).await.unwrap();
        assert_eq!(store.list_enrollment_history("c1", "student").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_open_enrollments_join_course_and_skip_deleted() {
        let store = setup_test_db().await;
        store.insert_course(&course("c1", "Kept")).await.unwrap();
        store.insert_course(&course("c2", "Deleted")).await.unwrap();

        let mut kept = Enrollment::new("c1", "student");
        kept.set_progress(40);
        store.insert_enrollment(&kept).await.unwrap();
        store.insert_enrollment(&Enrollment::new("c2", "student")).await.unwrap();
        store.insert_enrollment(&Enrollment::new("c1", "someone-else")).await.unwrap();

        store.delete_course("c2").await.unwrap();

        let details = store.list_open_enrollments("student").await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].course.title, "Kept");
        assert_eq!(details[0].enrollment.progress, 40);
    }
}
