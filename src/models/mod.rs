pub mod course;
pub mod enrollment;
pub mod envelope;

pub use course::{Category, Course, Level, NewCourseRequest, UpdateCourseRequest, DEFAULT_IMAGE_URL};
pub use enrollment::{
    EnrollRequest, Enrollment, EnrollmentDetail, EnrollmentStatus, EnrollmentStatusView,
    UpdateProgressRequest,
};
pub use envelope::{ApiResponse, Empty};
