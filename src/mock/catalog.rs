use chrono::{DateTime, Utc};

use crate::models::{Category, Course, Level, NewCourseRequest};

struct SampleCourse {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    instructor: &'static str,
    duration: &'static str,
    category: Category,
    level: Level,
    price: f64,
    image_url: &'static str,
}

const SAMPLE_COURSES: [SampleCourse; 8] = [
    SampleCourse {
        id: "course1",
        title: "React.js Complete Guide",
        description: "Master React.js from basics to advanced concepts including hooks, context, and state management. Build real-world applications with modern React patterns.",
        instructor: "Sarah Johnson",
        duration: "8 weeks",
        category: Category::Programming,
        level: Level::Intermediate,
        price: 99.0,
        image_url: "https://images.unsplash.com/photo-1633356122544-f134324a6cee?auto=format&fit=crop&w=2070&q=80",
    },
    SampleCourse {
        id: "course2",
        title: "Node.js Backend Development",
        description: "Learn to build scalable backend applications with Node.js, Express, and MongoDB. Cover authentication, API design, and deployment strategies.",
        instructor: "Michael Chen",
        duration: "10 weeks",
        category: Category::Programming,
        level: Level::Advanced,
        price: 129.0,
        image_url: "https://images.unsplash.com/photo-1555066931-4365d14bab8c?auto=format&fit=crop&w=2070&q=80",
    },
    SampleCourse {
        id: "course3",
        title: "UI/UX Design Fundamentals",
        description: "Master the principles of user interface and user experience design. Learn to create intuitive, accessible, and beautiful digital products.",
        instructor: "Emily Rodriguez",
        duration: "6 weeks",
        category: Category::Design,
        level: Level::Beginner,
        price: 79.0,
        image_url: "https://images.unsplash.com/photo-1561070791-2526d30994b5?auto=format&fit=crop&w=2070&q=80",
    },
    SampleCourse {
        id: "course4",
        title: "Digital Marketing Strategy",
        description: "Develop comprehensive digital marketing strategies. Learn SEO, social media marketing, content creation, and analytics to grow your business.",
        instructor: "David Kim",
        duration: "7 weeks",
        category: Category::Marketing,
        level: Level::Intermediate,
        price: 89.0,
        image_url: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?auto=format&fit=crop&w=2070&q=80",
    },
    SampleCourse {
        id: "course5",
        title: "Python for Data Science",
        description: "Learn Python programming for data analysis, machine learning, and visualization. Work with pandas, numpy, matplotlib, and scikit-learn.",
        instructor: "Alex Thompson",
        duration: "9 weeks",
        category: Category::Programming,
        level: Level::Intermediate,
        price: 119.0,
        image_url: "https://images.unsplash.com/photo-1526379095098-d400fd0bf935?auto=format&fit=crop&w=2070&q=80",
    },
    SampleCourse {
        id: "course6",
        title: "Business Analytics",
        description: "Master business analytics tools and techniques. Learn to analyze data, create reports, and make data-driven business decisions.",
        instructor: "Lisa Wang",
        duration: "5 weeks",
        category: Category::Business,
        level: Level::Advanced,
        price: 149.0,
        image_url: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?auto=format&fit=crop&w=2070&q=80",
    },
    SampleCourse {
        id: "course7",
        title: "Web Development Bootcamp",
        description: "Complete web development course covering HTML, CSS, JavaScript, and modern frameworks. Build full-stack applications from scratch.",
        instructor: "James Wilson",
        duration: "12 weeks",
        category: Category::Programming,
        level: Level::Beginner,
        price: 199.0,
        image_url: "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?auto=format&fit=crop&w=2070&q=80",
    },
    SampleCourse {
        id: "course8",
        title: "Product Management",
        description: "Learn product management fundamentals, user research, product strategy, and agile methodologies to build successful products.",
        instructor: "Rachel Green",
        duration: "8 weeks",
        category: Category::Business,
        level: Level::Intermediate,
        price: 139.0,
        image_url: "https://images.unsplash.com/photo-1552664730-d307ca884978?auto=format&fit=crop&w=2070&q=80",
    },
];

/// The demo catalog with its fixed ids (`course1`..`course8`).
pub fn sample_catalog(now: DateTime<Utc>) -> Vec<Course> {
    SAMPLE_COURSES
        .iter()
        .map(|c| Course {
            id: c.id.to_string(),
            title: c.title.to_string(),
            description: c.description.to_string(),
            instructor: c.instructor.to_string(),
            duration: c.duration.to_string(),
            category: c.category,
            level: c.level,
            price: c.price,
            image_url: c.image_url.to_string(),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// The same catalog as create requests, for seeding a running server.
pub fn sample_course_requests() -> Vec<NewCourseRequest> {
    SAMPLE_COURSES
        .iter()
        .map(|c| NewCourseRequest {
            title: c.title.to_string(),
            description: c.description.to_string(),
            instructor: c.instructor.to_string(),
            duration: c.duration.to_string(),
            category: c.category,
            level: c.level,
            price: c.price,
            image_url: Some(c.image_url.to_string()),
        })
        .collect()
}
