use std::collections::HashSet;
use std::env;

use coursehub::mock::sample_course_requests;
use dotenvy::dotenv;
use reqwest::Client;
use serde::Deserialize;

fn is_dry_run() -> bool {
    !std::env::args().any(|a| a == "--apply")
}

fn summary_line(dry_run: bool, created: usize, total: usize, present: usize) -> String {
    if dry_run {
        format!(
            "[DRY RUN] Courses that would be created: {} / {} ({} already present)",
            created, total, present
        )
    } else {
        format!(
            "Courses created: {} / {} ({} already present)",
            created, total, present
        )
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    success: bool,
    data: Vec<CourseSummary>,
}

#[derive(Debug, Deserialize)]
struct CourseSummary {
    title: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let base_url = env::var("COURSEHUB_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:5000/api".to_string());
    let base_url = base_url.trim_end_matches('/');

    let client = Client::new();
    let existing = fetch_courses(&client, base_url).await?;
    let titles: HashSet<&str> = existing.iter().map(|c| c.title.as_str()).collect();

    let dry_run = is_dry_run();
    let samples = sample_course_requests();
    let mut created = 0;
    let mut present = 0;

    for course in &samples {
        if titles.contains(course.title.as_str()) {
            present += 1;
            continue;
        }

        if dry_run {
            println!("[DRY RUN] Would create course \"{}\"", course.title);
        } else {
            let id = create_course(&client, base_url, course).await?;
            println!("Created course \"{}\" -> {}", course.title, id);
        }

        created += 1;
    }

    println!("{}", summary_line(dry_run, created, samples.len(), present));

    Ok(())
}

async fn fetch_courses(
    client: &Client,
    base_url: &str,
) -> Result<Vec<CourseSummary>, Box<dyn std::error::Error>> {
    let res: ListResponse = client
        .get(format!("{}/courses", base_url))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if !res.success {
        return Err("course listing reported failure".into());
    }

    Ok(res.data)
}

async fn create_course(
    client: &Client,
    base_url: &str,
    course: &coursehub::models::NewCourseRequest,
) -> Result<String, Box<dyn std::error::Error>> {
    let body: serde_json::Value = client
        .post(format!("{}/courses", base_url))
        .json(course)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let id = body["data"]["id"]
        .as_str()
        .ok_or("created course has no id")?
        .to_string();

    Ok(id)
}
