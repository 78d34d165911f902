use serde_json::{json, Value};
use uuid::Uuid;

const STAMP: &str = "2024-01-01T00:00:00Z";

/// `created_at` grows with `age_rank` reversed: rank 0 is the newest row.
pub fn project_row(title: &str, tags: &[&str], age_rank: u32) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "title": title,
        "description": format!("{title} description"),
        "image_url": null,
        "tags": tags,
        "category": "Web",
        "date": "2024",
        "github_url": null,
        "live_url": null,
        "featured": false,
        "created_at": format!("2024-01-01T00:{:02}:00Z", 59 - age_rank.min(59)),
        "updated_at": STAMP,
    })
}

pub fn experience_row(title: &str, order_index: i32) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "title": title,
        "company": "Acme",
        "location": "Remote",
        "period": "2022 - Present",
        "type": "Full-time",
        "description": "Platform work",
        "achievements": [],
        "technologies": ["Rust"],
        "responsibilities": [],
        "order_index": order_index,
        "created_at": STAMP,
        "updated_at": STAMP,
    })
}

pub fn education_row(degree: &str, period: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "degree": degree,
        "school": "State University",
        "location": "Springfield",
        "period": period,
        "gpa": null,
        "achievements": [],
        "created_at": STAMP,
        "updated_at": STAMP,
    })
}

pub fn certification_row(name: &str, date: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "name": name,
        "issuer": "Cloud Vendor",
        "date": date,
        "credential_id": null,
        "created_at": STAMP,
        "updated_at": STAMP,
    })
}

pub fn skill_row(name: &str, category: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "name": name,
        "category": category,
        "level": "80",
        "created_at": STAMP,
        "updated_at": STAMP,
    })
}

pub fn personal_info_row(id: Uuid) -> Value {
    json!({
        "id": id,
        "full_name": "Jane Doe",
        "tagline": "Backend engineer",
        "description": "Builds reliable services",
        "profile_image_url": null,
        "resume_url": null,
        "github_url": "https://github.com/janedoe",
        "linkedin_url": null,
        "twitter_url": null,
        "email": "jane@example.com",
        "phone": null,
        "location": "Remote",
        "roles": ["Engineer", "Mentor"],
        "stats": [{"label": "Years", "value": "8"}],
        "services": [{"title": "APIs", "description": "Design", "technologies": ["Rust"]}],
        "created_at": STAMP,
        "updated_at": STAMP,
    })
}

pub fn contact_message_row(name: &str, created_at: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "name": name,
        "email": "sender@example.com",
        "subject": "Project inquiry",
        "message": "Would love to work together.",
        "created_at": created_at,
    })
}
