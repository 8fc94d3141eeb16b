#![allow(dead_code)]

use folio_shared::Project;
use serde_json::json;

pub fn portfolio_json() -> serde_json::Value {
    json!({
        "personal": {
            "name": "Ada Lovelace",
            "title": "Software Engineer",
            "subtitle": "Analytical engines and the web",
            "bio": "I build things.",
            "email": "ada@example.com",
            "location": "London",
            "phone": "+44 20 0000 0000"
        },
        "navigation": {
            "home": "Home",
            "about": "About",
            "skills": "Skills",
            "projects": "Projects",
            "contact": "Contact"
        },
        "sections": {
            "hero": {
                "greeting": "Hi, I'm",
                "cta": { "primary": "View my work", "secondary": "Get in touch" }
            },
            "about": {
                "title": "About me",
                "description": "A short story.",
                "skills": [
                    { "name": "Rust", "icon": "rust", "category": "backend", "color": "#dea584" }
                ]
            },
            "projects": { "title": "Projects", "subtitle": "Things I made" },
            "contact": {
                "title": "Contact",
                "subtitle": "Say hello",
                "form": { "name": "Name", "email": "Email", "message": "Message", "send": "Send" }
            }
        }
    })
}

pub fn project_json(id: &str, category: &str, year: u16, featured: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Project {id}"),
        "description": "A project",
        "image": "/static/images/placeholder.svg",
        "tags": ["rust", "axum", "askama", "sqlite"],
        "category": category,
        "status": "completed",
        "year": year,
        "featured": featured,
        "details": {
            "overview": "Overview",
            "features": ["Fast"],
            "technologies": { "backend": ["Rust"] },
            "links": { "github": "https://github.com/example/project" }
        }
    })
}

pub fn project(id: &str, category: &str, year: u16, featured: bool) -> Project {
    serde_json::from_value(project_json(id, category, year, featured)).unwrap()
}
