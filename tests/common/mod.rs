#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, Response, header},
};
use folio::{
    AppState,
    config::{Config, ContactConfig, ContentConfig, ObservabilityConfig, ServerConfig},
    content::ContentState,
    session::ContactSessions,
};
use folio_contact::{Delivery, DeliveryError, EmailConfig, EmailVariables};
use folio_shared::Content;
use http_body_util::BodyExt;
use serde_json::json;

pub const OWNER_EMAIL: &str = "owner@example.com";

pub struct FakeDelivery {
    fail: bool,
    delay: Duration,
    calls: AtomicUsize,
    received: Mutex<Vec<EmailVariables>>,
}

impl FakeDelivery {
    pub fn ok() -> Arc<Self> {
        Self::build(false, Duration::ZERO)
    }

    pub fn failing() -> Arc<Self> {
        Self::build(true, Duration::ZERO)
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Self::build(false, delay)
    }

    fn build(fail: bool, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            fail,
            delay,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<EmailVariables> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Delivery for FakeDelivery {
    async fn deliver(&self, variables: &EmailVariables) -> Result<(), DeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(variables.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail {
            return Err(DeliveryError::Network("connection refused".to_owned()));
        }

        Ok(())
    }
}

pub fn config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        content: ContentConfig::default(),
        email: EmailConfig::default(),
        contact: ContactConfig {
            owner_email: Some(OWNER_EMAIL.to_owned()),
            ..Default::default()
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn project_json(id: &str, category: &str, year: u16, featured: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Project {id}"),
        "description": format!("Description of {id}"),
        "image": "/static/images/aurora.svg",
        "tags": ["Rust", "Axum", "Askama", "SQLite"],
        "category": category,
        "status": "completed",
        "year": year,
        "featured": featured,
        "details": {
            "overview": format!("Overview of {id}"),
            "features": ["Fast"],
            "technologies": { "backend": ["Rust"] },
            "links": { "live": format!("https://{id}.example.com") }
        }
    })
}

pub fn content_with(projects: Vec<serde_json::Value>) -> ContentState {
    let portfolio = serde_json::from_value(json!({
        "personal": {
            "name": "Ada Lovelace",
            "title": "Software Engineer",
            "subtitle": "Analytical engines and the web",
            "bio": "I build things.",
            "email": "ada@example.com",
            "location": "London"
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
                    { "name": "Rust", "icon": "R", "category": "Backend", "color": "#dea584" }
                ]
            },
            "projects": { "title": "Projects", "subtitle": "Things I made" },
            "contact": {
                "title": "Contact",
                "subtitle": "Say hello",
                "form": { "name": "Name", "email": "Email", "message": "Message", "send": "Send" }
            }
        }
    }))
    .unwrap();

    let projects = projects
        .into_iter()
        .map(|project| serde_json::from_value(project).unwrap())
        .collect();

    Content::new(portfolio, projects).unwrap().into()
}

pub fn content() -> ContentState {
    content_with(vec![
        project_json("aurora", "web-app", 2024, true),
        project_json("ledger", "mobile", 2025, false),
        project_json("atlas", "ml", 2023, false),
    ])
}

pub fn app(content: ContentState, delivery: Arc<dyn Delivery>) -> Router {
    let config = config();
    let contact = ContactSessions::new(
        delivery,
        config.contact.settings(None),
        config.contact.session_ttl(),
    );

    folio::app(AppState {
        content,
        contact,
    })
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut request = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    request.body(Body::empty()).unwrap()
}

/// Contact post as sent by the page script, answered with the form fragment.
pub fn post_contact(name: &str, email: &str, message: &str, cookie: Option<&str>) -> Request<Body> {
    let mut request = plain_post_contact(name, email, message, cookie);
    request
        .headers_mut()
        .insert("x-requested-with", HeaderValue::from_static("fetch"));

    request
}

/// Contact post from a browser without scripts.
pub fn plain_post_contact(
    name: &str,
    email: &str,
    message: &str,
    cookie: Option<&str>,
) -> Request<Body> {
    let body = serde_urlencoded::to_string([("name", name), ("email", email), ("message", message)])
        .unwrap();

    let mut request = Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    request.body(Body::from(body)).unwrap()
}

/// `folio_session=<id>` from the response's `set-cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;

    value.split(';').next().map(str::to_owned)
}

pub async fn body(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    String::from_utf8(bytes.to_vec()).unwrap()
}
