use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    assets::AssetsService,
    content::ContentState,
    session::ContactSessions,
    template::{NotFoundTemplate, Template},
};

mod contact;
mod health;
mod index;
mod projects;

#[derive(Clone)]
pub struct AppState {
    pub content: ContentState,
    pub contact: ContactSessions,
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.render_with_status(axum::http::StatusCode::NOT_FOUND, NotFoundTemplate)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(index::page))
        .route("/projects", get(projects::gallery))
        .route("/projects/{id}", get(projects::detail))
        .route("/contact", post(contact::action))
        .route("/contact/form", get(contact::form))
        .nest_service("/static", AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
