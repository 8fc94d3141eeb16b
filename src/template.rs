use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use folio_shared::Content;
use std::{convert::Infallible, sync::Arc};

use crate::content::ContentState;

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";
pub const NOT_FOUND: &str = "Not found";

pub struct Template {
    content: ContentState,
    pub year: i32,
}

impl Template {
    pub fn to_string<T: askama::Template>(&self, template: T) -> String {
        match template.render() {
            Ok(html) => html,
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");

                String::new()
            }
        }
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        self.render_with_status(StatusCode::OK, template)
    }

    pub fn render_with_status<T: askama::Template>(
        &self,
        status: StatusCode,
        template: T,
    ) -> Response {
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");

                let html = askama::Template::render(&ServerTemplate)
                    .unwrap_or_else(|_| SERVER_ERROR_MESSAGE.to_owned());

                (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response()
            }
        }
    }

    pub fn content(&self) -> Result<Arc<Content>, Arc<str>> {
        self.content.get()
    }
}

impl FromRequestParts<crate::routes::AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &crate::routes::AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Template {
            content: state.content.clone(),
            year: time::OffsetDateTime::now_utc().year(),
        })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate;

#[derive(askama::Template)]
#[template(path = "content-error.html")]
pub struct ContentErrorTemplate;

#[derive(askama::Template)]
#[template(path = "partials/toast-success.html")]
pub struct ToastSuccessTemplate<'a> {
    pub message: &'a str,
    pub description: Option<&'a str>,
}

#[derive(askama::Template)]
#[template(path = "partials/toast-error.html")]
pub struct ToastErrorTemplate<'a> {
    pub message: &'a str,
    pub description: Option<&'a str>,
}

#[macro_export]
macro_rules! try_page_response {
    // Site content, or the blocking content error page
    (content: $template:expr) => {
        match $template.content() {
            Ok(content) => content,
            Err(reason) => {
                tracing::warn!(%reason, "Serving content error page");

                return $template.render_with_status(
                    axum::http::StatusCode::SERVICE_UNAVAILABLE,
                    $crate::template::ContentErrorTemplate,
                );
            }
        }
    };

    (opt: $result:expr, $template:expr) => {
        match $result {
            Some(r) => r,
            None => {
                return $template.render_with_status(
                    axum::http::StatusCode::NOT_FOUND,
                    $crate::template::NotFoundTemplate,
                );
            }
        }
    };
}
