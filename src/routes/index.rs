use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use folio_shared::{Portfolio, ProjectQuery};

use crate::{
    routes::{AppState, contact::ContactFormTemplate, projects::ProjectsTemplate},
    session::SESSION_COOKIE,
    template::Template,
};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub current_path: String,
    pub year: i32,
    pub portfolio: &'a Portfolio,
    pub projects: String,
    pub contact_form: String,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ProjectQuery>,
) -> impl IntoResponse {
    let content = crate::try_page_response!(content: template);
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| app.contact.get(cookie.value()));

    let projects = template.to_string(ProjectsTemplate::new(&content, &query));
    let contact_form = template.to_string(ContactFormTemplate::new(
        &template,
        &content.portfolio.sections.contact.form,
        session.as_ref(),
    ));

    template.render(IndexTemplate {
        current_path: "home".to_owned(),
        year: template.year,
        portfolio: &content.portfolio,
        projects,
        contact_form,
    })
}
