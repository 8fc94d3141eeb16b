use axum::{
    extract::{Path, Query},
    response::IntoResponse,
};
use folio_shared::{Content, Portfolio, Project, ProjectQuery};

use crate::template::Template;

pub struct CategoryView {
    pub label: String,
    pub count: usize,
    /// Query string selecting this category, shared by the page and the fragment.
    pub query: String,
    pub selected: bool,
}

/// Encoded `category=..&count=..` for gallery links.
fn gallery_query(category: &str, count: Option<usize>) -> String {
    let count = count.map(|count| count.to_string());
    let mut pairs = vec![("category", category)];
    if let Some(count) = count.as_deref() {
        pairs.push(("count", count));
    }

    serde_urlencoded::to_string(pairs).unwrap_or_default()
}

/// `web-app` becomes `Web App`.
fn category_label(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(askama::Template)]
#[template(path = "partials/projects.html")]
pub struct ProjectsTemplate<'a> {
    pub categories: Vec<CategoryView>,
    pub projects: Vec<&'a Project>,
    pub total: usize,
    pub shown: usize,
    pub has_more: bool,
    pub more_query: String,
}

impl<'a> ProjectsTemplate<'a> {
    pub fn new(content: &'a Content, query: &ProjectQuery) -> Self {
        let selected = query.selected();
        let categories = folio_shared::categories(&content.projects)
            .into_iter()
            .map(|category| CategoryView {
                label: if category.is_all() {
                    "All".to_owned()
                } else {
                    category_label(&category.name)
                },
                count: category.count,
                query: gallery_query(&category.name, None),
                selected: category.name == selected,
            })
            .collect();

        let page = folio_shared::query(&content.projects, query);

        Self {
            categories,
            more_query: gallery_query(selected, Some(page.next_count)),
            projects: page.projects,
            total: page.total,
            shown: page.shown,
            has_more: page.has_more,
        }
    }
}

#[derive(askama::Template)]
#[template(path = "project.html")]
pub struct ProjectTemplate<'a> {
    pub current_path: String,
    pub year: i32,
    pub portfolio: &'a Portfolio,
    pub project: &'a Project,
}

/// GET /projects - gallery fragment for the given category and window
pub async fn gallery(template: Template, Query(query): Query<ProjectQuery>) -> impl IntoResponse {
    let content = crate::try_page_response!(content: template);

    template.render(ProjectsTemplate::new(&content, &query))
}

pub async fn detail(template: Template, Path((id,)): Path<(String,)>) -> impl IntoResponse {
    let content = crate::try_page_response!(content: template);
    let project = crate::try_page_response!(opt: content.project(&id), template);

    template.render(ProjectTemplate {
        current_path: "projects".to_owned(),
        year: template.year,
        portfolio: &content.portfolio,
        project,
    })
}
