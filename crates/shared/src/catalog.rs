use serde::Deserialize;

use crate::Project;

/// Category name that disables filtering.
pub const ALL_CATEGORIES: &str = "all";
/// Projects shown before the visitor picks a category.
pub const INITIAL_COUNT: usize = 6;
/// Window after a category is picked, and the "load more" increment.
pub const PAGE_STEP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn is_all(&self) -> bool {
        self.name == ALL_CATEGORIES
    }
}

/// `all` first, then every distinct category in first-seen order.
pub fn categories(projects: &[Project]) -> Vec<CategoryCount> {
    let mut categories = vec![CategoryCount {
        name: ALL_CATEGORIES.to_owned(),
        count: projects.len(),
    }];

    for project in projects {
        match categories
            .iter_mut()
            .skip(1)
            .find(|c| c.name == project.category)
        {
            Some(category) => category.count += 1,
            None => categories.push(CategoryCount {
                name: project.category.to_owned(),
                count: 1,
            }),
        }
    }

    categories
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    pub category: Option<String>,
    pub count: Option<usize>,
}

impl ProjectQuery {
    /// Selected category, `None` meaning every project.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    pub fn selected(&self) -> &str {
        self.category().unwrap_or(ALL_CATEGORIES)
    }

    /// Whether the visitor picked a category, `all` included.
    fn picked(&self) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }

    fn window(&self) -> usize {
        match (self.count, self.picked()) {
            (Some(count), _) => count.max(1),
            (None, true) => PAGE_STEP,
            (None, false) => INITIAL_COUNT,
        }
    }
}

#[derive(Debug)]
pub struct ProjectPage<'a> {
    pub projects: Vec<&'a Project>,
    pub total: usize,
    pub shown: usize,
    pub has_more: bool,
    pub next_count: usize,
}

/// Filter by category, order featured first then newest, and cut the visible window.
pub fn query<'a>(projects: &'a [Project], query: &ProjectQuery) -> ProjectPage<'a> {
    let mut filtered = projects
        .iter()
        .filter(|p| query.category().is_none_or(|c| p.category == c))
        .collect::<Vec<_>>();

    filtered.sort_by(|a, b| b.featured.cmp(&a.featured).then(b.year.cmp(&a.year)));

    let total = filtered.len();
    let window = query.window().min(total);
    filtered.truncate(window);

    ProjectPage {
        projects: filtered,
        total,
        shown: window,
        has_more: total > window,
        next_count: (window + PAGE_STEP).min(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, category: &str, year: u16, featured: bool) -> Project {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": id,
            "description": "",
            "image": "",
            "category": category,
            "year": year,
            "featured": featured,
        }))
        .unwrap()
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let projects = vec![
            project("a", "web", 2023, false),
            project("b", "mobile", 2022, false),
            project("c", "web", 2021, false),
        ];

        let categories = categories(&projects);
        let names = categories.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["all", "web", "mobile"]);
        assert_eq!(categories[0].count, 3);
        assert_eq!(categories[1].count, 2);
        assert_eq!(categories[2].count, 1);
    }

    #[test]
    fn test_all_is_not_a_filter() {
        let query = ProjectQuery {
            category: Some("all".to_owned()),
            count: None,
        };
        assert_eq!(query.category(), None);
        assert_eq!(query.selected(), "all");
    }

    #[test]
    fn test_blank_category_keeps_initial_window() {
        let projects = (0..12)
            .map(|i| project(&format!("p{i}"), "web", 2000 + i, false))
            .collect::<Vec<_>>();

        let blank = ProjectQuery {
            category: Some("  ".to_owned()),
            count: None,
        };
        assert_eq!(query(&projects, &blank).shown, INITIAL_COUNT);

        let all = ProjectQuery {
            category: Some("all".to_owned()),
            count: None,
        };
        assert_eq!(query(&projects, &all).shown, PAGE_STEP);
    }
}
