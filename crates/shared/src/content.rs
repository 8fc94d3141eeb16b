use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use serde::{Deserialize, de::DeserializeOwned};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::{ContentError, Result};

pub const PORTFOLIO_FILE: &str = "portfolio.json";
pub const PROJECTS_FILE: &str = "projects.json";

#[derive(Debug, Clone, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub bio: String,
    pub email: String,
    pub location: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Navigation {
    pub home: String,
    pub about: String,
    pub skills: String,
    pub projects: String,
    pub contact: String,
}

pub struct NavItem<'a> {
    pub anchor: &'static str,
    pub label: &'a str,
}

impl Navigation {
    /// Section anchors in page order, paired with their labels.
    pub fn items(&self) -> Vec<NavItem<'_>> {
        vec![
            NavItem {
                anchor: "home",
                label: &self.home,
            },
            NavItem {
                anchor: "about",
                label: &self.about,
            },
            NavItem {
                anchor: "skills",
                label: &self.skills,
            },
            NavItem {
                anchor: "projects",
                label: &self.projects,
            },
            NavItem {
                anchor: "contact",
                label: &self.contact,
            },
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallToAction {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeroSection {
    pub greeting: String,
    pub cta: CallToAction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: String,
    pub category: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AboutSection {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsSection {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactLabels {
    pub name: String,
    pub email: String,
    pub message: String,
    pub send: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactSection {
    pub title: String,
    pub subtitle: String,
    pub form: ContactLabels,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sections {
    pub hero: HeroSection,
    pub about: AboutSection,
    pub projects: ProjectsSection,
    pub contact: ContactSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Portfolio {
    pub personal: PersonalInfo,
    pub navigation: Navigation,
    pub sections: Sections,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Completed,
    InProgress,
    Planning,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Completed => "Completed",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Planning => "Planning",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectLinks {
    pub live: Option<String>,
    pub github: Option<String>,
    pub demo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectTechnologies {
    #[serde(default)]
    pub frontend: Vec<String>,
    #[serde(default)]
    pub backend: Vec<String>,
    #[serde(default)]
    pub database: Vec<String>,
    #[serde(default)]
    pub deployment: Vec<String>,
    #[serde(default)]
    pub apis: Vec<String>,
    #[serde(default)]
    pub ml: Vec<String>,
}

impl ProjectTechnologies {
    /// Non-empty technology groups with their display label.
    pub fn groups(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Frontend", &self.frontend),
            ("Backend", &self.backend),
            ("Database", &self.database),
            ("Deployment", &self.deployment),
            ("APIs", &self.apis),
            ("ML", &self.ml),
        ]
        .into_iter()
        .filter(|(_, techs)| !techs.is_empty())
        .map(|(label, techs)| (label, techs.as_slice()))
        .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDetails {
    pub overview: String,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub solutions: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub technologies: ProjectTechnologies,
    #[serde(default)]
    pub links: ProjectLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub year: u16,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub details: ProjectDetails,
}

impl Project {
    /// Tags shown on gallery cards.
    pub fn card_tags(&self) -> &[String] {
        &self.tags[..self.tags.len().min(3)]
    }
}

#[derive(Deserialize)]
struct ProjectsFile {
    projects: Vec<Project>,
}

/// Static site content, loaded once when the server starts and only read afterwards.
#[derive(Debug, Clone)]
pub struct Content {
    pub portfolio: Portfolio,
    pub projects: Vec<Project>,
}

impl Content {
    pub fn new(portfolio: Portfolio, projects: Vec<Project>) -> Result<Self> {
        let mut ids = HashSet::new();
        for project in projects.iter() {
            if !ids.insert(project.id.as_str()) {
                return Err(ContentError::DuplicateProject(project.id.to_owned()));
            }
        }

        Ok(Self {
            portfolio,
            projects,
        })
    }

    /// Load `portfolio.json` and `projects.json` from `dir`.
    pub async fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let portfolio: Portfolio = read_json(dir.join(PORTFOLIO_FILE)).await?;
        let projects: ProjectsFile = read_json(dir.join(PROJECTS_FILE)).await?;

        let content = Self::new(portfolio, projects.projects)?;

        tracing::info!(
            dir = %dir.display(),
            projects = content.projects.len(),
            "Portfolio content loaded"
        );

        Ok(content)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

async fn read_json<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(source) => return Err(ContentError::Read { path, source }),
    };

    serde_json::from_slice(&bytes).map_err(|source| ContentError::Parse { path, source })
}
