use anyhow::Result;
use folio_shared::Content;

/// Loads the portfolio content the way `serve` does and reports what it found.
pub async fn check(config: folio::config::Config) -> Result<()> {
    let content = Content::load(&config.content.dir).await?;

    let categories = folio_shared::categories(&content.projects);
    let featured = content.projects.iter().filter(|p| p.featured).count();

    tracing::info!(
        owner = %content.portfolio.personal.name,
        projects = content.projects.len(),
        categories = categories.len() - 1,
        featured,
        "Portfolio content is valid"
    );

    if let Err(reason) = config.email.validate() {
        tracing::warn!(%reason, "Contact delivery is not configured, `serve` will refuse to start");
    }

    Ok(())
}
