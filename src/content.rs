use std::{path::Path, sync::Arc};

use folio_shared::Content;

/// Site content as seen by request handlers.
///
/// A content failure at startup does not stop the server, every page then
/// renders the blocking error page instead.
#[derive(Clone)]
pub enum ContentState {
    Ready(Arc<Content>),
    Unavailable(Arc<str>),
}

impl ContentState {
    pub async fn load(dir: impl AsRef<Path>) -> Self {
        match Content::load(dir).await {
            Ok(content) => Self::Ready(Arc::new(content)),
            Err(err) => {
                tracing::error!(error = %err, "Failed to load portfolio content");

                Self::Unavailable(err.to_string().into())
            }
        }
    }

    pub fn get(&self) -> Result<Arc<Content>, Arc<str>> {
        match self {
            Self::Ready(content) => Ok(content.clone()),
            Self::Unavailable(reason) => Err(reason.clone()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl From<Content> for ContentState {
    fn from(content: Content) -> Self {
        Self::Ready(Arc::new(content))
    }
}
