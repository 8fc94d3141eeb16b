pub mod assets;
pub mod config;
pub mod content;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod session;
pub mod template;

pub use routes::AppState;

use axum::Router;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

/// Application router with the full middleware stack
pub fn app(state: AppState) -> Router {
    routes::router(state)
        // no-cache for HTML, cache for static files
        .layer(axum::middleware::from_fn(
            middleware::cache_control_middleware,
        ))
        // Minify HTML responses before compression
        .layer(axum::middleware::map_response(
            middleware::minify_html_middleware,
        ))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http())
}
