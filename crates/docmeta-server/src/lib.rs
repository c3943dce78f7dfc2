//! docmeta-server - web interface for docmeta.
//!
//! Serves the upload page, runs uploads through the document pipeline and
//! keeps finished records in memory until they are cleared.
//!
//! # Example
//!
//! ```ignore
//! use docmeta_core::{DocMetaConfig, DocumentProcessor};
//! use docmeta_server::{create_server, AppState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let processor = DocumentProcessor::with_defaults(DocMetaConfig::default(), None);
//!     let app = create_server(AppState::new(processor));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Multipart framing allowance on top of the file size limit.
const BODY_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config().upload.max_file_size_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(BODY_OVERHEAD_BYTES);

    routes::create_router(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
