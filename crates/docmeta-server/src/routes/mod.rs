//! Route definitions for the web interface.

mod documents;
mod formats;
mod health;
mod ui;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Upload page
        .route("/", get(ui::index))
        // Health check
        .route("/health", get(health::health_check))
        .route("/formats", get(formats::supported_formats))
        // Documents
        .route("/documents", post(documents::upload_document))
        .route(
            "/documents/:id",
            get(documents::get_document).delete(documents::delete_document),
        )
        .route("/documents/:id/export", get(documents::export_document))
        // Attach state
        .with_state(state)
}

pub use documents::*;
pub use formats::*;
pub use health::*;
pub use ui::*;
