//! Route modules for the Lector server

pub mod extract;
pub mod health;
pub mod pdfs;

use axum::Router;

use crate::state::AppState;

/// Assemble the full route surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(extract::router())
        .merge(health::router())
        .merge(pdfs::router())
}
