//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod members;
mod projects;
pub mod request;
pub mod response;
mod stages;

use axum::Router;
use axum::response::IntoResponse;

use crate::AppState;
use crate::error::ErrorKind;

#[inline]
async fn fallback() -> axum::response::Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(projects::routes())
        .merge(stages::routes())
        .merge(members::routes())
        .fallback(fallback)
}
