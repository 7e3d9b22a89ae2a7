#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod config;
mod error;
pub mod extract;
pub mod handler;

use axum::Router;
use axum::extract::FromRef;
use planline_postgres::PgClient;
use tower_http::trace::TraceLayer;

pub use crate::config::HttpConfig;
pub use crate::error::{Error, ErrorKind, ErrorResponse, Result};

/// Shared application state available to all request handlers.
#[derive(Debug, Clone, FromRef)]
pub struct AppState {
    /// Database client backing all repository operations.
    pub database: PgClient,
}

impl AppState {
    /// Creates a new instance of [`AppState`].
    #[inline]
    pub fn new(database: PgClient) -> Self {
        Self { database }
    }
}

/// Builds the application [`Router`] with all routes and middleware.
pub fn router(state: AppState) -> Router {
    handler::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
