use axum::{
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue,
    },
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/generate-meme",
            post(handlers::generate_meme).options(handlers::preflight),
        )
        .route(
            "/api/memes",
            get(handlers::recent_memes).options(handlers::preflight),
        )
        .route(
            "/api/memes/:id",
            get(handlers::get_meme).options(handlers::preflight),
        )
        .route(
            "/api/memes/:id/events",
            post(handlers::record_event).options(handlers::preflight),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        // CorsLayer only lists allowed headers on preflights; advertise them everywhere.
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .with_state(Arc::new(state))
}

pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    tracing::info!("🌐 Listening on {}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await
}

pub mod prelude {
    pub use mg_core::{Error, MemeRecord, Result};
    pub use crate::{create_app, AppState};
}
