pub mod auth;
pub mod dashboard;

use axum::{
    http::{header, HeaderValue, Method},
    response::Redirect,
    routing::get,
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::DASHBOARD_PATH;
use crate::state::AppState;
use auth::auth_routes;
use dashboard::dashboard_routes;

pub fn cors_layer(client_url: &str) -> Result<CorsLayer, header::InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(client_url.parse::<HeaderValue>()?)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::COOKIE])
        .allow_credentials(true))
}

pub fn build_router(state: AppState, cors: Option<CorsLayer>) -> Router {
    let app = Router::new()
        .route("/", get(|| async { Redirect::to(DASHBOARD_PATH) }))
        .route("/healthz", get(|| async { "ok" }))
        .merge(auth_routes(state.clone()))
        .merge(dashboard_routes(state))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(cors) => app.layer(cors),
        None => app,
    }
}
