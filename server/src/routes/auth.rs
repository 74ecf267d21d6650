use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::auth_handlers::{login, login_page, logout};
use crate::state::AppState;

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .with_state(state)
}
