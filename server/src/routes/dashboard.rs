use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::handlers::dashboard_handlers::{overview, subscription};
use crate::handlers::users_handlers::{delete_user, user_rows, users_page};
use crate::middleware::auth_middleware::auth_middleware;
use crate::state::AppState;

/// Every route here sits behind the session gate.
pub fn dashboard_routes(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(overview))
        .route("/dashboard/users", get(users_page))
        .route("/dashboard/users/rows", get(user_rows))
        .route("/dashboard/users/{id}/delete", post(delete_user))
        .route("/dashboard/subscription", get(subscription))
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
