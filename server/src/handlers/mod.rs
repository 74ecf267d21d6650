pub mod auth_handlers;
pub mod dashboard_handlers;
pub mod jwt;
pub mod users_handlers;

use admin_api_client::ApiError;
use tracing::warn;

use crate::error::AppError;
use crate::models::session::Session;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "admin_session";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const USERS_PATH: &str = "/dashboard/users";
pub const SUBSCRIPTION_PATH: &str = "/dashboard/subscription";

/// A 401 from the remote API ends the session, whichever page saw it.
pub(crate) fn session_expired(state: &AppState, session: &Session, fragment: bool) -> AppError {
    warn!(session = %session.id, user = %session.user.id, "access token rejected, signing out");
    state.forget_session(session.id);
    AppError::SessionExpired { fragment }
}

/// Fails only on a 401; other API failures are left for the page to report.
pub(crate) fn check_unauthorized(
    state: &AppState,
    session: &Session,
    error: Option<&ApiError>,
    fragment: bool,
) -> Result<(), AppError> {
    match error {
        Some(e) if e.is_unauthorized() => Err(session_expired(state, session, fragment)),
        _ => Ok(()),
    }
}
