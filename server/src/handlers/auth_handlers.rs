use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use tower_cookies::cookie::{time::Duration, SameSite};
use tower_cookies::{Cookie, Cookies};
use tracing::{info, warn};

use super::jwt::issue_session_token;
use super::{DASHBOARD_PATH, LOGIN_PATH, SESSION_COOKIE};
use crate::error::AppError;
use crate::middleware::auth_middleware::{clear_session_cookie, resolve_session};
use crate::models::session::Session;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const MISSING_CREDENTIALS: &str = "Email and password are required";

#[derive(Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn login_form(
    state: &AppState,
    status: StatusCode,
    email: &str,
    error: Option<&str>,
) -> Result<Response, AppError> {
    let page = state
        .views
        .render("login.html", json!({ "email": email, "error": error }))?;
    Ok((status, page).into_response())
}

pub async fn login_page(State(state): State<AppState>, cookies: Cookies) -> Result<Response, AppError> {
    if resolve_session(&state, &cookies).is_some() {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }
    login_form(&state, StatusCode::OK, "", None)
}

pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(payload): Form<LoginPayload>,
) -> Result<Response, AppError> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return login_form(&state, StatusCode::BAD_REQUEST, email, Some(MISSING_CREDENTIALS));
    }

    let data = match state.api.login(email, &payload.password).await {
        Ok(Some(data)) => data,
        Ok(None) => {
            info!(email, "login rejected");
            return login_form(&state, StatusCode::UNAUTHORIZED, email, Some(INVALID_CREDENTIALS));
        }
        Err(e) => {
            warn!(email, error = %e, "login request failed");
            return login_form(&state, StatusCode::UNAUTHORIZED, email, Some(INVALID_CREDENTIALS));
        }
    };

    let session = Session::from_login(data);
    let token = issue_session_token(&session, &state.session_secret, state.session_ttl)?;
    let max_age = i64::try_from(state.session_ttl.as_secs()).unwrap_or(i64::MAX);

    cookies.add(
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(max_age))
            .build(),
    );

    info!(session = %session.id, user = %session.user.id, role = %session.user.role, "admin signed in");
    Ok(Redirect::to(DASHBOARD_PATH).into_response())
}

pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    if let Some(session) = resolve_session(&state, &cookies) {
        state.forget_session(session.id);
        info!(session = %session.id, "admin signed out");
    }
    clear_session_cookie(&cookies);
    Redirect::to(LOGIN_PATH)
}
