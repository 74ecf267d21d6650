use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use jsonwebtoken::errors::ErrorKind;
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

use crate::handlers::jwt::verify_session_token;
use crate::handlers::{LOGIN_PATH, SESSION_COOKIE};
use crate::models::session::Session;
use crate::state::AppState;

/// Reads the session from its cookie. A cookie that fails verification is removed.
pub fn resolve_session(state: &AppState, cookies: &Cookies) -> Option<Session> {
    let cookie = cookies.get(SESSION_COOKIE)?;

    match verify_session_token(cookie.value(), &state.session_secret) {
        Ok(session) => Some(session),
        Err(e) => {
            let reason = match *e.kind() {
                ErrorKind::ExpiredSignature => "expired",
                _ => "invalid",
            };
            debug!(reason, "discarding session cookie");
            clear_session_cookie(cookies);
            None
        }
    }
}

pub fn clear_session_cookie(cookies: &Cookies) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookies.remove(cookie);
}

/// Gate for dashboard routes: no session, no content.
pub async fn auth_middleware(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(session) = resolve_session(&state, &cookies) else {
        debug!(path = %req.uri().path(), "unauthenticated request redirected to login");
        return Redirect::to(LOGIN_PATH).into_response();
    };

    req.extensions_mut().insert(session);
    next.run(req).await
}
