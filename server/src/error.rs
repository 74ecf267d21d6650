use admin_api_client::ApiError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tower_cookies::cookie::time::Duration;
use tower_cookies::Cookie;
use tracing::error;

use crate::handlers::{LOGIN_PATH, SESSION_COOKIE};

#[derive(Debug, Error)]
pub enum AppError {
    /// The remote API answered 401; the admin must sign in again.
    /// `fragment` is set for responses fetched by page script rather than navigated to.
    #[error("session expired")]
    SessionExpired { fragment: bool },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("session token error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// `Set-Cookie` value that removes the session cookie.
fn expired_cookie() -> HeaderValue {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .path("/")
        .max_age(Duration::ZERO)
        .build();
    HeaderValue::from_str(&cookie.to_string()).unwrap_or_else(|_| HeaderValue::from_static(""))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::SessionExpired { fragment: true } => (
                StatusCode::UNAUTHORIZED,
                [
                    (header::SET_COOKIE, expired_cookie()),
                    (header::HeaderName::from_static("x-redirect"), HeaderValue::from_static(LOGIN_PATH)),
                ],
            )
                .into_response(),
            AppError::SessionExpired { fragment: false } | AppError::Api(ApiError::Unauthorized) => {
                ([(header::SET_COOKIE, expired_cookie())], Redirect::to(LOGIN_PATH)).into_response()
            }
            other => {
                error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_cookie_names_the_session_cookie() {
        let value = expired_cookie();
        let value = value.to_str().unwrap();
        assert!(value.starts_with(&format!("{}=;", SESSION_COOKIE)));
        assert!(value.contains("Max-Age=0"));
        assert!(value.contains("Path=/"));
    }

    #[test]
    fn page_requests_are_redirected_to_login() {
        let response = AppError::SessionExpired { fragment: false }.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
    }

    #[test]
    fn fragment_requests_get_401_with_redirect_hint() {
        let response = AppError::SessionExpired { fragment: true }.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()["x-redirect"], LOGIN_PATH);
    }
}
