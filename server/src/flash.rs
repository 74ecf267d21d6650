//! One-shot notices carried across a redirect in the `admin_flash` cookie.

use serde::Serialize;
use tower_cookies::cookie::time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

pub const FLASH_COOKIE: &str = "admin_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    UserDeleted,
    DeleteFailed,
    DeletePending,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Notice {
    /// `success` or `error`
    pub kind: &'static str,
    pub message: &'static str,
}

impl Flash {
    fn code(self) -> &'static str {
        match self {
            Flash::UserDeleted => "user-deleted",
            Flash::DeleteFailed => "delete-failed",
            Flash::DeletePending => "delete-pending",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "user-deleted" => Some(Flash::UserDeleted),
            "delete-failed" => Some(Flash::DeleteFailed),
            "delete-pending" => Some(Flash::DeletePending),
            _ => None,
        }
    }

    pub fn notice(self) -> Notice {
        match self {
            Flash::UserDeleted => Notice::success("User deleted successfully"),
            Flash::DeleteFailed => Notice::error("Failed to delete user"),
            Flash::DeletePending => Notice::error("Delete already in progress"),
        }
    }
}

impl Notice {
    pub fn success(message: &'static str) -> Self {
        Notice { kind: "success", message }
    }

    pub fn error(message: &'static str) -> Self {
        Notice { kind: "error", message }
    }
}

pub fn set_flash(cookies: &Cookies, flash: Flash) {
    let cookie = Cookie::build((FLASH_COOKIE, flash.code()))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(60))
        .build();
    cookies.add(cookie);
}

/// Reads and clears the pending flash, if any.
pub fn take_flash(cookies: &Cookies) -> Option<Notice> {
    let flash = cookies
        .get(FLASH_COOKIE)
        .and_then(|cookie| Flash::from_code(cookie.value()))?;

    let mut expired = Cookie::from(FLASH_COOKIE);
    expired.set_path("/");
    cookies.remove(expired);

    Some(flash.notice())
}
