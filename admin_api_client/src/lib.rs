pub mod client;
pub mod error;

pub use client::{AdminApi, AdminGateway};
pub use error::ApiError;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Avatar {
    #[serde(default)]
    pub url: String,
}

/// A user record as returned by `GET /admin/users`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<Avatar>,
    #[serde(default)]
    pub last_post: Option<String>,
    #[serde(default)]
    pub total_posts: u64,
}

impl User {
    /// Avatar URL, if the remote has one on file.
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar
            .as_ref()
            .map(|a| a.url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Upper-cased first letter of every word of the display name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Server-derived position of a page within the full user list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub current_page: Option<u32>,
    pub total_pages: u32,
    pub total_users: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: None,
            total_pages: 1,
            total_users: 0,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct UsersPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl UsersPage {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoginUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<Avatar>,
}

/// Payload of a successful `POST /auth/login`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: LoginUser,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}
