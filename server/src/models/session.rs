use admin_api_client::LoginData;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity claims shown in the dashboard chrome.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
}

/// An authenticated admin, as carried in the signed session cookie.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Generated per login; scopes the query cache.
    pub id: Uuid,
    pub user: SessionUser,
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn from_login(data: LoginData) -> Self {
        let avatar = data
            .user
            .avatar
            .map(|a| a.url)
            .unwrap_or_default();

        Session {
            id: Uuid::new_v4(),
            user: SessionUser {
                id: data.id,
                name: data.user.name,
                email: data.user.email,
                role: data.role,
                avatar,
            },
            access_token: data.access_token,
            refresh_token: data.refresh_token,
        }
    }

    /// Token to present to the remote API, if the login produced one.
    pub fn bearer(&self) -> Option<&str> {
        Some(self.access_token.as_str()).filter(|t| !t.is_empty())
    }
}
