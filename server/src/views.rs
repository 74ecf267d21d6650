use std::sync::Arc;

use admin_api_client::User;
use axum::response::Html;
use chrono::{DateTime, Utc};
use minijinja::Environment;
use serde::Serialize;

use crate::error::AppError;
use crate::models::session::SessionUser;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("layout.html", include_str!("../templates/layout.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("overview.html", include_str!("../templates/overview.html")),
    ("users.html", include_str!("../templates/users.html")),
    ("user_rows.html", include_str!("../templates/user_rows.html")),
    ("subscription.html", include_str!("../templates/subscription.html")),
];

/// Compiled page templates. `.html` templates are auto-escaped.
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Views { env: Arc::new(env) })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, AppError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub current: bool,
}

pub fn navigation(path: &str) -> Vec<NavItem> {
    [
        ("Overview", "/dashboard"),
        ("User List", "/dashboard/users"),
        ("Subscription", "/dashboard/subscription"),
    ]
    .into_iter()
    .map(|(name, href)| NavItem {
        name,
        href,
        current: href == path,
    })
    .collect()
}

/// Everything the sidebar needs: navigation plus who is signed in.
#[derive(Debug, Clone, Serialize)]
pub struct Chrome<'a> {
    pub nav: Vec<NavItem>,
    pub user: &'a SessionUser,
}

impl<'a> Chrome<'a> {
    pub fn new(path: &str, user: &'a SessionUser) -> Self {
        Chrome {
            nav: navigation(path),
            user,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub phone: String,
    pub avatar_url: Option<String>,
    pub last_post_date: Option<String>,
    pub last_post_time: Option<String>,
    pub total_posts: u64,
    pub delete_pending: bool,
}

impl UserRow {
    pub fn from_user(user: &User, delete_pending: bool) -> Self {
        let last_post = user
            .last_post
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc));

        UserRow {
            id: user.id.clone(),
            name: user.name.clone(),
            initials: user.initials(),
            phone: user.phone.clone().unwrap_or_default(),
            avatar_url: user.avatar_url().map(str::to_string),
            last_post_date: last_post.map(|at| at.format("%Y-%m-%d").to_string()),
            last_post_time: last_post.map(|at| at.format("%I:%M %p").to_string()),
            total_posts: user.total_posts,
            delete_pending,
        }
    }
}
