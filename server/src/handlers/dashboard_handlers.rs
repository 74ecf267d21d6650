use axum::{extract::State, response::Html, Extension};
use chrono::{Datelike, Utc};
use futures::future::join;
use serde_json::json;
use tracing::warn;

use super::{check_unauthorized, DASHBOARD_PATH, SUBSCRIPTION_PATH};
use crate::cache::QueryKey;
use crate::error::AppError;
use crate::flash::Notice;
use crate::models::session::Session;
use crate::placeholders::{alert_chart, analytics_cards, ALERT_SERIES, CHART_MAX};
use crate::state::AppState;
use crate::views::{Chrome, UserRow};

/// The overview asks for a small first page and shows the top of it.
const PREVIEW_LIMIT: u32 = 5;
const PREVIEW_ROWS: usize = 3;

pub async fn overview(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Html<String>, AppError> {
    let now = Utc::now();
    let (year, month) = (now.year(), now.month());
    let token = session.bearer();

    // Independent queries, issued together.
    let (users, stats) = join(
        state.users.fetch(QueryKey::users(session.id, 1, PREVIEW_LIMIT), || {
            state.api.users(token, 1, PREVIEW_LIMIT)
        }),
        state.stats.fetch(QueryKey::monthly_stats(session.id, year, month), || {
            state.api.monthly_stats(token, year, month)
        }),
    )
    .await;

    check_unauthorized(&state, &session, users.error(), false)?;
    check_unauthorized(&state, &session, stats.error(), false)?;

    let mut notices = Vec::new();
    if let Some(e) = users.error() {
        warn!(error = %e, "overview: users query failed");
        notices.push(Notice::error("Failed to load users"));
    }
    if let Some(e) = stats.error() {
        warn!(error = %e, "overview: stats query failed");
        notices.push(Notice::error("Failed to load statistics"));
    }

    let preview: Option<Vec<UserRow>> = users.data().map(|page| {
        page.users
            .iter()
            .take(PREVIEW_ROWS)
            .map(|user| UserRow::from_user(user, state.is_delete_pending(&user.id)))
            .collect()
    });

    state.views.render(
        "overview.html",
        json!({
            "chrome": Chrome::new(DASHBOARD_PATH, &session.user),
            "notices": notices,
            "cards": analytics_cards(),
            "preview": preview,
            "chart": alert_chart(),
            "chart_series": ALERT_SERIES
                .iter()
                .map(|(name, color)| json!({ "name": name, "color": color }))
                .collect::<Vec<_>>(),
            "chart_max": CHART_MAX,
        }),
    )
}

pub async fn subscription(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Html<String>, AppError> {
    state.views.render(
        "subscription.html",
        json!({ "chrome": Chrome::new(SUBSCRIPTION_PATH, &session.user) }),
    )
}
