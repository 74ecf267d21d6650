use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, Redirect},
    Extension,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_cookies::Cookies;
use tracing::{info, warn};

use super::{check_unauthorized, session_expired, USERS_PATH};
use crate::cache::QueryKey;
use crate::error::AppError;
use crate::flash::{set_flash, take_flash, Flash, Notice};
use crate::models::session::Session;
use crate::pagination::PaginationControls;
use crate::state::AppState;
use crate::views::{Chrome, UserRow};

/// Placeholder rows shown while the list loads.
pub const SKELETON_ROWS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    /// User id awaiting delete confirmation.
    pub confirm: Option<String>,
}

impl ListQuery {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

#[derive(Debug, Deserialize)]
pub struct DeletePayload {
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
struct Confirmation {
    id: String,
    name: String,
}

fn list_url(page: u32) -> String {
    format!("{}?page={}", USERS_PATH, page)
}

/// Page shell: skeleton rows, filled in from the rows fragment.
pub async fn users_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let page = query.page();

    let confirm = query.confirm.map(|id| {
        // Show the name if this page is cached; the id alone is enough to act on.
        let name = state
            .users
            .get(&QueryKey::users(session.id, page, state.page_size))
            .and_then(|cached| cached.users.into_iter().find(|u| u.id == id))
            .map(|u| u.name)
            .unwrap_or_else(|| id.clone());
        Confirmation { id, name }
    });

    state.views.render(
        "users.html",
        json!({
            "chrome": Chrome::new(USERS_PATH, &session.user),
            "notice": take_flash(&cookies),
            "page": page,
            "rows_url": format!("{}/rows?page={}", USERS_PATH, page),
            "list_url": list_url(page),
            "skeleton_rows": SKELETON_ROWS,
            "confirm": confirm,
        }),
    )
}

/// Table body for one page of users.
pub async fn user_rows(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let page = query.page();
    let limit = state.page_size;
    let token = session.bearer();

    let outcome = state
        .users
        .fetch(QueryKey::users(session.id, page, limit), || {
            state.api.users(token, page, limit)
        })
        .await;

    check_unauthorized(&state, &session, outcome.error(), true)?;

    let notice = outcome.error().map(|e| {
        warn!(page, error = %e, "users query failed");
        Notice::error("Failed to load users")
    });

    let rows: Option<Vec<UserRow>> = outcome.data().map(|data| {
        data.users
            .iter()
            .map(|user| UserRow::from_user(user, state.is_delete_pending(&user.id)))
            .collect()
    });
    let pagination = outcome
        .data()
        .and_then(|data| data.pagination.as_ref())
        .and_then(|envelope| PaginationControls::build(page, limit, envelope));

    state.views.render(
        "user_rows.html",
        json!({
            "rows": rows,
            "loaded": outcome.data().is_some(),
            "pagination": pagination,
            "notice": notice,
            "page": page,
            "users_path": USERS_PATH,
        }),
    )
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    cookies: Cookies,
    Path(user_id): Path<String>,
    Form(payload): Form<DeletePayload>,
) -> Result<Redirect, AppError> {
    let back = Redirect::to(&list_url(payload.page.unwrap_or(1).max(1)));

    let Some(pending) = state.begin_delete(&user_id) else {
        set_flash(&cookies, Flash::DeletePending);
        return Ok(back);
    };

    let result = state.api.delete_user(session.bearer(), &user_id).await;
    drop(pending);

    match result {
        Ok(()) => {
            let dropped = state.users.invalidate(&["users"]);
            info!(user = %user_id, by = %session.user.id, dropped, "user deleted");
            set_flash(&cookies, Flash::UserDeleted);
        }
        Err(e) if e.is_unauthorized() => return Err(session_expired(&state, &session, false)),
        Err(e) => {
            warn!(user = %user_id, error = %e, "delete failed");
            set_flash(&cookies, Flash::DeleteFailed);
        }
    }

    Ok(back)
}
