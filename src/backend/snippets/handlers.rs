/**
 * Snippet Handlers
 *
 * - `GET /` lists the latest snippets
 * - `GET /snippet/{id}` shows one snippet; ids that are not positive
 *   integers, unknown ids and expired snippets are all 404
 * - `GET /snippet/create` renders the create form (login required)
 * - `POST /snippet/create` validates and stores a snippet (login required)
 */

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::backend::auth::sessions::AppSession;
use crate::backend::error::{AppError, AppResult};
use crate::backend::middleware::auth::CurrentUser;
use crate::backend::snippets::db::{get_snippet, insert_snippet, latest_snippets};
use crate::backend::snippets::types::{SnippetField, PERMITTED_EXPIRY_DAYS, TITLE_MAX_LENGTH};
use crate::backend::views::{render, render_invalid, Page, View};
use crate::shared::form::Form;

pub const HOME_SNIPPET_LIMIT: i64 = 10;
pub const SNIPPET_CREATED_FLASH: &str = "Snippet successfully created!";

pub async fn home(
    State(pool): State<SqlitePool>,
    session: AppSession,
    user: CurrentUser,
) -> AppResult<Response> {
    let snippets = latest_snippets(&pool, HOME_SNIPPET_LIMIT).await?;
    let page = Page::load(&session, &user).await?;
    Ok(render(&page, &View::Home { snippets }))
}

pub async fn show_snippet(
    State(pool): State<SqlitePool>,
    session: AppSession,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_snippet_id(&id).ok_or(AppError::NotFound)?;
    let snippet = get_snippet(&pool, id).await?;
    let page = Page::load(&session, &user).await?;
    Ok(render(&page, &View::ShowSnippet { snippet }))
}

pub async fn create_snippet_form(session: AppSession, user: CurrentUser) -> AppResult<Response> {
    let page = Page::load(&session, &user).await?;
    Ok(render(&page, &View::CreateSnippet { form: Form::empty() }))
}

pub async fn create_snippet(
    State(pool): State<SqlitePool>,
    session: AppSession,
    user: CurrentUser,
    axum::Form(raw): axum::Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let mut form = Form::<SnippetField>::new(&raw);
    validate_snippet(&mut form);

    if !form.valid() {
        let page = Page::load(&session, &user).await?;
        return Ok(render_invalid(&page, &View::CreateSnippet { form }));
    }

    // Validation restricted the value to the permitted day counts.
    let expires_days: i64 = form
        .get(SnippetField::Expires)
        .parse()
        .map_err(|_| AppError::internal("validated expiry is not a number"))?;

    let id = insert_snippet(
        &pool,
        form.get(SnippetField::Title),
        form.get(SnippetField::Content),
        expires_days,
    )
    .await?;
    tracing::info!("Created snippet {}", id);

    session.put_flash(SNIPPET_CREATED_FLASH).await?;
    Ok(Redirect::to(&format!("/snippet/{}", id)).into_response())
}

pub fn validate_snippet(form: &mut Form<SnippetField>) {
    form.required(&[SnippetField::Title, SnippetField::Content, SnippetField::Expires]);
    form.max_length(SnippetField::Title, TITLE_MAX_LENGTH);
    form.permitted_values(SnippetField::Expires, PERMITTED_EXPIRY_DAYS);
}

/// Snippet ids are positive integers; anything else names no snippet.
fn parse_snippet_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id >= 1)
}
