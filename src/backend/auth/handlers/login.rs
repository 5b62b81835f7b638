/**
 * Login Handlers
 *
 * A successful POST /user/login redirects to the page that sent the visitor
 * to the login form, if any, and to the create-snippet page otherwise.
 */

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::auth::types::LoginField;
use crate::backend::auth::service::{self, LoginOutcome};
use crate::backend::auth::sessions::AppSession;
use crate::backend::error::AppResult;
use crate::backend::middleware::auth::CurrentUser;
use crate::backend::server::Config;
use crate::backend::views::{render, render_invalid, Page, View};
use crate::shared::form::Form;

pub const DEFAULT_LOGIN_REDIRECT: &str = "/snippet/create";

pub async fn login_form(session: AppSession, user: CurrentUser) -> AppResult<Response> {
    let page = Page::load(&session, &user).await?;
    Ok(render(&page, &View::Login { form: Form::empty() }))
}

pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
    session: AppSession,
    user: CurrentUser,
    axum::Form(raw): axum::Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let form = Form::<LoginField>::new(&raw);

    match service::login(&pool, config.bcrypt_cost, &session, form).await? {
        LoginOutcome::LoggedIn(_) => {
            let target = session
                .take_redirect_after_login()
                .await?
                .filter(|path| is_local_path(path))
                .unwrap_or_else(|| DEFAULT_LOGIN_REDIRECT.to_string());
            Ok(Redirect::to(&target).into_response())
        }
        LoginOutcome::Rejected(form) => {
            let page = Page::load(&session, &user).await?;
            Ok(render_invalid(&page, &View::Login { form }))
        }
    }
}

/// Only same-site absolute paths are followed after login.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}
