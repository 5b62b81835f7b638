/**
 * Signup Handlers
 *
 * GET /user/signup renders the empty form. POST /user/signup validates the
 * submission; an invalid one is re-rendered with 422 and the entered name
 * and email kept, a valid one creates the account and redirects to the
 * login page with a flash message.
 */

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::auth::types::SignupField;
use crate::backend::auth::service::{self, SignupOutcome};
use crate::backend::auth::sessions::AppSession;
use crate::backend::error::AppResult;
use crate::backend::middleware::auth::CurrentUser;
use crate::backend::routes::LOGIN_PATH;
use crate::backend::server::Config;
use crate::backend::views::{render, render_invalid, Page, View};
use crate::shared::form::Form;

pub const SIGNUP_SUCCESS_FLASH: &str = "Your signup was successful. Please log in.";

pub async fn signup_form(session: AppSession, user: CurrentUser) -> AppResult<Response> {
    let page = Page::load(&session, &user).await?;
    Ok(render(&page, &View::Signup { form: Form::empty() }))
}

pub async fn signup(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
    session: AppSession,
    user: CurrentUser,
    axum::Form(raw): axum::Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let form = Form::<SignupField>::new(&raw);

    match service::signup(&pool, config.bcrypt_cost, form).await? {
        SignupOutcome::Created(_) => {
            session.put_flash(SIGNUP_SUCCESS_FLASH).await?;
            Ok(Redirect::to(LOGIN_PATH).into_response())
        }
        SignupOutcome::Invalid(form) => {
            let page = Page::load(&session, &user).await?;
            Ok(render_invalid(&page, &View::Signup { form }))
        }
    }
}
