//! Views Module
//!
//! Every page the server renders is a [`View`] variant carrying exactly the
//! data that page needs, plus the [`Page`] data common to all pages: the
//! flash message, whether the visitor is logged in, and the session's CSRF
//! token for any form on the page.
//!
//! Forms that failed validation are rendered from the same `Form` value the
//! handler validated, so previously entered values and the error messages
//! are shown together.

pub mod html;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{Datelike, Utc};

use crate::backend::auth::types::{LoginField, SignupField};
use crate::backend::auth::sessions::AppSession;
use crate::backend::error::AppResult;
use crate::backend::middleware::auth::CurrentUser;
use crate::backend::middleware::csrf::token_for;
use crate::backend::snippets::types::{Snippet, SnippetField};
use crate::shared::form::Form;

/// Data shared by every rendered page.
#[derive(Debug, Clone)]
pub struct Page {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    pub csrf_token: String,
}

impl Page {
    /// Gather the common page data for this request.
    ///
    /// Consumes the flash message and issues a CSRF token if the session does
    /// not have one yet.
    pub async fn load(session: &AppSession, user: &CurrentUser) -> AppResult<Self> {
        Ok(Self {
            current_year: Utc::now().year(),
            flash: session.pop_flash().await?,
            is_authenticated: user.is_authenticated(),
            csrf_token: token_for(session).await?,
        })
    }
}

#[derive(Debug, Clone)]
pub enum View {
    Home { snippets: Vec<Snippet> },
    About,
    ShowSnippet { snippet: Snippet },
    CreateSnippet { form: Form<SnippetField> },
    Signup { form: Form<SignupField> },
    Login { form: Form<LoginField> },
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Home { .. } => "Home",
            View::About => "About",
            View::ShowSnippet { .. } => "Snippet",
            View::CreateSnippet { .. } => "Create a New Snippet",
            View::Signup { .. } => "Signup",
            View::Login { .. } => "Login",
        }
    }
}

/// Render a view with 200 OK.
pub fn render(page: &Page, view: &View) -> Response {
    render_with_status(StatusCode::OK, page, view)
}

/// Render a form that failed validation.
pub fn render_invalid(page: &Page, view: &View) -> Response {
    render_with_status(StatusCode::UNPROCESSABLE_ENTITY, page, view)
}

pub fn render_with_status(status: StatusCode, page: &Page, view: &View) -> Response {
    (status, Html(html::document(page, view))).into_response()
}
