//! In-process test application
//!
//! `TestApp` wraps the fully layered router over a fresh in-memory SQLite
//! database and behaves like a single browser: it keeps the session cookie
//! between requests and can scrape the CSRF token out of rendered forms.

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::SqlitePool;
use std::sync::Mutex;
use tower::ServiceExt;

use snippetbox::backend::auth::sessions::SESSION_COOKIE_NAME;
use snippetbox::backend::routes::create_router;
use snippetbox::backend::server::config::{load_database, MIN_BCRYPT_COST};
use snippetbox::backend::server::{AppState, Config};

static CSRF_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"name='csrf_token' value='([^']+)'").unwrap());

pub const VALID_NAME: &str = "Bob";
pub const VALID_EMAIL: &str = "bob@example.com";
pub const VALID_PASSWORD: &str = "validPa$$word";

/// A response with the body already read.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The CSRF token embedded in the page, if it has a form.
    pub fn csrf_token(&self) -> Option<String> {
        CSRF_INPUT
            .captures(&self.body)
            .map(|captures| captures[1].to_string())
    }
}

pub struct TestApp {
    router: Router,
    pub pool: SqlitePool,
    session_cookie: Mutex<Option<String>>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config {
            bcrypt_cost: MIN_BCRYPT_COST,
            ..Config::default()
        })
        .await
    }

    /// Build the app with `config`; its database URL is ignored.
    pub async fn with_config(config: Config) -> Self {
        let pool = load_database("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        let router = create_router(AppState::new(pool.clone(), config));

        Self {
            router,
            pool,
            session_cookie: Mutex::new(None),
        }
    }

    /// The current session cookie value, as a browser would hold it.
    pub fn session_cookie(&self) -> Option<String> {
        self.session_cookie.lock().unwrap().clone()
    }

    /// Present `cookie` as the session cookie from now on.
    pub fn set_session_cookie(&self, cookie: &str) {
        *self.session_cookie.lock().unwrap() = Some(cookie.to_string());
    }

    /// Forget the session cookie, like a new browser.
    pub fn clear_cookies(&self) {
        *self.session_cookie.lock().unwrap() = None;
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(fields).expect("Failed to encode form");
        self.send(Method::POST, path, Some(body)).await
    }

    /// Fetch `page` and return the CSRF token it renders.
    pub async fn csrf_token_from(&self, page: &str) -> String {
        let response = self.get(page).await;
        response
            .csrf_token()
            .unwrap_or_else(|| panic!("No CSRF token on {}:\n{}", page, response.body))
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> TestResponse {
        let token = self.csrf_token_from("/user/signup").await;
        self.post_form(
            "/user/signup",
            &[
                ("name", name),
                ("email", email),
                ("password", password),
                ("csrf_token", &token),
            ],
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        let token = self.csrf_token_from("/user/login").await;
        self.post_form(
            "/user/login",
            &[("email", email), ("password", password), ("csrf_token", &token)],
        )
        .await
    }

    /// Sign up the default user and log in as them.
    pub async fn signup_and_login(&self) {
        let response = self.signup(VALID_NAME, VALID_EMAIL, VALID_PASSWORD).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "signup failed:\n{}", response.body);
        let response = self.login(VALID_EMAIL, VALID_PASSWORD).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "login failed:\n{}", response.body);
    }

    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn session_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM tower_sessions")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn snippet_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM snippets")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    async fn send(&self, method: Method, path: &str, form: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = self.session_cookie() {
            builder = builder.header(header::COOKIE, format!("{}={}", SESSION_COOKIE_NAME, cookie));
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form)
            }
            None => Body::empty(),
        };
        let request = builder.body(body).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let (parts, body) = response.into_parts();
        self.store_cookies(&parts.headers);

        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn store_cookies(&self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let pair = value.split(';').next().unwrap_or_default();
            let Some((name, cookie)) = pair.split_once('=') else { continue };
            if name.trim() != SESSION_COOKIE_NAME {
                continue;
            }

            let removed = cookie.is_empty() || value.to_ascii_lowercase().contains("max-age=0");
            let mut jar = self.session_cookie.lock().unwrap();
            *jar = if removed { None } else { Some(cookie.to_string()) };
        }
    }
}
