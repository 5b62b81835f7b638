//! Signup, login and logout integration tests

use axum::http::{header, StatusCode};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tower_sessions_sqlx_store::SqliteStore;

use snippetbox::backend::auth::sessions::spawn_expired_session_cleanup;
use snippetbox::backend::server::config::MIN_BCRYPT_COST;
use snippetbox::backend::server::Config;

use crate::common::{TestApp, VALID_EMAIL, VALID_NAME, VALID_PASSWORD};

async fn short_session_app() -> TestApp {
    TestApp::with_config(Config {
        bcrypt_cost: MIN_BCRYPT_COST,
        session_lifetime: time::Duration::seconds(2),
        ..Config::default()
    })
    .await
}

static CSRF_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"value='[A-Za-z0-9_-]{43}'").unwrap());

#[tokio::test]
async fn test_signup_form_renders_with_csrf_token() {
    let app = TestApp::new().await;

    let response = app.get("/user/signup").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_contains!(response.body, "<form action='/user/signup' method='POST' novalidate>");
    let token = response.csrf_token().expect("signup form has a token");
    assert_eq!(token.len(), 43);
    assert!(app.session_cookie().is_some());
}

#[tokio::test]
async fn test_signup_token_is_stable_within_session() {
    let app = TestApp::new().await;

    let first = app.csrf_token_from("/user/signup").await;
    let second = app.csrf_token_from("/user/login").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_signup_validation() {
    let long_email = format!("{}@example.com", "a".repeat(250));
    let cases: Vec<(&str, &str, &str, &str, StatusCode, &str)> = vec![
        ("Valid submission", VALID_NAME, VALID_EMAIL, VALID_PASSWORD, StatusCode::SEE_OTHER, ""),
        ("Empty name", "", VALID_EMAIL, VALID_PASSWORD, StatusCode::UNPROCESSABLE_ENTITY, "This field cannot be blank"),
        ("Empty email", VALID_NAME, "", VALID_PASSWORD, StatusCode::UNPROCESSABLE_ENTITY, "This field cannot be blank"),
        ("Empty password", VALID_NAME, VALID_EMAIL, "", StatusCode::UNPROCESSABLE_ENTITY, "This field cannot be blank"),
        ("Invalid email", VALID_NAME, "bob@example.", VALID_PASSWORD, StatusCode::UNPROCESSABLE_ENTITY, "This field is invalid"),
        ("Long email", VALID_NAME, long_email.as_str(), VALID_PASSWORD, StatusCode::UNPROCESSABLE_ENTITY, "This field is too long (maximum is 255 characters)"),
        ("Short password", VALID_NAME, VALID_EMAIL, "pa$$", StatusCode::UNPROCESSABLE_ENTITY, "This field is too short (minimum is 10 characters)"),
    ];

    for (name, user_name, email, password, status, message) in cases {
        let app = TestApp::new().await;
        let response = app.signup(user_name, email, password).await;

        assert_eq!(response.status, status, "{}: {}", name, response.body);
        if status == StatusCode::SEE_OTHER {
            assert_eq!(response.location(), Some("/user/login"), "{}", name);
            assert_eq!(app.user_count().await, 1, "{}", name);
        } else {
            assert_contains!(response.body, message);
            assert_eq!(app.user_count().await, 0, "{}", name);
        }
    }
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new().await;
    app.signup(VALID_NAME, VALID_EMAIL, VALID_PASSWORD).await;

    let response = app.signup("Other Bob", VALID_EMAIL, VALID_PASSWORD).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_contains!(response.body, "Address is already in use");
    assert_eq!(app.user_count().await, 1);
}

#[tokio::test]
async fn test_invalid_signup_keeps_values_but_not_password() {
    let app = TestApp::new().await;

    let response = app.signup("Bob <script>", "bob@example.", VALID_PASSWORD).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_contains!(response.body, "value='Bob &lt;script&gt;'");
    assert_contains!(response.body, "value='bob@example.'");
    assert_not_contains!(response.body, VALID_PASSWORD);
}

#[tokio::test]
async fn test_signup_success_flash_shown_once() {
    let app = TestApp::new().await;
    let response = app.signup(VALID_NAME, VALID_EMAIL, VALID_PASSWORD).await;
    assert_redirect!(response, "/user/login");

    let login_page = app.get("/user/login").await;
    assert_contains!(login_page.body, "Your signup was successful. Please log in.");

    let again = app.get("/user/login").await;
    assert_not_contains!(again.body, "Your signup was successful");
}

#[tokio::test]
async fn test_signup_rejects_invalid_csrf_token() {
    for token in [None, Some("wrongToken")] {
        let app = TestApp::new().await;
        app.get("/user/signup").await;

        let mut fields = vec![
            ("name", VALID_NAME),
            ("email", VALID_EMAIL),
            ("password", VALID_PASSWORD),
        ];
        if let Some(token) = token {
            fields.push(("csrf_token", token));
        }
        let response = app.post_form("/user/signup", &fields).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "token {:?}", token);
        assert_eq!(app.user_count().await, 0);
    }
}

#[tokio::test]
async fn test_csrf_token_from_another_session_is_rejected() {
    let victim = TestApp::new().await;
    let attacker_token = victim.csrf_token_from("/user/signup").await;
    victim.clear_cookies();
    victim.get("/user/signup").await;

    let response = victim
        .post_form(
            "/user/signup",
            &[
                ("name", VALID_NAME),
                ("email", VALID_EMAIL),
                ("password", VALID_PASSWORD),
                ("csrf_token", &attacker_token),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(victim.user_count().await, 0);
}

#[tokio::test]
async fn test_login_success_redirects_to_create() {
    let app = TestApp::new().await;
    app.signup(VALID_NAME, VALID_EMAIL, VALID_PASSWORD).await;

    let response = app.login(VALID_EMAIL, VALID_PASSWORD).await;

    assert_redirect!(response, "/snippet/create");
    let page = app.get("/snippet/create").await;
    assert_eq!(page.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_renews_session_and_rotates_csrf_token() {
    let app = TestApp::new().await;
    app.signup(VALID_NAME, VALID_EMAIL, VALID_PASSWORD).await;
    let old_token = app.csrf_token_from("/user/login").await;
    let old_cookie = app.session_cookie().expect("anonymous session cookie");

    let response = app
        .post_form(
            "/user/login",
            &[("email", VALID_EMAIL), ("password", VALID_PASSWORD), ("csrf_token", &old_token)],
        )
        .await;
    assert_redirect!(response, "/snippet/create");

    let new_cookie = app.session_cookie().expect("authenticated session cookie");
    assert_ne!(old_cookie, new_cookie);

    let new_token = app.csrf_token_from("/").await;
    assert_ne!(old_token, new_token);

    // The pre-login token no longer passes the guard.
    let response = app.post_form("/user/logout", &[("csrf_token", &old_token)]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_old_session_id_is_useless_after_login() {
    let app = TestApp::new().await;
    app.signup(VALID_NAME, VALID_EMAIL, VALID_PASSWORD).await;
    app.get("/user/login").await;
    let fixated = app.session_cookie().expect("anonymous session cookie");

    let response = app.login(VALID_EMAIL, VALID_PASSWORD).await;
    assert_redirect!(response, "/snippet/create");

    // Presenting the pre-login id again does not give access.
    app.set_session_cookie(&fixated);
    let response = app.get("/snippet/create").await;
    assert_redirect!(response, "/user/login");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.signup(VALID_NAME, VALID_EMAIL, VALID_PASSWORD).await;

    let mut bodies = Vec::new();
    for (email, password) in [
        (VALID_EMAIL, "wrongPa$$word"),
        ("nobody@example.com", VALID_PASSWORD),
    ] {
        app.clear_cookies();
        let response = app.login(email, password).await;

        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_contains!(response.body, "Email or Password is incorrect");
        assert!(app.get("/snippet/create").await.status == StatusCode::SEE_OTHER);

        // The submitted email is echoed back; remove it along with the token.
        let body = CSRF_VALUE
            .replace_all(&response.body, "value='TOKEN'")
            .replace(email, "EMAIL");
        bodies.push(body);
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn test_logout() {
    let app = TestApp::new().await;
    app.signup_and_login().await;
    let token = app.csrf_token_from("/").await;

    let response = app.post_form("/user/logout", &[("csrf_token", &token)]).await;
    assert_redirect!(response, "/");

    let home = app.get("/").await;
    assert_contains!(home.body, "You&#39;ve been logged out successfully!");
    assert_contains!(home.body, "href='/user/login'");
    assert_not_contains!(home.body, "/user/logout");

    let response = app.get("/snippet/create").await;
    assert_redirect!(response, "/user/login");
}

#[tokio::test]
async fn test_logout_requires_authentication() {
    let app = TestApp::new().await;
    let token = app.csrf_token_from("/user/login").await;

    let response = app.post_form("/user/logout", &[("csrf_token", &token)]).await;

    assert_redirect!(response, "/user/login");
}

#[tokio::test]
async fn test_protected_pages_are_not_cached() {
    let app = TestApp::new().await;
    app.signup_and_login().await;

    let response = app.get("/snippet/create").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header(header::CACHE_CONTROL), Some("no-store"));
}

#[tokio::test]
async fn test_session_expires_after_inactivity() {
    let app = short_session_app().await;
    app.signup_and_login().await;
    assert_eq!(app.get("/snippet/create").await.status, StatusCode::OK);

    tokio::time::sleep(Duration::from_secs(4)).await;

    assert_redirect!(app.get("/snippet/create").await, "/user/login");
}

#[tokio::test]
async fn test_activity_keeps_session_alive() {
    let app = short_session_app().await;
    app.signup_and_login().await;

    for _ in 0..3 {
        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(app.get("/snippet/create").await.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_expired_sessions_are_deleted() {
    let app = short_session_app().await;
    for _ in 0..5 {
        app.clear_cookies();
        app.get("/").await;
    }
    assert_eq!(app.session_count().await, 5);

    let cleanup = spawn_expired_session_cleanup(
        SqliteStore::new(app.pool.clone()),
        Duration::from_millis(500),
    );
    tokio::time::sleep(Duration::from_secs(4)).await;
    cleanup.abort();

    assert_eq!(app.session_count().await, 0);
}

#[tokio::test]
async fn test_deleted_user_is_logged_out() {
    let app = TestApp::new().await;
    app.signup_and_login().await;
    assert_eq!(app.get("/snippet/create").await.status, StatusCode::OK);

    sqlx::query("DELETE FROM users").execute(&app.pool).await.unwrap();

    assert_redirect!(app.get("/snippet/create").await, "/user/login");
    let home = app.get("/").await;
    assert_contains!(home.body, "href='/user/signup'");
    assert_not_contains!(home.body, "/user/logout");
}
