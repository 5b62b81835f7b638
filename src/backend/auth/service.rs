/**
 * Authentication Service
 *
 * Signup, login, logout and the authenticated check, independent of HTTP.
 * Validation failures are not errors here: they come back as the form,
 * carrying its messages, so the caller can re-render it. `Err` is reserved
 * for infrastructure failures (database, session store, hashing).
 *
 * Login and logout both renew the session id and rotate the CSRF token.
 * An unknown email and a wrong password produce the same non-field message.
 */

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::types::{LoginField, SignupField};
use crate::backend::auth::sessions::AppSession;
use crate::backend::auth::users::{self, email_exists, get_user_by_id, hash_password, insert_user, User};
use crate::backend::error::{AppError, AppResult};
use crate::backend::middleware::csrf::rotate_token;
use crate::shared::form::{Form, EMAIL_PATTERN};

pub const DUPLICATE_EMAIL_MESSAGE: &str = "Address is already in use";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Email or Password is incorrect";
pub const EMAIL_MAX_LENGTH: usize = 255;
pub const PASSWORD_MIN_LENGTH: usize = 10;

#[derive(Debug)]
pub enum SignupOutcome {
    Created(Uuid),
    Invalid(Form<SignupField>),
}

#[derive(Debug)]
pub enum LoginOutcome {
    LoggedIn(Uuid),
    Rejected(Form<LoginField>),
}

/// Apply the signup field rules.
pub fn validate_signup(form: &mut Form<SignupField>) {
    form.required(&[SignupField::Name, SignupField::Email, SignupField::Password]);
    form.max_length(SignupField::Email, EMAIL_MAX_LENGTH);
    form.matches_pattern(SignupField::Email, &EMAIL_PATTERN);
    form.min_length(SignupField::Password, PASSWORD_MIN_LENGTH);
}

/// Create an account from a submitted signup form.
pub async fn signup(
    pool: &SqlitePool,
    bcrypt_cost: u32,
    mut form: Form<SignupField>,
) -> AppResult<SignupOutcome> {
    validate_signup(&mut form);
    if !form.valid() {
        return Ok(SignupOutcome::Invalid(form));
    }

    let email = form.get(SignupField::Email).to_string();
    if email_exists(pool, &email).await? {
        tracing::info!("Signup rejected, email already registered");
        form.add_error(SignupField::Email, DUPLICATE_EMAIL_MESSAGE);
        return Ok(SignupOutcome::Invalid(form));
    }

    let hashed_password = hash_password(form.get(SignupField::Password), bcrypt_cost).await?;

    // The unique index still decides when two signups race for one address.
    match insert_user(pool, form.get(SignupField::Name), &email, &hashed_password).await {
        Ok(user_id) => {
            tracing::info!("Created user {}", user_id);
            Ok(SignupOutcome::Created(user_id))
        }
        Err(AppError::DuplicateEmail) => {
            form.add_error(SignupField::Email, DUPLICATE_EMAIL_MESSAGE);
            Ok(SignupOutcome::Invalid(form))
        }
        Err(e) => Err(e),
    }
}

/// Check credentials and, on success, log the session in.
pub async fn login(
    pool: &SqlitePool,
    bcrypt_cost: u32,
    session: &AppSession,
    mut form: Form<LoginField>,
) -> AppResult<LoginOutcome> {
    let result = users::authenticate(
        pool,
        form.get(LoginField::Email),
        form.get(LoginField::Password),
        bcrypt_cost,
    )
    .await;

    match result {
        Ok(user_id) => {
            session.renew().await?;
            session.set_user_id(user_id).await?;
            rotate_token(session).await?;
            tracing::info!("User {} logged in", user_id);
            Ok(LoginOutcome::LoggedIn(user_id))
        }
        Err(AppError::InvalidCredentials) => {
            tracing::info!("Login rejected");
            form.add_non_field_error(INVALID_CREDENTIALS_MESSAGE);
            Ok(LoginOutcome::Rejected(form))
        }
        Err(e) => Err(e),
    }
}

/// Log the session out. Other session data (such as a pending flash) survives.
pub async fn logout(session: &AppSession) -> AppResult<()> {
    session.clear_user_id().await?;
    session.renew().await?;
    rotate_token(session).await?;
    Ok(())
}

/// The user the session is logged in as.
///
/// A user id that no longer names a stored user is removed from the session,
/// which leaves it anonymous.
pub async fn current_user(pool: &SqlitePool, session: &AppSession) -> AppResult<Option<User>> {
    let Some(user_id) = session.user_id().await? else {
        return Ok(None);
    };

    match get_user_by_id(pool, user_id).await? {
        Some(user) => Ok(Some(user)),
        None => {
            tracing::warn!("Session refers to unknown user {}, clearing it", user_id);
            session.clear_user_id().await?;
            Ok(None)
        }
    }
}

/// Whether the session belongs to a user that still exists.
pub async fn is_authenticated(pool: &SqlitePool, session: &AppSession) -> AppResult<bool> {
    Ok(current_user(pool, session).await?.is_some())
}
