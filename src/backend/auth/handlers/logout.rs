//! POST /user/logout

use axum::response::Redirect;

use crate::backend::auth::service;
use crate::backend::auth::sessions::AppSession;
use crate::backend::error::AppResult;

pub const LOGOUT_FLASH: &str = "You've been logged out successfully!";

pub async fn logout(session: AppSession) -> AppResult<Redirect> {
    service::logout(&session).await?;
    session.put_flash(LOGOUT_FLASH).await?;
    Ok(Redirect::to("/"))
}
