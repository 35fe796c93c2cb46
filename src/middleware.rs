use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::db::{get_session_account, DbPool};
use crate::error::AppError;
use crate::models::Account;
use crate::AppState;

pub const SESSION_COOKIE: &str = "session";

/// The account behind the request's session cookie. Handlers taking this
/// extractor are only reached by logged-in users; everyone else is sent to
/// the login page.
pub struct CurrentAccount(pub Account);

/// Like [`CurrentAccount`] but never rejects.
pub struct MaybeAccount(pub Option<Account>);

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match session_account(parts, &state.db)? {
            Some(account) => Ok(CurrentAccount(account)),
            None => {
                debug!(path = %parts.uri.path(), "Unauthenticated request");
                Err(AuthRejection::Login(format!("{}/login", state.base_path)))
            }
        }
    }
}

impl FromRequestParts<AppState> for MaybeAccount {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAccount(session_account(parts, &state.db)?))
    }
}

fn session_account(parts: &Parts, db: &DbPool) -> Result<Option<Account>, AppError> {
    let jar = CookieJar::from_headers(&parts.headers);
    match jar.get(SESSION_COOKIE) {
        Some(cookie) => get_session_account(db, cookie.value()),
        None => Ok(None),
    }
}

pub enum AuthRejection {
    Login(String),
    Internal(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Login(path) => Redirect::to(&path).into_response(),
            AuthRejection::Internal(err) => err.into_response(),
        }
    }
}

impl From<AppError> for AuthRejection {
    fn from(err: AppError) -> Self {
        AuthRejection::Internal(err)
    }
}
