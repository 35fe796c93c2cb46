use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::{self, generate_session_id};
use crate::db::{create_session, delete_session};
use crate::error::AppError;
use crate::middleware::{CurrentAccount, SESSION_COOKIE};
use crate::models::{CredentialsForm, Session};
use crate::notice::{self, Notice};
use crate::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let account = match auth::authenticate(&state.db, &form.username, &form.password) {
        Ok(account) => account,
        Err(err) => {
            let notice = Notice::from_error(err)?;
            warn!(username = %form.username, "Failed login attempt");
            return Ok((notice::set(jar, notice), Redirect::to(&state.path("/login"))));
        }
    };

    let now = OffsetDateTime::now_utc();
    let session = Session {
        id: generate_session_id(),
        account_id: account.id,
        created_at: now.unix_timestamp(),
        expires_at: (now + state.session_ttl).unix_timestamp(),
    };

    create_session(&state.db, &session)?;
    info!(account_id = account.id, "User logged in");

    let cookie = Cookie::build((SESSION_COOKIE, session.id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(state.session_ttl);

    Ok((jar.add(cookie), Redirect::to(&state.home())))
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    match auth::register(&state.db, &form.username, &form.password) {
        Ok(account) => {
            info!(account_id = account.id, username = %account.username, "Registered account");
            Ok((
                notice::set(jar, Notice::Registered),
                Redirect::to(&state.path("/login")),
            ))
        }
        Err(err) => {
            let notice = Notice::from_error(err)?;
            Ok((notice::set(jar, notice), Redirect::to(&state.path("/register"))))
        }
    }
}

pub async fn logout(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let session_id = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned());
    if let Some(session_id) = session_id {
        delete_session(&state.db, &session_id)?;
    }
    info!(account_id = account.id, "User logged out");

    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(0));

    Ok((jar.remove(cookie), Redirect::to(&state.path("/login"))))
}
