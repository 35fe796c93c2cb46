use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::db::list_tasks;
use crate::error::AppError;
use crate::middleware::{CurrentAccount, MaybeAccount};
use crate::{notice, views, AppState};

pub async fn index(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let tasks = list_tasks(&state.db, &account)?;
    let (jar, notice) = notice::take(jar);
    let page = views::index_page(&state.base_path, &account, &tasks, notice);
    Ok((jar, Html(page)))
}

pub async fn login_page(
    MaybeAccount(account): MaybeAccount,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    if account.is_some() {
        return Redirect::to(&state.home()).into_response();
    }
    let (jar, notice) = notice::take(jar);
    (jar, Html(views::login_page(&state.base_path, notice))).into_response()
}

pub async fn register_page(
    MaybeAccount(account): MaybeAccount,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    if account.is_some() {
        return Redirect::to(&state.home()).into_response();
    }
    let (jar, notice) = notice::take(jar);
    (jar, Html(views::register_page(&state.base_path, notice))).into_response()
}
