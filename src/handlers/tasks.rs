use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use axum_extra::extract::CookieJar;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::db::{create_task, delete_task, get_task, reorder_tasks, toggle_task, update_task_text};
use crate::error::AppError;
use crate::middleware::CurrentAccount;
use crate::models::{validate_text, Account, AddTaskForm, EditTaskForm, ReorderRequest};
use crate::notice::{self, Notice};
use crate::ownership::Mutation;
use crate::AppState;

fn log_outcome(action: &'static str, account: &Account, id: i64, outcome: Mutation) {
    match outcome {
        Mutation::Applied => info!(account_id = account.id, id, action, "Updated task"),
        Mutation::NotOwner => warn!(
            account_id = account.id,
            id,
            action,
            "Ignored change to task owned by another account"
        ),
    }
}

pub async fn add(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AddTaskForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let home = Redirect::to(&state.home());
    let new_task = match form.into_new_task() {
        Ok(task) => task,
        Err(err) => return Ok((notice::set(jar, Notice::from_error(err)?), home)),
    };

    let task = create_task(&state.db, &account, &new_task)?;
    info!(
        account_id = account.id,
        id = task.id,
        position = task.position,
        category = %task.category,
        "Created task"
    );
    Ok((notice::set(jar, Notice::TaskAdded), home))
}

pub async fn edit(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<EditTaskForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let home = Redirect::to(&state.home());
    get_task(&state.db, id)?;
    let text = match validate_text(form.new_text.as_deref()) {
        Ok(text) => text,
        Err(err) => return Ok((notice::set(jar, Notice::from_error(err)?), home)),
    };

    let outcome = update_task_text(&state.db, &account, id, &text)?;
    log_outcome("edit", &account, id, outcome);
    Ok((jar, home))
}

pub async fn toggle(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let outcome = toggle_task(&state.db, &account, id)?;
    log_outcome("toggle", &account, id, outcome);
    Ok(Redirect::to(&state.home()))
}

pub async fn delete(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let outcome = delete_task(&state.db, &account, id)?;
    log_outcome("delete", &account, id, outcome);
    Ok(Redirect::to(&state.home()))
}

pub async fn reorder(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    reorder_tasks(&state.db, &account, req.old_index, req.new_index)?;
    info!(
        account_id = account.id,
        old_index = req.old_index,
        new_index = req.new_index,
        "Reordered tasks"
    );
    Ok(Json(json!({ "success": true })))
}
