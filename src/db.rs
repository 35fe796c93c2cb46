use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row};

use crate::error::AppError;
use crate::models::{Account, NewTask, Session, Task};
use crate::ownership::{owns, Mutation};
use crate::reorder::move_item;

pub type DbPool = Arc<Mutex<Connection>>;

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS accounts (
        id INTEGER PRIMARY KEY,
        username TEXT UNIQUE NOT NULL,
        password_hash TEXT NOT NULL,
        created_at INTEGER DEFAULT (strftime('%s', 'now'))
    );

    CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY,
        account_id INTEGER NOT NULL REFERENCES accounts(id),
        created_at INTEGER DEFAULT (strftime('%s', 'now')),
        expires_at INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY,
        text TEXT NOT NULL,
        completed INTEGER NOT NULL DEFAULT 0,
        category TEXT NOT NULL DEFAULT 'General',
        position INTEGER NOT NULL DEFAULT 0,
        due_date TEXT,
        reminder_sent INTEGER NOT NULL DEFAULT 0,
        account_id INTEGER NOT NULL REFERENCES accounts(id),
        created_at INTEGER DEFAULT (strftime('%s', 'now'))
    );

    CREATE INDEX IF NOT EXISTS tasks_account_position ON tasks (account_id, position);
";

const TASK_COLUMNS: &str =
    "id, text, completed, category, position, due_date, reminder_sent, account_id";

pub fn init_db(path: impl AsRef<Path>) -> Result<DbPool> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub fn init_memory_db() -> Result<DbPool> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn lock(pool: &DbPool) -> Result<MutexGuard<'_, Connection>, AppError> {
    pool.lock()
        .map_err(|_| AppError::Database("database lock poisoned".to_string()))
}

fn account_from_row(row: &Row<'_>) -> Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
    })
}

fn task_from_row(row: &Row<'_>) -> Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: row.get::<_, i32>(2)? != 0,
        category: row.get(3)?,
        position: row.get(4)?,
        due_date: row.get(5)?,
        reminder_sent: row.get::<_, i32>(6)? != 0,
        account_id: row.get(7)?,
    })
}

fn unix_now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

// Account operations
pub fn create_account(
    pool: &DbPool,
    username: &str,
    password_hash: &str,
) -> Result<Account, AppError> {
    let conn = lock(pool)?;
    let inserted = conn.execute(
        "INSERT INTO accounts (username, password_hash) VALUES (?1, ?2)",
        (username, password_hash),
    );

    match inserted {
        Ok(_) => {}
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            return Err(AppError::DuplicateUsername);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Account {
        id: conn.last_insert_rowid(),
        username: username.to_string(),
        password_hash: password_hash.to_string(),
    })
}

pub fn find_account_by_username(
    pool: &DbPool,
    username: &str,
) -> Result<Option<Account>, AppError> {
    let conn = lock(pool)?;
    let account = conn
        .query_row(
            "SELECT id, username, password_hash FROM accounts WHERE username = ?1",
            [username],
            account_from_row,
        )
        .optional()?;
    Ok(account)
}

pub fn count_accounts(pool: &DbPool) -> Result<i64, AppError> {
    let conn = lock(pool)?;
    Ok(conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?)
}

// Session operations
pub fn create_session(pool: &DbPool, session: &Session) -> Result<(), AppError> {
    let conn = lock(pool)?;
    conn.execute(
        "INSERT INTO sessions (id, account_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
        (&session.id, session.account_id, session.created_at, session.expires_at),
    )?;
    Ok(())
}

/// Resolves a live session id to the account it was issued for.
pub fn get_session_account(
    pool: &DbPool,
    session_id: &str,
) -> Result<Option<Account>, AppError> {
    let conn = lock(pool)?;
    let account = conn
        .query_row(
            "SELECT a.id, a.username, a.password_hash
             FROM sessions s JOIN accounts a ON a.id = s.account_id
             WHERE s.id = ?1 AND s.expires_at > ?2",
            (session_id, unix_now()),
            account_from_row,
        )
        .optional()?;
    Ok(account)
}

pub fn delete_session(pool: &DbPool, id: &str) -> Result<(), AppError> {
    let conn = lock(pool)?;
    conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?;
    Ok(())
}

pub fn cleanup_expired_sessions(pool: &DbPool) -> Result<usize, AppError> {
    let conn = lock(pool)?;
    let removed = conn.execute("DELETE FROM sessions WHERE expires_at <= ?1", [unix_now()])?;
    Ok(removed)
}

// Task operations
pub fn create_task(pool: &DbPool, actor: &Account, task: &NewTask) -> Result<Task, AppError> {
    let conn = lock(pool)?;

    let next_position: i64 = conn.query_row(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE account_id = ?1",
        [actor.id],
        |row| row.get(0),
    )?;

    conn.execute(
        "INSERT INTO tasks (text, category, position, due_date, account_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (&task.text, &task.category, next_position, task.due_date, actor.id),
    )?;
    let id = conn.last_insert_rowid();

    get_task_internal(&conn, id)?.ok_or(AppError::NotFound)
}

pub fn list_tasks(pool: &DbPool, actor: &Account) -> Result<Vec<Task>, AppError> {
    let conn = lock(pool)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE account_id = ?1 ORDER BY position ASC, id ASC"
    ))?;
    let tasks = stmt
        .query_map([actor.id], task_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub fn get_task(pool: &DbPool, id: i64) -> Result<Task, AppError> {
    let conn = lock(pool)?;
    get_task_internal(&conn, id)?.ok_or(AppError::NotFound)
}

fn get_task_internal(conn: &Connection, id: i64) -> Result<Option<Task>, AppError> {
    let task = conn
        .query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
            [id],
            task_from_row,
        )
        .optional()?;
    Ok(task)
}

/// Loads a task and checks it against `actor`. `Ok(None)` means another
/// account owns it.
fn owned_task(conn: &Connection, actor: &Account, id: i64) -> Result<Option<Task>, AppError> {
    let task = get_task_internal(conn, id)?.ok_or(AppError::NotFound)?;
    if owns(actor, &task) {
        Ok(Some(task))
    } else {
        Ok(None)
    }
}

pub fn update_task_text(
    pool: &DbPool,
    actor: &Account,
    id: i64,
    text: &str,
) -> Result<Mutation, AppError> {
    let conn = lock(pool)?;
    if owned_task(&conn, actor, id)?.is_none() {
        return Ok(Mutation::NotOwner);
    }

    conn.execute("UPDATE tasks SET text = ?1 WHERE id = ?2", (text, id))?;
    Ok(Mutation::Applied)
}

pub fn toggle_task(pool: &DbPool, actor: &Account, id: i64) -> Result<Mutation, AppError> {
    let conn = lock(pool)?;
    let Some(task) = owned_task(&conn, actor, id)? else {
        return Ok(Mutation::NotOwner);
    };

    conn.execute(
        "UPDATE tasks SET completed = ?1 WHERE id = ?2",
        (!task.completed as i32, id),
    )?;
    Ok(Mutation::Applied)
}

/// Deletes a task and closes the gap it leaves in its owner's ordering.
pub fn delete_task(pool: &DbPool, actor: &Account, id: i64) -> Result<Mutation, AppError> {
    let mut conn = lock(pool)?;
    let tx = conn.transaction()?;
    let Some(task) = owned_task(&tx, actor, id)? else {
        return Ok(Mutation::NotOwner);
    };

    tx.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    tx.execute(
        "UPDATE tasks SET position = position - 1 WHERE account_id = ?1 AND position > ?2",
        (actor.id, task.position),
    )?;
    tx.commit()?;
    Ok(Mutation::Applied)
}

/// Moves the task at `old_index` of the actor's list to `new_index` and
/// rewrites every position as a dense `0..n` sequence in one transaction.
pub fn reorder_tasks(
    pool: &DbPool,
    actor: &Account,
    old_index: usize,
    new_index: usize,
) -> Result<(), AppError> {
    let mut conn = lock(pool)?;
    let tx = conn.transaction()?;

    let mut ids: Vec<i64> = {
        let mut stmt = tx.prepare(
            "SELECT id FROM tasks WHERE account_id = ?1 ORDER BY position ASC, id ASC",
        )?;
        let ids = stmt
            .query_map([actor.id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        ids
    };

    move_item(&mut ids, old_index, new_index)?;

    {
        let mut stmt =
            tx.prepare("UPDATE tasks SET position = ?1 WHERE id = ?2 AND account_id = ?3")?;
        for (position, id) in ids.iter().enumerate() {
            stmt.execute((position as i64, id, actor.id))?;
        }
    }

    tx.commit()?;
    Ok(())
}
