//! One-shot messages carried across a redirect in the `notice` cookie.
//!
//! The cookie only ever holds a fixed key, never user-supplied text.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::error::{AppError, Invalid};

const COOKIE_NAME: &str = "notice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    TaskAdded,
    Registered,
    UsernameTaken,
    InvalidCredentials,
    MissingCredentials,
    EmptyTask,
    TaskTooLong,
    InvalidDueDate,
}

const ALL: [Notice; 8] = [
    Notice::TaskAdded,
    Notice::Registered,
    Notice::UsernameTaken,
    Notice::InvalidCredentials,
    Notice::MissingCredentials,
    Notice::EmptyTask,
    Notice::TaskTooLong,
    Notice::InvalidDueDate,
];

impl Notice {
    pub fn key(self) -> &'static str {
        match self {
            Notice::TaskAdded => "task-added",
            Notice::Registered => "registered",
            Notice::UsernameTaken => "username-taken",
            Notice::InvalidCredentials => "invalid-credentials",
            Notice::MissingCredentials => "missing-credentials",
            Notice::EmptyTask => "empty-task",
            Notice::TaskTooLong => "task-too-long",
            Notice::InvalidDueDate => "invalid-due-date",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL.into_iter().find(|notice| notice.key() == key)
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::TaskAdded => "Task added!",
            Notice::Registered => "Registration successful! Please log in.",
            Notice::UsernameTaken => "Username already exists!",
            Notice::InvalidCredentials => "Invalid username or password.",
            Notice::MissingCredentials => Invalid::MissingCredentials.message(),
            Notice::EmptyTask => Invalid::EmptyText.message(),
            Notice::TaskTooLong => Invalid::TextTooLong.message(),
            Notice::InvalidDueDate => Invalid::DueDateFormat.message(),
        }
    }

    /// Maps user-facing failures to a notice. Anything else is a real error
    /// and is handed back to the caller.
    pub fn from_error(err: AppError) -> Result<Self, AppError> {
        match err {
            AppError::DuplicateUsername => Ok(Notice::UsernameTaken),
            AppError::InvalidCredentials => Ok(Notice::InvalidCredentials),
            AppError::Validation(Invalid::MissingCredentials) => Ok(Notice::MissingCredentials),
            AppError::Validation(Invalid::EmptyText) => Ok(Notice::EmptyTask),
            AppError::Validation(Invalid::TextTooLong) => Ok(Notice::TaskTooLong),
            AppError::Validation(Invalid::DueDateFormat) => Ok(Notice::InvalidDueDate),
            other => Err(other),
        }
    }
}

pub fn set(jar: CookieJar, notice: Notice) -> CookieJar {
    let cookie = Cookie::build((COOKIE_NAME, notice.key()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Reads the pending notice, if any, and clears the cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(key) = jar.get(COOKIE_NAME).map(|cookie| cookie.value().to_owned()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(COOKIE_NAME).path("/"));
    (jar, Notice::from_key(&key))
}
