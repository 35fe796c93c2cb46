use serde::Deserialize;
use time::macros::format_description;
use time::Date;

use crate::error::{AppError, Invalid};

pub const DEFAULT_CATEGORY: &str = "General";
pub const MAX_TEXT_LEN: usize = 300;
pub const MAX_CATEGORY_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub category: String,
    pub position: i64,
    pub due_date: Option<Date>,
    pub reminder_sent: bool,
    pub account_id: i64,
}

/// A validated task ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub category: String,
    pub due_date: Option<Date>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub account_id: i64,
    pub created_at: i64,
    pub expires_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddTaskForm {
    pub task: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditTaskForm {
    pub new_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub old_index: usize,
    pub new_index: usize,
}

impl AddTaskForm {
    pub fn into_new_task(self) -> Result<NewTask, AppError> {
        let text = validate_text(self.task.as_deref())?;

        let category = match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.chars().take(MAX_CATEGORY_LEN).collect(),
            _ => DEFAULT_CATEGORY.to_string(),
        };

        let due_date = parse_due_date(self.due_date.as_deref())?;

        Ok(NewTask {
            text,
            category,
            due_date,
        })
    }
}

/// Trims task text and rejects blank or oversized input.
pub fn validate_text(text: Option<&str>) -> Result<String, AppError> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::Validation(Invalid::EmptyText));
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::Validation(Invalid::TextTooLong));
    }
    Ok(text.to_string())
}

/// Parses a `YYYY-MM-DD` date. Missing or blank input means no due date.
pub fn parse_due_date(input: Option<&str>) -> Result<Option<Date>, AppError> {
    let input = match input.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    Date::parse(input, format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(|_| AppError::Validation(Invalid::DueDateFormat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn form(task: Option<&str>, category: Option<&str>, due_date: Option<&str>) -> AddTaskForm {
        AddTaskForm {
            task: task.map(String::from),
            category: category.map(String::from),
            due_date: due_date.map(String::from),
        }
    }

    #[test]
    fn category_defaults_to_general() {
        let task = form(Some("buy milk"), None, None).into_new_task().unwrap();
        assert_eq!(task.category, "General");

        let task = form(Some("buy milk"), Some("  "), None).into_new_task().unwrap();
        assert_eq!(task.category, "General");

        let task = form(Some("buy milk"), Some("Errands"), None).into_new_task().unwrap();
        assert_eq!(task.category, "Errands");
    }

    #[test]
    fn text_is_trimmed_and_required() {
        let task = form(Some("  walk dog "), None, None).into_new_task().unwrap();
        assert_eq!(task.text, "walk dog");

        assert!(matches!(
            form(None, None, None).into_new_task(),
            Err(AppError::Validation(Invalid::EmptyText))
        ));
        assert!(matches!(
            form(Some("   "), None, None).into_new_task(),
            Err(AppError::Validation(Invalid::EmptyText))
        ));
    }

    #[test]
    fn overlong_text_rejected() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert!(validate_text(Some(&long)).is_err());
        let exact = "x".repeat(MAX_TEXT_LEN);
        assert!(validate_text(Some(&exact)).is_ok());
    }

    #[test]
    fn due_date_parsing() {
        assert_eq!(parse_due_date(None).unwrap(), None);
        assert_eq!(parse_due_date(Some("")).unwrap(), None);
        assert_eq!(
            parse_due_date(Some("2024-03-09")).unwrap(),
            Some(date!(2024 - 03 - 09))
        );
        assert!(parse_due_date(Some("09/03/2024")).is_err());
        assert!(parse_due_date(Some("2024-02-30")).is_err());
    }
}
