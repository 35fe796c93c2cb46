use crate::models::{Account, Task};

/// Outcome of a guarded task mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// The task belongs to another account; nothing was written.
    NotOwner,
}

pub fn owns(account: &Account, task: &Task) -> bool {
    task.account_id == account.id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: i64) -> Account {
        Account {
            id,
            username: format!("user{id}"),
            password_hash: String::new(),
        }
    }

    fn task(account_id: i64) -> Task {
        Task {
            id: 10,
            text: "walk dog".to_string(),
            completed: false,
            category: "General".to_string(),
            position: 0,
            due_date: None,
            reminder_sent: false,
            account_id,
        }
    }

    #[test]
    fn owner_matches_account_id() {
        assert!(owns(&account(1), &task(1)));
        assert!(!owns(&account(2), &task(1)));
    }
}
