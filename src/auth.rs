use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;

use crate::db::{self, DbPool};
use crate::error::{AppError, Invalid};
use crate::models::Account;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Internal(format!("salt encoding failed: {e}")))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

pub fn generate_session_id() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..64)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Creates an account with a freshly hashed password.
pub fn register(pool: &DbPool, username: &str, password: &str) -> Result<Account, AppError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Validation(Invalid::MissingCredentials));
    }
    if db::find_account_by_username(pool, username)?.is_some() {
        return Err(AppError::DuplicateUsername);
    }

    let password_hash = hash_password(password)?;
    db::create_account(pool, username, &password_hash)
}

/// Looks up `username` and checks `password` against its stored hash.
/// Unknown users and wrong passwords are indistinguishable to the caller.
pub fn authenticate(pool: &DbPool, username: &str, password: &str) -> Result<Account, AppError> {
    match db::find_account_by_username(pool, username.trim())? {
        Some(account) if verify_password(password, &account.password_hash) => Ok(account),
        _ => Err(AppError::InvalidCredentials),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{count_accounts, init_memory_db};

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
        assert!(!verify_password("hunter2", "not a hash"));
    }

    #[test]
    fn session_ids_are_random_alphanumeric() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn register_then_authenticate() {
        let pool = init_memory_db().unwrap();
        let account = register(&pool, "alice", "s3cret").unwrap();
        assert_ne!(account.password_hash, "s3cret");

        let logged_in = authenticate(&pool, "alice", "s3cret").unwrap();
        assert_eq!(logged_in.id, account.id);
    }

    #[test]
    fn register_twice_fails() {
        let pool = init_memory_db().unwrap();
        register(&pool, "alice", "one").unwrap();
        assert!(matches!(
            register(&pool, "alice", "two"),
            Err(AppError::DuplicateUsername)
        ));
        assert_eq!(count_accounts(&pool).unwrap(), 1);
    }

    #[test]
    fn register_requires_credentials() {
        let pool = init_memory_db().unwrap();
        assert!(matches!(register(&pool, "  ", "pw"), Err(AppError::Validation(_))));
        assert!(matches!(register(&pool, "alice", ""), Err(AppError::Validation(_))));
        assert_eq!(count_accounts(&pool).unwrap(), 0);
    }

    #[test]
    fn bad_credentials_rejected() {
        let pool = init_memory_db().unwrap();
        register(&pool, "alice", "s3cret").unwrap();
        assert!(matches!(
            authenticate(&pool, "alice", "wrong"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&pool, "mallory", "s3cret"),
            Err(AppError::InvalidCredentials)
        ));
    }
}
