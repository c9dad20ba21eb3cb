// Credential verification for login attempts
//
// One lookup, one verification, one terminal state. The strategy never
// retries and never touches the session store; issuing a session on
// success is the login route's job.

use anyhow::Result;

use super::password::verify_password;
use crate::storage::{StorageBackend, UserRow};

/// Terminal states of a single login attempt. A storage failure is the
/// fourth terminal state, surfaced as the `Err` branch of `authenticate`.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials verified; carries the full user record.
    Success(UserRow),
    /// No user with that email (exact, case-sensitive match).
    NoSuchUser,
    /// User exists but the password does not verify.
    BadPassword,
}

/// Run one login attempt against the credential store.
///
/// Concurrent attempts for the same email are independent and unordered;
/// there is no locking here.
pub async fn authenticate(
    db: &StorageBackend,
    email: &str,
    password: &str,
) -> Result<LoginOutcome> {
    let Some(user) = db.get_user_by_email(email).await? else {
        return Ok(LoginOutcome::NoSuchUser);
    };

    if !verify_password(password, &user.password_hash) {
        return Ok(LoginOutcome::BadPassword);
    }

    Ok(LoginOutcome::Success(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::storage::CreateUserRow;

    async fn seeded_backend() -> StorageBackend {
        let db = StorageBackend::in_memory();
        db.create_user(CreateUserRow {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password_hash: hash_password("pw").unwrap(),
        })
        .await
        .unwrap();
        db
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let db = seeded_backend().await;
        let outcome = authenticate(&db, "nobody@x.com", "pw").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::NoSuchUser));
    }

    #[tokio::test]
    async fn test_email_match_is_case_sensitive() {
        let db = seeded_backend().await;
        let outcome = authenticate(&db, "A@x.com", "pw").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::NoSuchUser));
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let db = seeded_backend().await;
        let outcome = authenticate(&db, "a@x.com", "wrong").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::BadPassword));
    }

    #[tokio::test]
    async fn test_success_yields_full_record() {
        let db = seeded_backend().await;
        let outcome = authenticate(&db, "a@x.com", "pw").await.unwrap();
        match outcome {
            LoginOutcome::Success(user) => {
                assert_eq!(user.email, "a@x.com");
                assert_eq!(user.name, "A");
                assert_ne!(user.password_hash, "pw");
            }
            other => panic!("expected Success, got {:?}", other),
        }
    }
}
