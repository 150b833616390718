//! Account signup and credential authentication.

use std::sync::Arc;

use tracing::info;

use super::password::PasswordHasher;
use super::users::UserStore;
use super::AuthError;
use crate::models::auth::{NewAccount, NewUser, User, UserId};

/// Minimum password length.
const MIN_PASSWORD_LEN: usize = 8;

/// bcrypt only looks at the first 72 bytes.
const MAX_PASSWORD_BYTES: usize = 72;

/// Allowed length range for first and last names.
const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=50;

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// Validate a signup request, returning every problem found.
pub fn validate_new_account(account: &NewAccount) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_plausible_email(&normalize_email(&account.email)) {
        errors.push("email must be a valid email address".to_string());
    }
    if account.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!("password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    if account.password.len() > MAX_PASSWORD_BYTES {
        errors.push(format!("password must be at most {MAX_PASSWORD_BYTES} bytes"));
    }
    for (field, value) in [("first_name", &account.first_name), ("last_name", &account.last_name)] {
        if !NAME_LEN.contains(&value.trim().chars().count()) {
            errors.push(format!(
                "{field} must be between {} and {} characters",
                NAME_LEN.start(),
                NAME_LEN.end()
            ));
        }
    }

    errors
}

/// Signup and email/password authentication over a [`UserStore`].
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Register a new user. The email is stored trimmed and lowercased.
    pub async fn signup(&self, account: NewAccount) -> Result<User, AuthError> {
        let errors = validate_new_account(&account);
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors.join("; ")));
        }

        let password_hash = self.hasher.hash(&account.password)?;
        let user = self
            .users
            .create(NewUser {
                email: normalize_email(&account.email),
                password_hash,
                first_name: account.first_name.trim().to_string(),
                last_name: account.last_name.trim().to_string(),
            })
            .await?;

        info!(user_id = user.id, "user signed up");
        Ok(user)
    }

    /// Resolve an email/password pair to a user.
    ///
    /// Unknown email and wrong password are both `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let found = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &found.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(found.user)
    }

    /// Fetch the profile of an authenticated user.
    pub async fn profile(&self, user_id: UserId) -> Result<Option<User>, AuthError> {
        self.users.find_by_id(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::MemoryUserStore;

    fn service() -> AccountService {
        AccountService::new(Arc::new(MemoryUserStore::new()), PasswordHasher::new(4))
    }

    fn alice() -> NewAccount {
        NewAccount {
            email: "  Alice@X.com ".into(),
            password: "pw123456".into(),
            first_name: "Alice".into(),
            last_name: "Adams".into(),
        }
    }

    #[tokio::test]
    async fn signup_normalizes_email() {
        let svc = service();
        let user = svc.signup(alice()).await.unwrap();
        assert_eq!(user.email, "alice@x.com");
        assert_eq!(user.first_name, "Alice");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let svc = service();
        svc.signup(alice()).await.unwrap();

        let mut again = alice();
        again.email = "ALICE@x.com".into();
        assert!(matches!(svc.signup(again).await, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn invalid_signup_lists_every_problem() {
        let svc = service();
        let bad = NewAccount {
            email: "not-an-email".into(),
            password: "short".into(),
            first_name: "A".into(),
            last_name: "Adams".into(),
        };
        match svc.signup(bad).await {
            Err(AuthError::Validation(msg)) => {
                assert!(msg.contains("email"));
                assert!(msg.contains("password"));
                assert!(msg.contains("first_name"));
                assert!(!msg.contains("last_name"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn authenticate_accepts_only_the_signed_up_password() {
        let svc = service();
        let user = svc.signup(alice()).await.unwrap();

        let found = svc.authenticate("alice@x.com", "pw123456").await.unwrap();
        assert_eq!(found.id, user.id);

        // Email lookup is case-insensitive.
        assert!(svc.authenticate("ALICE@X.COM", "pw123456").await.is_ok());

        for wrong in ["pw1234567", "PW123456", "", "pw12345"] {
            assert!(matches!(
                svc.authenticate("alice@x.com", wrong).await,
                Err(AuthError::InvalidCredentials)
            ));
        }
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let svc = service();
        assert!(matches!(
            svc.authenticate("nobody@x.com", "pw123456").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn profile_looks_up_by_id() {
        let svc = service();
        let user = svc.signup(alice()).await.unwrap();
        assert_eq!(svc.profile(user.id).await.unwrap(), Some(user));
        assert_eq!(svc.profile(999).await.unwrap(), None);
    }

    #[test]
    fn email_shapes() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("@b.co"));
        assert!(!is_plausible_email("a@@b.co"));
        assert!(!is_plausible_email("a b@c.co"));
        assert!(!is_plausible_email("a@b..co"));
    }
}
