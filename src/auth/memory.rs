//! In-memory authentication provider using `DashMap`.
//!
//! Accounts are lost on process restart. Passwords are kept as given: this
//! stands in for the hosted provider and never sees real credentials.

use super::{AuthService, User};
use crate::error::{AuthError, AuthErrorKind};
use crate::Result;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

struct Account {
    user: User,
    password: String,
}

/// In-memory [`AuthService`].
pub struct MemoryAuthService {
    accounts: DashMap<String, Account>,
    signed_in: DashSet<String>,
    next_id: AtomicU64,
}

impl MemoryAuthService {
    /// Create a provider with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            signed_in: DashSet::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Whether `user_id` currently holds a provider session.
    #[must_use]
    pub fn is_signed_in(&self, user_id: &str) -> bool {
        self.signed_in.contains(user_id)
    }
}

impl Default for MemoryAuthService {
    fn default() -> Self {
        Self::new()
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService for MemoryAuthService {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .accounts
            .get(&email_key(email))
            .filter(|account| account.password == password)
            .map(|account| account.user.clone())
            .ok_or_else(|| {
                AuthError::sign_in(AuthErrorKind::InvalidCredentials, "Invalid login credentials")
            })?;

        self.signed_in.insert(user.id().to_string());
        debug!(user_id = user.id(), "Signed in");
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<User> {
        let key = email_key(email);
        let entry = match self.accounts.entry(key) {
            Entry::Occupied(_) => {
                return Err(AuthError::sign_up(
                    AuthErrorKind::AlreadyRegistered,
                    "User already registered",
                )
                .into());
            }
            Entry::Vacant(entry) => entry,
        };

        let id = format!("user-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let user = User::new(id, email.trim(), display_name);
        entry.insert(Account {
            user: user.clone(),
            password: password.to_string(),
        });

        self.signed_in.insert(user.id().to_string());
        info!(user_id = user.id(), "Registered account");
        Ok(user)
    }

    async fn sign_out(&self, user_id: &str) -> Result<()> {
        self.signed_in.remove(user_id);
        debug!(user_id, "Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let auth = MemoryAuthService::new();
        let created = auth.sign_up("a@example.com", "secret1", "山田").await.unwrap();
        let signed_in = auth.sign_in("A@example.com", "secret1").await.unwrap();

        assert_eq!(created, signed_in);
        assert_eq!(signed_in.display_name(), "山田");
        assert!(auth.is_signed_in(signed_in.id()));
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let auth = MemoryAuthService::new();
        auth.sign_up("a@example.com", "secret1", "山田").await.unwrap();

        let err = auth.sign_in("a@example.com", "nope").await.unwrap_err();
        match err {
            Error::Auth(e) => assert_eq!(e.kind(), AuthErrorKind::InvalidCredentials),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_sign_up() {
        let auth = MemoryAuthService::new();
        auth.sign_up("a@example.com", "secret1", "山田").await.unwrap();

        let err = auth.sign_up("a@example.com", "other12", "田中").await.unwrap_err();
        match err {
            Error::Auth(e) => assert_eq!(e.kind(), AuthErrorKind::AlreadyRegistered),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(auth.account_count(), 1);
    }

    #[tokio::test]
    async fn test_sign_out() {
        let auth = MemoryAuthService::new();
        let user = auth.sign_up("a@example.com", "secret1", "山田").await.unwrap();

        auth.sign_out(user.id()).await.unwrap();
        assert!(!auth.is_signed_in(user.id()));
    }
}
