//! Authentication collaborator
//!
//! The hosted backend owns accounts and credentials; this module only fixes
//! the interface the application talks to, plus an in-memory provider used by
//! tests and demos.
//!
//! # Example
//!
//! ```rust,no_run
//! use agility_compe::auth::{AuthService, MemoryAuthService};
//!
//! # async fn example() -> agility_compe::Result<()> {
//! let auth = MemoryAuthService::new();
//! let user = auth.sign_up("a@example.com", "secret1", "山田").await?;
//! assert_eq!(user.display_name(), "山田");
//! auth.sign_out(user.id()).await?;
//! # Ok(())
//! # }
//! ```

mod memory;

pub use memory::MemoryAuthService;

use crate::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Authenticated account as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    email: String,
    display_name: String,
}

impl User {
    /// Create a user.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.into(),
        }
    }

    /// Provider-assigned id; owner key for dog records.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Name entered at sign-up (may be empty).
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Authentication provider.
///
/// Failures are [`Error::Auth`](crate::Error::Auth) carrying a structured
/// [`AuthErrorKind`](crate::error::AuthErrorKind).
pub trait AuthService: Send + Sync {
    /// Verify credentials.
    fn sign_in(&self, email: &str, password: &str) -> impl Future<Output = Result<User>> + Send;

    /// Create an account and sign it in.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> impl Future<Output = Result<User>> + Send;

    /// End the provider-side session for `user_id`.
    fn sign_out(&self, user_id: &str) -> impl Future<Output = Result<()>> + Send;
}
