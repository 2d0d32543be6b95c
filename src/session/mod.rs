//! Per-browser session state
//!
//! Each session holds the signed-in user, a one-shot flash message, and the
//! authoritative score table. Sessions are keyed by [`SessionId`], created on
//! first access and dropped by [`SessionStore::end`]; nothing is shared
//! between them.
//!
//! # Example
//!
//! ```rust
//! use agility_compe::session::{SessionId, SessionStore};
//!
//! let store = SessionStore::new(vec!["フェリーチェ".to_string()]);
//! let id = SessionId::new("browser-1");
//!
//! store.with_session(&id, |s| s.set_flash("保存しました！"));
//! assert_eq!(store.with_session(&id, |s| s.take_flash()), Some("保存しました！".to_string()));
//! assert_eq!(store.with_session(&id, |s| s.take_flash()), None);
//!
//! assert!(store.end(&id));
//! ```

mod store;

pub use store::SessionStore;

use crate::auth::User;
use crate::score::TableReconciler;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session key (cookie value).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a session key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State owned by one interactive session.
#[derive(Debug)]
pub struct Session {
    user: Option<User>,
    flash: Option<String>,
    scores: TableReconciler,
}

impl Session {
    /// Fresh session; the score table seeds itself on first use.
    #[must_use]
    pub const fn new(seed_names: Vec<String>) -> Self {
        Self {
            user: None,
            flash: None,
            scores: TableReconciler::new(seed_names),
        }
    }

    /// Signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Record the signed-in user.
    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Forget the signed-in user, returning it.
    pub fn sign_out(&mut self) -> Option<User> {
        self.user.take()
    }

    /// Replace the pending flash message.
    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash = Some(message.into());
    }

    /// Read and clear the pending flash message.
    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }

    /// The session's score table.
    pub fn scores(&mut self) -> &mut TableReconciler {
        &mut self.scores
    }
}
