//! Session map using `DashMap`.
//!
//! Sessions live in memory only and are lost on process restart.

use super::{Session, SessionId};
use dashmap::DashMap;
use tracing::{debug, info};

/// All live sessions, keyed by id.
///
/// Closures passed to [`with_session`](Self::with_session) run under the
/// session's shard lock and must not block.
pub struct SessionStore {
    sessions: DashMap<SessionId, Session>,
    seed_names: Vec<String>,
}

impl SessionStore {
    /// Create an empty store; new sessions seed their score table from `seed_names`.
    #[must_use]
    pub fn new(seed_names: Vec<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            seed_names,
        }
    }

    /// Run `f` against session `id`, creating it on first access.
    pub fn with_session<R>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.sessions.entry(id.clone()).or_insert_with(|| {
            info!(session = %id, "Session started");
            Session::new(self.seed_names.clone())
        });
        f(session.value_mut())
    }

    /// Tear down session `id`. Returns whether it existed.
    pub fn end(&self, id: &SessionId) -> bool {
        let existed = self.sessions.remove(id).is_some();
        if existed {
            debug!(session = %id, "Session ended");
        }
        existed
    }

    /// Whether session `id` exists.
    #[must_use]
    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether there are no live sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::User;

    fn store() -> SessionStore {
        SessionStore::new(vec!["フェリーチェ".to_string(), "カーロ".to_string()])
    }

    #[test]
    fn test_created_on_first_access() {
        let store = store();
        let id = SessionId::new("s1");
        assert!(!store.contains(&id));

        let authenticated = store.with_session(&id, |s| s.is_authenticated());
        assert!(!authenticated);
        assert!(store.contains(&id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = store();
        let a = SessionId::new("a");
        let b = SessionId::new("b");

        store.with_session(&a, |s| {
            s.sign_in(User::new("user-1", "a@example.com", "山田"));
            let mut view = s.scores().present_editable_view();
            view.row_mut(0).unwrap().faults = 3;
            s.scores().reconcile(&view).unwrap();
        });

        let (b_user, b_faults) = store.with_session(&b, |s| {
            (
                s.is_authenticated(),
                s.scores().present_editable_view().rows()[0].faults,
            )
        });
        assert!(!b_user);
        assert_eq!(b_faults, 0);
    }

    #[test]
    fn test_end_tears_down() {
        let store = store();
        let id = SessionId::new("s1");
        store.with_session(&id, |s| s.set_flash("hello"));

        assert!(store.end(&id));
        assert!(!store.end(&id));
        assert!(store.is_empty());

        // A new session under the same key starts clean
        assert_eq!(store.with_session(&id, |s| s.take_flash()), None);
    }
}
