//! User identity lookup.

use std::sync::{Arc, RwLock};

/// Answers "which user is this?" at the moment an event is translated.
pub trait UserIdentity: Send + Sync {
    /// The current user id, or `None` when unknown.
    fn user_id(&self) -> Option<String>;
}

impl<F> UserIdentity for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn user_id(&self) -> Option<String> {
        self()
    }
}

/// A lookup that never knows the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl UserIdentity for Anonymous {
    fn user_id(&self) -> Option<String> {
        None
    }
}

/// Shared user id slot the host updates as the user logs in or out.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    id: Arc<RwLock<Option<String>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a user id. Empty ids clear the slot.
    pub fn identify(&self, id: impl Into<String>) {
        let id = id.into();
        if let Ok(mut slot) = self.id.write() {
            *slot = Some(id).filter(|id| !id.is_empty());
        }
    }

    /// Forget the user.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.id.write() {
            *slot = None;
        }
    }
}

impl UserIdentity for UserStore {
    fn user_id(&self) -> Option<String> {
        self.id.read().ok().and_then(|slot| slot.clone())
    }
}
