//! Keyed in-memory store holding at most one battle per user.
//!
//! Each user owns a slot guarded by its own async mutex. The outer map lock is
//! held only long enough to find or insert a slot, so actions for different
//! users never wait on each other, while a caller holding a [`SessionSlot`]
//! has exclusive read-modify-write access to that user's battle.

use std::collections::HashMap;
use std::sync::Arc;

use battle_core::{BattleSession, UserId};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

type Slot = Arc<Mutex<Option<BattleSession>>>;

/// Exclusive access to one user's battle for the lifetime of the guard.
pub type SessionSlot = OwnedMutexGuard<Option<BattleSession>>;

#[derive(Default)]
pub struct BattleSessionStore {
    slots: RwLock<HashMap<UserId, Slot>>,
}

impl BattleSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks `user`'s slot, creating an empty one if needed.
    ///
    /// Concurrent callers for the same user queue here; the returned guard
    /// must be held across the whole read-modify-write cycle.
    pub async fn lock(&self, user: UserId) -> SessionSlot {
        let existing = self.slots.read().await.get(&user).cloned();
        let slot = match existing {
            Some(slot) => slot,
            None => {
                let mut slots = self.slots.write().await;
                Arc::clone(slots.entry(user).or_default())
            }
        };
        slot.lock_owned().await
    }

    pub async fn get(&self, user: UserId) -> Option<BattleSession> {
        let slot = self.slots.read().await.get(&user).cloned()?;
        let guard = slot.lock().await;
        guard.clone()
    }

    pub async fn set(&self, user: UserId, session: BattleSession) {
        let mut slot = self.lock(user).await;
        *slot = Some(session);
    }

    pub async fn exists(&self, user: UserId) -> bool {
        let Some(slot) = self.slots.read().await.get(&user).cloned() else {
            return false;
        };
        let guard = slot.lock().await;
        guard.is_some()
    }

    /// Removes and returns `user`'s battle, if any.
    pub async fn remove(&self, user: UserId) -> Option<BattleSession> {
        let session = {
            let mut slot = self.lock(user).await;
            slot.take()
        };
        self.prune(user).await;
        session
    }

    /// Drops the slot for `user` if it is empty and nobody else holds it.
    async fn prune(&self, user: UserId) {
        let mut slots = self.slots.write().await;
        let idle = slots.get(&user).is_some_and(|slot| {
            Arc::strong_count(slot) == 1 && slot.try_lock().is_ok_and(|guard| guard.is_none())
        });
        if idle {
            slots.remove(&user);
        }
    }
}
