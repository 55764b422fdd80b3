//! Durable-store seam behind the user facade
//!
//! `NullStore` is the stub used by default: nothing is ever found, saved or
//! deleted. `MemoryStore` keeps records in a map so that fetch-on-miss and
//! write-through can be observed.

use std::collections::HashMap;

use ahash::RandomState;
use parking_lot::RwLock;

use crate::error::Result;
use crate::user::User;

/// Backing store consulted by the facade on cache misses and mutations
pub trait UserStore: Send + Sync {
    /// Look up a user by id
    fn fetch(&self, id: u64) -> Result<Option<User>>;

    /// Insert or replace a user
    fn save(&self, user: &User) -> Result<()>;

    /// Remove a user; removing a missing id is not an error
    fn delete(&self, id: u64) -> Result<()>;

    /// Highest id ever handed out by this store (0 if none)
    fn last_id(&self) -> Result<u64> {
        Ok(0)
    }
}

/// Store stub: every operation is a no-op
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl UserStore for NullStore {
    fn fetch(&self, _id: u64) -> Result<Option<User>> {
        Ok(None)
    }

    fn save(&self, _user: &User) -> Result<()> {
        Ok(())
    }

    fn delete(&self, _id: u64) -> Result<()> {
        Ok(())
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<u64, User, RandomState>>,
    last_id: RwLock<u64>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with users
    pub fn with_users<I: IntoIterator<Item = User>>(users: I) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(user);
        }
        store
    }

    fn insert(&self, user: User) {
        let mut last_id = self.last_id.write();
        *last_id = (*last_id).max(user.id);
        self.users.write().insert(user.id, user);
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    /// Check if a user is stored
    pub fn contains(&self, id: u64) -> bool {
        self.users.read().contains_key(&id)
    }
}

impl UserStore for MemoryStore {
    fn fetch(&self, id: u64) -> Result<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    fn save(&self, user: &User) -> Result<()> {
        self.insert(user.clone());
        Ok(())
    }

    fn delete(&self, id: u64) -> Result<()> {
        self.users.write().remove(&id);
        Ok(())
    }

    fn last_id(&self) -> Result<u64> {
        Ok(*self.last_id.read())
    }
}
