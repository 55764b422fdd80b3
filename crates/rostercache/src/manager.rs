//! UserManager: cache-or-fetch facade over a user store

use std::collections::HashMap;

use ahash::RandomState;
use parking_lot::RwLock;
use rosterdb::{
    validate_email, Error, FieldUpdate, NewUser, NullStore, Result, Role, User, UserStore,
};
use tracing::{debug, info};

use crate::stats::{CacheStats, Counters};

/// Default `limit` for [`UserManager::list`]
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Cached users plus the id counter
struct UserCache {
    users: HashMap<u64, User, RandomState>,
    /// Insertion order of `users` keys
    order: Vec<u64>,
    /// Highest id issued or seen; the next create uses `last_id + 1`
    last_id: u64,
}

impl UserCache {
    fn starting_after(last_id: u64) -> Self {
        Self {
            users: HashMap::default(),
            order: Vec::new(),
            last_id,
        }
    }

    fn next_id(&self) -> Result<u64> {
        self.last_id
            .checked_add(1)
            .ok_or_else(|| Error::InvalidInput("user id space exhausted".to_string()))
    }

    fn insert(&mut self, user: User) {
        let id = user.id;
        if self.users.insert(id, user).is_none() {
            self.order.push(id);
        }
        self.last_id = self.last_id.max(id);
    }

    fn remove(&mut self, id: u64) {
        if self.users.remove(&id).is_some() {
            self.order.retain(|&cached| cached != id);
        }
    }
}

/// Facade combining an in-memory user cache with a durable store
///
/// Reads are served from the cache and fall back to the store on a miss.
/// Creates and updates write through to the store. Identifiers come from a
/// counter owned by the facade and are never reused.
pub struct UserManager<S = NullStore> {
    /// Backing store
    store: S,

    /// Cached users
    cache: RwLock<UserCache>,

    /// Cache counters
    stats: Counters,
}

impl UserManager<NullStore> {
    /// Create a manager backed by the no-op store stub
    pub fn new() -> Self {
        Self {
            store: NullStore,
            cache: RwLock::new(UserCache::starting_after(0)),
            stats: Counters::default(),
        }
    }
}

impl Default for UserManager<NullStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: UserStore> UserManager<S> {
    /// Create a manager over `store`, continuing from its last issued id
    pub fn with_store(store: S) -> Result<Self> {
        let last_id = store.last_id()?;

        Ok(Self {
            store,
            cache: RwLock::new(UserCache::starting_after(last_id)),
            stats: Counters::default(),
        })
    }

    /// Get a user from cache or store
    ///
    /// # Returns
    /// * `Ok(None)` if neither the cache nor the store has the id
    pub fn get(&self, id: u64) -> Result<Option<User>> {
        // Try cache first
        if let Some(user) = self.cache.read().users.get(&id) {
            self.stats.hit();
            return Ok(Some(user.clone()));
        }

        // Cache miss - fetch from store
        self.stats.miss();
        debug!("Cache miss for user {}, fetching from store", id);
        let user = self.store.fetch(id)?;

        if let Some(user) = &user {
            self.cache.write().insert(user.clone());
            self.stats.insert();
        }

        Ok(user)
    }

    /// Create a new user
    ///
    /// # Errors
    /// * `Error::InvalidInput` - if the email has no `@` or no `.` after it,
    ///   or if every id up to `u64::MAX` has been handed out
    pub fn create<N, E>(&self, name: N, email: E, role: Role) -> Result<User>
    where
        N: Into<String>,
        E: Into<String>,
    {
        let email = email.into();
        validate_email(&email)?;

        let mut cache = self.cache.write();
        let user = User {
            id: cache.next_id()?,
            name: name.into(),
            email,
            role,
        };

        self.store.save(&user)?;
        cache.insert(user.clone());
        self.stats.insert();
        drop(cache);

        info!("Created user {}: {}", user.id, user.name);
        Ok(user)
    }

    /// Create a user from a parsed record
    pub fn create_from(&self, record: NewUser) -> Result<User> {
        self.create(record.name, record.email, record.role)
    }

    /// Update fields of an existing user
    ///
    /// Either every update is applied or none is.
    ///
    /// # Returns
    /// * `Ok(None)` if the user does not exist
    pub fn update(&self, id: u64, updates: &[FieldUpdate]) -> Result<Option<User>> {
        if self.get(id)?.is_none() {
            return Ok(None);
        }

        for update in updates {
            if let FieldUpdate::Email(email) = update {
                validate_email(email)?;
            }
        }

        let mut cache = self.cache.write();
        let Some(cached) = cache.users.get_mut(&id) else {
            return Ok(None);
        };

        let mut user = cached.clone();
        for update in updates {
            user.apply(update);
        }

        self.store.save(&user)?;
        cached.clone_from(&user);
        drop(cache);

        info!("Updated user {}", id);
        Ok(Some(user))
    }

    /// Delete a cached user
    ///
    /// Users that are only in the store are left alone. The cache entry is
    /// dropped only after the store delete succeeds.
    ///
    /// # Returns
    /// * `Ok(true)` if the user was cached and has been removed
    pub fn delete(&self, id: u64) -> Result<bool> {
        let mut cache = self.cache.write();
        if !cache.users.contains_key(&id) {
            return Ok(false);
        }

        self.store.delete(id)?;
        cache.remove(id);
        self.stats.removal();
        drop(cache);

        info!("Deleted user {}", id);
        Ok(true)
    }

    /// List cached users in insertion order
    ///
    /// # Arguments
    /// * `role` - Keep only users with exactly this role
    /// * `limit` - Maximum number of users returned
    pub fn list(&self, role: Option<&Role>, limit: usize) -> Vec<User> {
        let cache = self.cache.read();

        cache
            .order
            .iter()
            .filter_map(|id| cache.users.get(id))
            .filter(|user| role.map_or(true, |role| *role == user.role))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Snapshot of the cache counters
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Get current cache size
    pub fn cache_len(&self) -> usize {
        self.cache.read().users.len()
    }

    /// Clear the cache (store and id counter remain unchanged)
    pub fn clear_cache(&self) {
        let mut cache = self.cache.write();
        cache.users.clear();
        cache.order.clear();
        self.stats.clear();
    }

    /// Get the backing store
    pub fn store(&self) -> &S {
        &self.store
    }
}
