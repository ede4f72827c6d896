//! In-memory [`UserStore`] for tests and local experiments.
//!
//! Updates go through the same [`PartialUpdate`] the Postgres store runs,
//! so only allow-listed, type-checked columns can ever be written here too.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::database::{DatabaseError, NewUser, PartialUpdate, User, UserDetail, UserStore, UserSummary};

pub struct MemoryUserStore {
    users: RwLock<BTreeMap<String, User>>,
    available: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let rows = users
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();
        Self {
            users: RwLock::new(rows),
            available: AtomicBool::new(true),
        }
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.username.clone(), user);
    }

    /// Current row for `username`, for asserting on store contents.
    pub async fn snapshot(&self, username: &str) -> Option<User> {
        self.users.read().await.get(username).cloned()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Simulate the store going away; every call then fails with `Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), DatabaseError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DatabaseError::Unavailable("memory store switched off".to_string()))
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn assign(user: &mut User, column: &str, value: &Value) -> Result<(), DatabaseError> {
    let mismatch = || DatabaseError::UnsupportedValue {
        column: column.to_string(),
        value: value.to_string(),
    };
    match column {
        "first_name" => user.first_name = value.as_str().ok_or_else(mismatch)?.to_string(),
        "last_name" => user.last_name = value.as_str().ok_or_else(mismatch)?.to_string(),
        "email" => user.email = value.as_str().ok_or_else(mismatch)?.to_string(),
        "phone" => user.phone = value.as_str().ok_or_else(mismatch)?.to_string(),
        "admin" => user.admin = value.as_bool().ok_or_else(mismatch)?,
        _ => return Err(mismatch()),
    }
    Ok(())
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn register(&self, user: NewUser) -> Result<User, DatabaseError> {
        self.ensure_available()?;
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(DatabaseError::DuplicateUser(user.username));
        }
        let row = User::from(user);
        users.insert(row.username.clone(), row.clone());
        Ok(row)
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        self.ensure_available()?;
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn list(&self) -> Result<Vec<UserSummary>, DatabaseError> {
        self.ensure_available()?;
        Ok(self.users.read().await.values().map(UserSummary::from).collect())
    }

    async fn get(&self, username: &str) -> Result<Option<UserDetail>, DatabaseError> {
        self.ensure_available()?;
        Ok(self.users.read().await.get(username).map(UserDetail::from))
    }

    async fn apply_update(&self, update: &PartialUpdate) -> Result<Option<User>, DatabaseError> {
        self.ensure_available()?;
        let Some(key) = update.key_value().as_str() else {
            return Ok(None);
        };

        let mut users = self.users.write().await;
        let Some(current) = users.get(key) else {
            return Ok(None);
        };

        // Apply to a copy so a bad assignment leaves the row untouched
        let mut row = current.clone();
        for (column, value) in update.assignments() {
            assign(&mut row, column, value)?;
        }
        users.insert(key.to_string(), row.clone());
        Ok(Some(row))
    }

    async fn delete(&self, username: &str) -> Result<bool, DatabaseError> {
        self.ensure_available()?;
        Ok(self.users.write().await.remove(username).is_some())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.ensure_available()
    }
}
