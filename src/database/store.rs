use async_trait::async_trait;

use super::models::{NewUser, User, UserDetail, UserSummary};
use super::partial_update::PartialUpdate;
use super::DatabaseError;

/// The user-record store behind the gate.
///
/// Implementations run exactly one statement per call and never retry.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user, failing with `DuplicateUser` if the name is taken.
    async fn register(&self, user: NewUser) -> Result<User, DatabaseError>;

    /// Full row, hash included, for password comparison at login.
    async fn find_credentials(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn list(&self) -> Result<Vec<UserSummary>, DatabaseError>;

    async fn get(&self, username: &str) -> Result<Option<UserDetail>, DatabaseError>;

    /// Run an already-approved partial update and return the updated row,
    /// or `None` if no row matched the key.
    async fn apply_update(&self, update: &PartialUpdate) -> Result<Option<User>, DatabaseError>;

    /// Returns false when there was nothing to delete.
    async fn delete(&self, username: &str) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
