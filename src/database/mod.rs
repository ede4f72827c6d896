pub mod models;
pub mod partial_update;
pub mod postgres;
pub mod store;

use thiserror::Error;

pub use models::{NewUser, User, UserDetail, UserSummary};
pub use partial_update::{sql_for_partial_update, PartialUpdate, UpdateBuildError};
pub use postgres::PgUserStore;
pub use store::UserStore;

/// Errors from the record store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("There already exists a user with username '{0}'")]
    DuplicateUser(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A value the store has no binding for reached it anyway.
    #[error("Column '{column}' cannot store {value}")]
    UnsupportedValue { column: String, value: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
