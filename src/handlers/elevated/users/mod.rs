// handlers/elevated/users/mod.rs - admin-only user operations

pub mod delete;

pub use delete::user_delete;
