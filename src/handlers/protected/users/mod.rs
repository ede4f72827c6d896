// handlers/protected/users/mod.rs - user record reads and updates

pub mod get;
pub mod list;
pub mod update;

pub use get::user_get;
pub use list::list_get;
pub use update::user_patch;
